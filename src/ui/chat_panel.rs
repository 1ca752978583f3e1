//! Tutor chat panel, docked on the right of the lesson

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use textwrap::{Options, wrap};

use super::command_line::build_line_with_cursor;
use crate::theme::Theme;
use crate::tutor::{ChatState, GREETING, Role};

const TITLE: &str = " Tutor PyMath ";
const PLACEHOLDER: &str = "Digite sua dúvida...";
const WAITING: &str = "Aguardando resposta...";

/// Draw the chat panel
pub fn draw(frame: &mut Frame, area: Rect, chat: &mut ChatState, theme: &Theme, focused: bool) {
    let border_color = if focused { theme.border_focused } else { theme.border };

    let block = Block::default()
        .title(TITLE)
        .title_bottom(Line::from(" Enter envia  Esc sai ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [transcript_area, input_area] = Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(inner);

    let width = transcript_area.width.saturating_sub(1) as usize;
    let lines = transcript_lines(chat, theme, width);

    // Bottom-anchored scrolling
    let visible = transcript_area.height as usize;
    let max_scroll = lines.len().saturating_sub(visible);
    chat.scroll_from_bottom = chat.scroll_from_bottom.min(max_scroll);
    let start = max_scroll - chat.scroll_from_bottom;

    let visible_lines: Vec<Line> = lines.into_iter().skip(start).take(visible).collect();
    frame.render_widget(Paragraph::new(visible_lines), transcript_area);

    draw_input(frame, input_area, chat, theme, focused);
}

/// Greeting, then every entry, then the in-flight reply
fn transcript_lines(chat: &ChatState, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    push_entry(&mut lines, Role::Assistant, GREETING, theme, width);

    for message in chat.messages() {
        push_entry(&mut lines, message.role, &message.text, theme, width);
    }

    if chat.is_pending() {
        if chat.stream_buffer.is_empty() {
            lines.push(speaker(Role::Assistant, theme));
            lines.push(Line::from(Span::styled(
                "  ...",
                Style::default().fg(theme.fg_muted).add_modifier(Modifier::SLOW_BLINK),
            )));
        } else {
            push_entry(&mut lines, Role::Assistant, &chat.stream_buffer, theme, width);
            if let Some(last) = lines.last_mut() {
                last.spans.push(Span::styled("▍", Style::default().fg(theme.accent_primary)));
            }
        }
    }

    lines
}

fn speaker(role: Role, theme: &Theme) -> Line<'static> {
    let (label, color) = match role {
        Role::User => ("Você", theme.accent_secondary),
        Role::Assistant => ("Tutor", theme.accent_primary),
    };
    Line::from(Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)))
}

fn push_entry(lines: &mut Vec<Line<'static>>, role: Role, text: &str, theme: &Theme, width: usize) {
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines.push(speaker(role, theme));

    let style = match role {
        Role::User => Style::default().fg(theme.fg_secondary),
        Role::Assistant => Style::default().fg(theme.fg_primary),
    };
    let text_width = width.saturating_sub(2).max(1);
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(Line::from(""));
            continue;
        }
        for row in wrap(paragraph, Options::new(text_width)) {
            lines.push(Line::from(Span::styled(format!("  {}", row), style)));
        }
    }
}

fn draw_input(frame: &mut Frame, area: Rect, chat: &ChatState, theme: &Theme, focused: bool) {
    let block = Block::default().borders(Borders::TOP).border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if chat.is_pending() {
        Line::from(Span::styled(WAITING, Style::default().fg(theme.fg_muted)))
    } else if focused {
        let (text, cursor) = input_window(&chat.input, chat.cursor, inner.width as usize);
        build_line_with_cursor(&format!("> {}", text), cursor + 2, Style::default().fg(theme.fg_primary), theme)
    } else if chat.input.is_empty() {
        Line::from(Span::styled(format!("> {}", PLACEHOLDER), Style::default().fg(theme.fg_muted)))
    } else {
        Line::from(Span::styled(format!("> {}", chat.input), Style::default().fg(theme.fg_secondary)))
    };

    frame.render_widget(Paragraph::new(line), inner);
}

/// The slice of `input` that keeps the cursor on screen, and the cursor within it
fn input_window(input: &str, cursor: usize, width: usize) -> (String, usize) {
    // "> " prefix plus the cursor cell
    let room = width.saturating_sub(3).max(1);
    let skip = cursor.saturating_sub(room);
    (input.chars().skip(skip).take(room + 1).collect(), cursor - skip)
}
