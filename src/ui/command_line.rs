//! Command line UI component

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::{CommandLineState, CommandMode};
use crate::theme::Theme;

const IDLE_HINT: &str = ": comandos  / busca  c tutor  t tema  ? ajuda";

/// Draw the command line at the bottom of the screen
pub fn draw(frame: &mut Frame, area: Rect, state: &CommandLineState, theme: &Theme) {
    let (text, style) = match state.mode {
        CommandMode::Normal => match &state.message {
            Some(msg) => {
                let style = if state.is_error {
                    Style::default().fg(theme.error)
                } else {
                    Style::default().fg(theme.fg_secondary)
                };
                (msg.clone(), style)
            }
            None => (IDLE_HINT.to_string(), Style::default().fg(theme.fg_muted)),
        },
        CommandMode::Command => (state.display_text(), Style::default().fg(theme.accent_primary)),
        CommandMode::Search => (state.display_text(), Style::default().fg(theme.info)),
    };

    // +1 skips the mode prefix
    let line = if state.is_input_mode() {
        build_line_with_cursor(&text, state.cursor + 1, style, theme)
    } else {
        Line::from(Span::styled(text, style))
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg_primary)), area);
}

/// Build a line with a visible cursor at char position `cursor_pos`
pub fn build_line_with_cursor(
    text: &str,
    cursor_pos: usize,
    base_style: Style,
    theme: &Theme,
) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();

    if cursor_pos > 0 {
        let before: String = chars.iter().take(cursor_pos).collect();
        spans.push(Span::styled(before, base_style));
    }

    // Cursor character (or space if at end)
    let cursor_char = chars.get(cursor_pos).copied().unwrap_or(' ');
    let cursor_style =
        Style::default().fg(theme.bg_primary).bg(theme.fg_primary).add_modifier(Modifier::BOLD);
    spans.push(Span::styled(cursor_char.to_string(), cursor_style));

    if cursor_pos + 1 < chars.len() {
        let after: String = chars.iter().skip(cursor_pos + 1).collect();
        spans.push(Span::styled(after, base_style));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_cursor_at_start() {
        let theme = Theme::default();
        let line = build_line_with_cursor(":tema", 0, Style::default(), &theme);
        assert_eq!(line.spans.len(), 2);
    }

    #[test]
    fn build_cursor_at_end() {
        let theme = Theme::default();
        let line = build_line_with_cursor(":tema", 5, Style::default(), &theme);
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[1].content, " ");
    }

    #[test]
    fn build_cursor_on_multibyte_char() {
        let theme = Theme::default();
        let line = build_line_with_cursor("/função", 5, Style::default(), &theme);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[0].content, "/funç");
        assert_eq!(line.spans[1].content, "ã");
        assert_eq!(line.spans[2].content, "o");
    }
}
