//! Curriculum sidebar

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::sidebar::{SidebarItem, SidebarState};
use crate::app::state::AppState;
use crate::curriculum::{CURRICULUM, Curriculum, Difficulty};
use crate::theme::Theme;

const TITLE: &str = "PyMath";
const SUBTITLE: &str = "Programação de Computadores para Matemáticos";

/// Marker color for a topic's difficulty
pub fn difficulty_color(difficulty: Difficulty, theme: &Theme) -> Color {
    match difficulty {
        Difficulty::Green => theme.success,
        Difficulty::Orange => theme.warning,
        Difficulty::Red => theme.error,
    }
}

/// Draw the curriculum sidebar
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme, focused: bool) {
    let border_color = if focused { theme.border_focused } else { theme.border };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header_area, tree_area] = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(inner);

    let header = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(theme.fg_muted))),
    ];
    frame.render_widget(Paragraph::new(header), header_area);

    // Update visible height for scroll calculations
    state.sidebar.visible_height = tree_area.height as usize;
    state.sidebar.ensure_selection_visible();

    let current = state.current_topic().map(|t| t.id);
    let lines = tree_lines(&CURRICULUM, &state.sidebar, current, theme, focused);

    let start = state.sidebar.scroll_offset;
    let visible: Vec<Line> = lines.into_iter().skip(start).take(tree_area.height as usize).collect();
    frame.render_widget(Paragraph::new(visible), tree_area);
}

/// One line per row of the flattened tree
fn tree_lines(
    curriculum: &Curriculum,
    sidebar: &SidebarState,
    current: Option<&str>,
    theme: &Theme,
    focused: bool,
) -> Vec<Line<'static>> {
    let selected_style =
        Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD);

    sidebar
        .items(curriculum)
        .into_iter()
        .enumerate()
        .map(|(row, item)| {
            let is_selected = focused && row == sidebar.selected_index;
            match item {
                SidebarItem::Chapter(idx) => {
                    let chapter = &curriculum.chapters()[idx];
                    let icon = if sidebar.is_expanded(idx) { "▼" } else { "▶" };
                    let style = if is_selected {
                        selected_style
                    } else {
                        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD)
                    };
                    Line::from(Span::styled(format!("{} {}", icon, chapter.title), style))
                }
                SidebarItem::Topic(chapter_idx, topic_idx) => {
                    let topic = &curriculum.chapters()[chapter_idx].topics[topic_idx];
                    let marker = Span::styled(
                        "  ● ",
                        Style::default().fg(difficulty_color(topic.difficulty, theme)),
                    );
                    let style = if is_selected {
                        selected_style
                    } else if current == Some(topic.id) {
                        Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.fg_secondary)
                    };
                    Line::from(vec![marker, Span::styled(topic.title.to_string(), style)])
                }
            }
        })
        .collect()
}
