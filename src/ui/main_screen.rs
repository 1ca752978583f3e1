//! Main screen: sidebar, lesson and tutor side by side over the command line

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use super::{chat_panel, command_line, content, help, sidebar};
use crate::app::state::{AppState, Panel};
use crate::theme::Theme;

/// Minimum width for the sidebar
const SIDEBAR_MIN_WIDTH: u16 = 24;

/// Minimum width for the tutor panel
const CHAT_MIN_WIDTH: u16 = 30;

/// Draw the main screen
pub fn draw(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let area = frame.area();

    let [main_area, command_area] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

    let chunks = create_layout(main_area, state);
    let mut panel_index = 0;

    if state.panel_visibility.sidebar {
        let focused = state.focused_panel == Panel::Sidebar;
        sidebar::draw(frame, chunks[panel_index], state, theme, focused);
        panel_index += 1;
    }

    let focused = state.focused_panel == Panel::Content;
    content::draw(frame, chunks[panel_index], state, theme, focused);
    panel_index += 1;

    if state.chat_visible() {
        let focused = state.focused_panel == Panel::Chat;
        chat_panel::draw(frame, chunks[panel_index], &mut state.chat, theme, focused);
    }

    command_line::draw(frame, command_area, &state.command_line, theme);

    if state.show_help {
        help::draw(frame, main_area, theme);
    }
}

/// Split the main area across the visible panels
fn create_layout(area: Rect, state: &AppState) -> Vec<Rect> {
    let mut constraints = Vec::new();

    // Sidebar (left): a quarter of the width
    if state.panel_visibility.sidebar {
        constraints.push(Constraint::Length((area.width / 4).max(SIDEBAR_MIN_WIDTH)));
    }

    // Lesson (center): flexible
    constraints.push(Constraint::Min(30));

    // Tutor (right): a third of the width
    if state.chat_visible() {
        constraints.push(Constraint::Length((area.width / 3).max(CHAT_MIN_WIDTH)));
    }

    Layout::horizontal(constraints).split(area).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::navigation::Selection;
    use crate::app::state::PanelVisibility;
    use crate::curriculum::CURRICULUM;
    use crate::theme::ThemeMode;

    fn displaying_state() -> AppState {
        let mut state = AppState::new(ThemeMode::Dark);
        let topic = CURRICULUM.find_topic("m1-what-is").unwrap();
        let Selection::Fetch(request) = state.select_topic(topic) else { panic!("expected a fetch") };
        state.finish_load(request.id, "# O que é Python?".to_string());
        state
    }

    #[test]
    fn layout_with_all_panels() {
        let area = Rect::new(0, 0, 120, 40);
        let mut state = displaying_state();
        assert!(state.toggle_chat());

        let chunks = create_layout(area, &state);
        assert_eq!(chunks.len(), 3);
        assert!(chunks[2].width >= CHAT_MIN_WIDTH);
    }

    #[test]
    fn layout_with_sidebar_only() {
        let area = Rect::new(0, 0, 100, 40);
        let state = displaying_state();

        let chunks = create_layout(area, &state);
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn layout_with_content_only() {
        let area = Rect::new(0, 0, 80, 40);
        let mut state = displaying_state();
        state.panel_visibility = PanelVisibility { sidebar: false, chat: false };

        let chunks = create_layout(area, &state);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn chat_hidden_while_loading() {
        let area = Rect::new(0, 0, 120, 40);
        let mut state = AppState::new(ThemeMode::Dark);
        state.select_topic(CURRICULUM.find_topic("m1-what-is").unwrap());
        state.panel_visibility.chat = true;

        assert_eq!(create_layout(area, &state).len(), 2);
    }

    #[test]
    fn sidebar_keeps_minimum_width() {
        let area = Rect::new(0, 0, 80, 40);
        let state = displaying_state();
        assert!(create_layout(area, &state)[0].width >= SIDEBAR_MIN_WIDTH);
    }
}
