//! UI rendering components

pub mod chat_panel;
pub mod command_line;
pub mod content;
pub mod help;
pub mod main_screen;
pub mod math;
pub mod sidebar;
pub mod special;

use ratatui::Frame;

use crate::app::state::AppState;
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &mut AppState) {
    let theme = Theme::for_mode(state.theme_mode);
    main_screen::draw(frame, state, &theme);
}
