//! Event handling utilities

use crossterm::event::{KeyCode, KeyModifiers};

/// Vim-style key mapping (basic, without modifiers)
pub fn vim_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::Left),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::Right),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::Char('d') | KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Char('u') | KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::Char(':') => Some(Action::Command),
        KeyCode::Char('/') => Some(Action::Search),
        KeyCode::Char('n') => Some(Action::NextMatch),
        KeyCode::Char('N') => Some(Action::PrevMatch),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('c') => Some(Action::ToggleChat),
        KeyCode::Char('y') => Some(Action::Yank),
        KeyCode::Char('[') | KeyCode::Char('1') => Some(Action::ToggleSidebar),
        KeyCode::Char(']') | KeyCode::Char('3') => Some(Action::ToggleChat),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Letter motions that only apply in vim mode
const VIM_MOTIONS: &[char] = &['j', 'k', 'h', 'l', 'g', 'G', 'd', 'u'];

/// Full key mapping honoring the vim mode setting
pub fn key_to_action(key: KeyCode, modifiers: KeyModifiers, vim_mode: bool) -> Option<Action> {
    if let KeyCode::Char(c) = key {
        if !vim_mode && !modifiers.contains(KeyModifiers::CONTROL) && VIM_MOTIONS.contains(&c) {
            return None;
        }
    }
    key_with_modifier_to_action(key, modifiers)
}

/// Key mapping with modifiers (for Ctrl combinations)
pub fn key_with_modifier_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match key {
            KeyCode::Char('d') => Some(Action::HalfPageDown),
            KeyCode::Char('u') => Some(Action::HalfPageUp),
            KeyCode::Char('f') => Some(Action::PageDown),
            KeyCode::Char('b') => Some(Action::PageUp),
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        }
    } else {
        vim_key_to_action(key)
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Left,
    Right,
    Top,
    Bottom,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,

    // Selection
    Select,
    Back,
    FocusNext,

    // Command line
    Command,
    Search,
    NextMatch,
    PrevMatch,

    // Panels
    ToggleSidebar,
    ToggleChat,

    ToggleTheme,
    /// Copy the link on the current page
    Yank,
    Help,
    Quit,
}
