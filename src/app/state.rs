//! Application state definitions

use regex::{Regex, RegexBuilder};

use crate::curriculum::{BIBLIOGRAPHY, CURRICULUM, EVALUATION, SpecialPage, Topic};
use crate::lesson::{Lesson, parse_lesson};
use crate::theme::ThemeMode;
use crate::tutor::ChatState;

use super::navigation::{Navigator, Selection, View};
use super::sidebar::SidebarState;

/// Which panel is currently focused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Sidebar,
    Content,
    Chat,
}

/// Panel visibility settings
#[derive(Debug, Clone)]
pub struct PanelVisibility {
    /// Show the sidebar (left) panel
    pub sidebar: bool,
    /// Show the tutor (right) panel when the view allows it
    pub chat: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self { sidebar: true, chat: false }
    }
}

/// State for content rendering
#[derive(Debug, Clone, Default)]
pub struct ContentState {
    /// Current scroll position (lines from top)
    pub scroll_offset: usize,
    /// Total rendered lines (updated on render)
    pub total_lines: usize,
    /// Visible height in lines (updated on render)
    pub visible_height: usize,
    /// Line indices that match current search
    pub search_matches: Vec<usize>,
    /// Currently highlighted match index
    pub current_match: Option<usize>,
}

impl ContentState {
    /// Get the maximum allowed scroll offset
    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height / 2)
    }

    /// Clamp scroll offset to valid range
    pub fn clamp_scroll(&mut self) {
        let max = self.max_scroll();
        if self.scroll_offset > max {
            self.scroll_offset = max;
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
        self.clamp_scroll();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Back to the top with no search state
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
        self.search_matches.clear();
        self.current_match = None;
    }

    /// Jump to the next search match after the current one, wrapping
    pub fn next_match(&mut self) -> Option<usize> {
        if self.search_matches.is_empty() {
            return None;
        }
        let next = match self.current_match {
            Some(i) => (i + 1) % self.search_matches.len(),
            None => 0,
        };
        Some(self.jump_to_match(next))
    }

    /// Jump to the previous search match, wrapping
    pub fn prev_match(&mut self) -> Option<usize> {
        if self.search_matches.is_empty() {
            return None;
        }
        let len = self.search_matches.len();
        let prev = match self.current_match {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        Some(self.jump_to_match(prev))
    }

    fn jump_to_match(&mut self, index: usize) -> usize {
        self.current_match = Some(index);
        // Keep a few lines of context above the hit
        self.scroll_offset = self.search_matches[index].saturating_sub(2);
        index
    }
}

/// State for search mode
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Last submitted search query
    pub query: String,
    /// Case-insensitive literal pattern for `query`
    pub pattern: Option<Regex>,
    /// Jump to the first match on the next render
    pub jump_pending: bool,
}

impl SearchState {
    /// Start a new search; an empty query clears it
    pub fn set_query(&mut self, query: &str) -> Result<(), regex::Error> {
        let query = query.trim();
        self.query = query.to_string();
        self.pattern = if query.is_empty() {
            None
        } else {
            Some(RegexBuilder::new(&regex::escape(query)).case_insensitive(true).build()?)
        };
        self.jump_pending = self.pattern.is_some();
        Ok(())
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(text))
    }
}

/// Command line mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandMode {
    /// Normal mode - command line hidden or showing status
    #[default]
    Normal,
    /// Command mode - accepting : commands
    Command,
    /// Search mode - accepting / search queries
    Search,
}

/// State for the command line input
#[derive(Debug, Clone, Default)]
pub struct CommandLineState {
    /// Current mode
    pub mode: CommandMode,
    /// Input buffer
    pub input: String,
    /// Cursor position in input
    pub cursor: usize,
    /// Status/error message to display (when not in input mode)
    pub message: Option<String>,
    /// Whether message is an error
    pub is_error: bool,
    /// Command history
    pub history: Vec<String>,
    /// Current history index when navigating
    pub history_index: Option<usize>,
}

impl CommandLineState {
    /// Maximum number of history entries to keep
    const MAX_HISTORY: usize = 200;

    /// Start command mode
    pub fn enter_command_mode(&mut self) {
        self.enter_mode(CommandMode::Command);
    }

    /// Start search mode
    pub fn enter_search_mode(&mut self) {
        self.enter_mode(CommandMode::Search);
    }

    fn enter_mode(&mut self, mode: CommandMode) {
        self.mode = mode;
        self.input.clear();
        self.cursor = 0;
        self.message = None;
        self.history_index = None;
    }

    /// Exit input mode
    pub fn exit_input_mode(&mut self) {
        self.mode = CommandMode::Normal;
        self.input.clear();
        self.cursor = 0;
    }

    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.input.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.input.len())
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at cursor (cursor is character index)
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    /// Delete character at cursor
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_count() {
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Get the current input with prefix
    pub fn display_text(&self) -> String {
        match self.mode {
            CommandMode::Normal => self.message.clone().unwrap_or_default(),
            CommandMode::Command => format!(":{}", self.input),
            CommandMode::Search => format!("/{}", self.input),
        }
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, CommandMode::Command | CommandMode::Search)
    }

    pub fn add_to_history(&mut self, cmd: String) {
        if !cmd.is_empty() && self.history.last() != Some(&cmd) {
            if self.history.len() >= Self::MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(cmd);
        }
    }

    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        match self.history_index {
            None => self.history_index = Some(self.history.len() - 1),
            Some(i) if i > 0 => self.history_index = Some(i - 1),
            _ => {}
        }
        if let Some(i) = self.history_index {
            self.input = self.history[i].clone();
            self.move_end();
        }
    }

    pub fn history_down(&mut self) {
        if let Some(i) = self.history_index {
            if i + 1 < self.history.len() {
                self.history_index = Some(i + 1);
                self.input = self.history[i + 1].clone();
                self.move_end();
            } else {
                self.history_index = None;
                self.input.clear();
                self.cursor = 0;
            }
        }
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Active light/dark mode
    pub theme_mode: ThemeMode,

    /// Selection state machine
    pub navigator: Navigator,

    /// Sidebar accordion and cursor
    pub sidebar: SidebarState,

    /// Parsed form of the displayed markdown
    pub lesson: Option<Lesson>,

    pub panel_visibility: PanelVisibility,

    pub focused_panel: Panel,

    pub content: ContentState,

    pub search: SearchState,

    pub command_line: CommandLineState,

    /// Tutor transcript for the displayed lesson
    pub chat: ChatState,

    /// Bumped whenever the transcript is discarded; replies for older sessions are dropped
    pub chat_session: u64,

    /// Help overlay visible
    pub show_help: bool,
}

/// What `y` and `:yank [n]` put on the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clip {
    Link(&'static str),
    /// A lesson code block and its number on screen
    Code { number: usize, text: String },
}

impl AppState {
    pub fn new(theme_mode: ThemeMode) -> Self {
        Self { theme_mode, ..Self::default() }
    }

    /// Select a topic and update everything that hangs off the selection
    pub fn select_topic(&mut self, topic: &'static Topic) -> Selection {
        let selection = self.navigator.select(topic);
        if selection == Selection::Unchanged {
            return selection;
        }

        if let Some(chapter) = CURRICULUM.chapter_index_of(topic.id) {
            self.sidebar.reveal(chapter);
        }
        self.sidebar.focus_topic(&CURRICULUM, topic.id);
        self.lesson = None;
        self.content.reset();
        self.reset_chat();
        if self.focused_panel == Panel::Chat {
            self.focused_panel = Panel::Content;
        }
        selection
    }

    /// Apply a finished lesson load; stale loads are ignored
    pub fn finish_load(&mut self, request_id: u64, markdown: String) -> bool {
        if !self.navigator.complete(request_id, markdown) {
            return false;
        }
        self.lesson = self.navigator.markdown().map(parse_lesson);
        true
    }

    /// Clipboard text for the current page: the n-th code block of a lesson,
    /// or a special page's link. `Err` holds the message for the command line.
    pub fn clip(&self, index: Option<usize>) -> Result<Clip, String> {
        let number = index.unwrap_or(1);
        match self.navigator.view() {
            View::Displaying { .. } => {
                let lesson = self.lesson.as_ref().ok_or("Aula ainda não carregada")?;
                let count = lesson.code_blocks().count();
                match lesson.code_block(number) {
                    Some(block) => Ok(Clip::Code { number, text: block.code.clone() }),
                    None if count == 0 => Err("Esta aula não tem exemplos de código".to_string()),
                    None => Err(format!("Exemplo {} não existe (1-{})", number, count)),
                }
            }
            View::Special { page: SpecialPage::Evaluation, .. } => Ok(Clip::Link(EVALUATION.sheet_href)),
            View::Special { page: SpecialPage::Bibliography, .. } => number
                .checked_sub(1)
                .and_then(|i| BIBLIOGRAPHY.get(i))
                .map(|reference| Clip::Link(reference.href))
                .ok_or_else(|| format!("Referência {} não existe (1-{})", number, BIBLIOGRAPHY.len())),
            View::Idle | View::Loading { .. } => Err("Nada para copiar nesta página".to_string()),
        }
    }

    /// The tutor panel is shown only next to a displayed lesson
    pub fn chat_visible(&self) -> bool {
        self.panel_visibility.chat && self.navigator.chat_available()
    }

    /// Discard the transcript; in-flight replies belong to the old session
    pub fn reset_chat(&mut self) {
        self.chat = ChatState::new();
        self.chat_session += 1;
    }

    /// Topic currently on screen, if any
    pub fn current_topic(&self) -> Option<&Topic> {
        match self.navigator.view() {
            View::Idle => None,
            View::Loading { topic, .. } | View::Displaying { topic, .. } | View::Special { topic, .. } => {
                Some(topic)
            }
        }
    }

    /// Cycle focus through the visible panels
    pub fn focus_next(&mut self) {
        let order = self.visible_panels();
        let position = order.iter().position(|p| *p == self.focused_panel).unwrap_or(0);
        self.focused_panel = order[(position + 1) % order.len()];
    }

    fn visible_panels(&self) -> Vec<Panel> {
        let mut panels = Vec::with_capacity(3);
        if self.panel_visibility.sidebar {
            panels.push(Panel::Sidebar);
        }
        panels.push(Panel::Content);
        if self.chat_visible() {
            panels.push(Panel::Chat);
        }
        panels
    }

    /// Show or hide the sidebar, moving focus off it when hidden
    pub fn toggle_sidebar(&mut self) {
        self.panel_visibility.sidebar = !self.panel_visibility.sidebar;
        if !self.panel_visibility.sidebar && self.focused_panel == Panel::Sidebar {
            self.focused_panel = Panel::Content;
        }
    }

    /// Show or hide the tutor; returns false when the current view has no tutor
    pub fn toggle_chat(&mut self) -> bool {
        if !self.navigator.chat_available() {
            return false;
        }
        self.panel_visibility.chat = !self.panel_visibility.chat;
        self.focused_panel = if self.panel_visibility.chat { Panel::Chat } else { Panel::Content };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::BIBLIOGRAPHY_TOPIC_ID;
    use crate::lesson::ContentResolver;
    use pretty_assertions::assert_eq;

    fn topic(id: &str) -> &'static Topic {
        CURRICULUM.find_topic(id).unwrap()
    }

    fn load(state: &mut AppState, id: &str) {
        if let Selection::Fetch(request) = state.select_topic(topic(id)) {
            let markdown = ContentResolver::embedded().resolve(&request.topic);
            assert!(state.finish_load(request.id, markdown));
        }
    }

    #[test]
    fn selecting_pins_chapter_and_moves_cursor() {
        let mut state = AppState::default();
        state.sidebar.toggle(1);
        state.select_topic(topic("m5-deco"));

        let chapter = CURRICULUM.chapter_index_of("m5-deco").unwrap();
        assert_eq!(state.sidebar.expanded(), vec![chapter]);
        assert_eq!(state.sidebar.selected_topic(&CURRICULUM).unwrap().id, "m5-deco");
        assert!(state.navigator.is_loading());
    }

    #[test]
    fn clip_copies_numbered_code_block() {
        let mut state = AppState::default();
        let Selection::Fetch(request) = state.select_topic(topic("m1-vars")) else { panic!("expected fetch") };
        let markdown = "# Variáveis\n\n```python\nx = 1\n```\n\nTexto.\n\n```python\ny = x + 1\n```\n";
        assert!(state.finish_load(request.id, markdown.to_string()));

        assert_eq!(state.clip(None), Ok(Clip::Code { number: 1, text: "x = 1".into() }));
        assert_eq!(state.clip(Some(2)), Ok(Clip::Code { number: 2, text: "y = x + 1".into() }));
        assert_eq!(state.clip(Some(3)), Err("Exemplo 3 não existe (1-2)".to_string()));
    }

    #[test]
    fn clip_without_code_or_while_loading() {
        let mut state = AppState::default();
        let Selection::Fetch(request) = state.select_topic(topic("m1-vars")) else { panic!("expected fetch") };
        assert!(state.clip(None).is_err());
        assert!(state.finish_load(request.id, "# Variáveis\n\nSó texto.".to_string()));
        assert_eq!(state.clip(None), Err("Esta aula não tem exemplos de código".to_string()));
    }

    #[test]
    fn clip_on_special_pages_copies_links() {
        let mut state = AppState::default();
        state.select_topic(topic(BIBLIOGRAPHY_TOPIC_ID));
        assert_eq!(state.clip(Some(2)), Ok(Clip::Link(BIBLIOGRAPHY[1].href)));
        assert!(state.clip(Some(BIBLIOGRAPHY.len() + 1)).is_err());

        state.select_topic(topic(crate::curriculum::EVALUATION_TOPIC_ID));
        assert_eq!(state.clip(None), Ok(Clip::Link(EVALUATION.sheet_href)));
    }

    #[test]
    fn finished_load_is_parsed() {
        let mut state = AppState::default();
        load(&mut state, "m1-vars");
        assert!(state.lesson.as_ref().is_some_and(|l| !l.blocks.is_empty()));
    }

    #[test]
    fn stale_load_leaves_lesson_empty() {
        let mut state = AppState::default();
        let Selection::Fetch(old) = state.select_topic(topic("m1-vars")) else { panic!("expected fetch") };
        state.select_topic(topic("m9-math"));
        assert!(!state.finish_load(old.id, "# Variáveis".into()));
        assert!(state.lesson.is_none());
    }

    #[test]
    fn new_topic_discards_transcript() {
        let mut state = AppState::default();
        load(&mut state, "m1-vars");
        state.chat.submit("o que é uma variável?");
        let session = state.chat_session;

        load(&mut state, "m9-math");
        assert!(state.chat.messages().is_empty());
        assert!(state.chat_session > session);
    }

    #[test]
    fn reselecting_same_topic_keeps_transcript() {
        let mut state = AppState::default();
        load(&mut state, "m1-vars");
        state.chat.submit("pergunta");
        assert_eq!(state.select_topic(topic("m1-vars")), Selection::Unchanged);
        assert_eq!(state.chat.messages().len(), 1);
    }

    #[test]
    fn chat_hidden_on_special_pages() {
        let mut state = AppState::default();
        load(&mut state, "m1-vars");
        assert!(state.toggle_chat());
        assert!(state.chat_visible());
        assert_eq!(state.focused_panel, Panel::Chat);

        state.select_topic(topic(BIBLIOGRAPHY_TOPIC_ID));
        assert!(!state.chat_visible());
        assert_ne!(state.focused_panel, Panel::Chat);
        assert!(!state.toggle_chat());
    }

    #[test]
    fn focus_cycles_visible_panels() {
        let mut state = AppState::default();
        load(&mut state, "m1-vars");
        assert_eq!(state.focused_panel, Panel::Sidebar);
        state.focus_next();
        assert_eq!(state.focused_panel, Panel::Content);
        state.focus_next();
        assert_eq!(state.focused_panel, Panel::Sidebar);

        state.toggle_chat();
        state.focus_next();
        assert_eq!(state.focused_panel, Panel::Sidebar);
    }

    #[test]
    fn hiding_sidebar_moves_focus() {
        let mut state = AppState::default();
        state.toggle_sidebar();
        assert_eq!(state.focused_panel, Panel::Content);
    }

    #[test]
    fn search_matches_wrap() {
        let mut content = ContentState { search_matches: vec![3, 10, 40], ..ContentState::default() };
        assert_eq!(content.next_match(), Some(0));
        assert_eq!(content.scroll_offset, 1);
        content.next_match();
        content.next_match();
        assert_eq!(content.next_match(), Some(0));
        assert_eq!(content.prev_match(), Some(2));
        assert_eq!(content.scroll_offset, 38);
    }

    #[test]
    fn search_is_literal_and_case_insensitive() {
        let mut search = SearchState::default();
        search.set_query("  X**2 ").unwrap();
        assert_eq!(search.query, "X**2");
        assert!(search.jump_pending);
        assert!(search.is_match("y = x**2 + 1"));
        assert!(!search.is_match("xx2"));

        search.set_query("").unwrap();
        assert!(search.pattern.is_none());
        assert!(!search.is_match("anything"));
    }

    #[test]
    fn no_matches_no_jump() {
        let mut content = ContentState::default();
        assert_eq!(content.next_match(), None);
        assert_eq!(content.prev_match(), None);
    }

    #[test]
    fn command_line_history() {
        let mut cl = CommandLineState::default();
        cl.add_to_history("theme".into());
        cl.add_to_history("theme".into());
        cl.add_to_history("goto m1-vars".into());
        assert_eq!(cl.history.len(), 2);

        cl.history_up();
        assert_eq!(cl.input, "goto m1-vars");
        cl.history_up();
        assert_eq!(cl.input, "theme");
        cl.history_down();
        cl.history_down();
        assert!(cl.input.is_empty());
    }

    #[test]
    fn command_line_edits_by_char() {
        let mut cl = CommandLineState::default();
        cl.enter_command_mode();
        for c in "ação".chars() {
            cl.insert_char(c);
        }
        cl.move_left();
        cl.delete_char();
        assert_eq!(cl.input, "aço");
        assert_eq!(cl.display_text(), ":aço");
    }
}
