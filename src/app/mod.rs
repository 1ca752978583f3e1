//! Application state and event handling

pub mod command;
pub mod input;
pub mod navigation;
pub mod sidebar;
pub mod state;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::curriculum::{CURRICULUM, Topic};
use crate::lesson::ContentResolver;
use crate::theme::ThemeMode;
use crate::tutor::{ApiKeyManager, ClaudeClient, ClaudeModel, Reply, ask};
use command::{Command, ParseResult, parse_command};
use input::Action;
use navigation::{ContentRequest, Selection};
use sidebar::SidebarItem;
use state::{AppState, Clip, CommandMode, Panel};

/// Results delivered to the UI loop by background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// A lesson finished resolving
    LessonLoaded { request: u64, markdown: String },
    /// Streamed tutor text for a chat session
    TutorDelta { session: u64, text: String },
    /// Final tutor reply for a chat session
    TutorReply { session: u64, reply: Reply },
}

/// Launch-time settings that override the config file without being saved
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub theme: Option<ThemeMode>,
    pub lessons_dir: Option<PathBuf>,
}

/// The main application
pub struct App {
    /// Application configuration, as stored on disk
    config: Config,

    /// Current application state
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,

    resolver: Arc<ContentResolver>,

    tutor: Arc<ClaudeClient>,

    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,

    /// Cancelled on exit; aborts any streaming tutor call
    shutdown: CancellationToken,

    /// Child of `shutdown` for the current chat session
    chat_cancel: CancellationToken,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, overrides: Overrides) -> Result<Self> {
        let resolver = match overrides.lessons_dir.as_ref().or(config.lessons_dir.as_ref()) {
            Some(dir) => {
                tracing::info!(dir = %dir.display(), "Reading lessons from directory first");
                ContentResolver::with_directory(dir)
            }
            None => ContentResolver::embedded(),
        };
        let tutor = ClaudeClient::from_stored_key()
            .context("Failed to create tutor client")?
            .with_model(config.model);
        let theme_mode = overrides.theme.unwrap_or_else(|| config.theme_mode());

        let terminal = Self::setup_terminal()?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let chat_cancel = shutdown.child_token();

        Ok(Self {
            config,
            state: AppState::new(theme_mode),
            terminal,
            resolver: Arc::new(resolver),
            tutor: Arc::new(tutor),
            events_tx,
            events_rx,
            shutdown,
            chat_cancel,
        })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        self.start();

        loop {
            while let Ok(app_event) = self.events_rx.try_recv() {
                self.handle_event(app_event);
            }

            self.terminal.draw(|frame| {
                crate::ui::draw(frame, &mut self.state);
            })?;

            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => match self.handle_key(key) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => {
                            tracing::error!("Error handling key: {:#}", e);
                            self.state.command_line.set_error(format!("{:#}", e));
                        }
                    },
                    Event::Mouse(mouse) => match mouse.kind {
                        MouseEventKind::ScrollDown => self.state.content.scroll_down(3),
                        MouseEventKind::ScrollUp => self.state.content.scroll_up(3),
                        _ => {}
                    },
                    _ => {}
                }
            }
        }

        self.shutdown.cancel();
        self.restore_terminal()?;
        Ok(())
    }

    /// Initial selection
    fn start(&mut self) {
        let duplicates = CURRICULUM.duplicate_ids();
        if !duplicates.is_empty() {
            tracing::warn!(?duplicates, "Curriculum has duplicate topic ids");
        }
        if !self.tutor.has_key() {
            self.state.command_line.set_message("Tutor sem chave da API. Use :key <sua-chave>");
        }
        match CURRICULUM.first() {
            Some(first) => self.select(first),
            None => tracing::warn!("Curriculum is empty"),
        }
    }

    fn handle_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::LessonLoaded { request, markdown } => {
                if self.state.finish_load(request, markdown) {
                    tracing::debug!(request, "Lesson displayed");
                }
            }
            AppEvent::TutorDelta { session, text } => {
                if session == self.state.chat_session {
                    self.state.chat.append_delta(&text);
                }
            }
            AppEvent::TutorReply { session, reply } => {
                if session != self.state.chat_session {
                    tracing::debug!(session, "Discarding reply for a closed chat session");
                    return;
                }
                if let Some(hint) = reply.error.as_ref().and_then(|e| e.hint()) {
                    self.state.command_line.set_error(hint);
                }
                self.state.chat.deliver(reply.text);
            }
        }
    }

    /// Select a topic and start whatever work the selection needs
    fn select(&mut self, topic: &'static Topic) {
        match self.state.select_topic(topic) {
            Selection::Unchanged => {}
            Selection::Special(page) => {
                tracing::debug!(?page, "Showing special page");
                self.restart_chat_session();
            }
            Selection::Fetch(request) => {
                self.restart_chat_session();
                self.spawn_load(request);
            }
        }
    }

    fn restart_chat_session(&mut self) {
        self.chat_cancel.cancel();
        self.chat_cancel = self.shutdown.child_token();
    }

    fn spawn_load(&self, request: ContentRequest) {
        let resolver = Arc::clone(&self.resolver);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let markdown = resolver.resolve_async(request.topic).await;
            let _ = events.send(AppEvent::LessonLoaded { request: request.id, markdown });
        });
    }

    /// Ask the tutor in the background; the transcript already holds the question
    fn spawn_ask(&self, question: String) {
        let context = self.state.navigator.markdown().unwrap_or_default().to_string();
        let session = self.state.chat_session;
        let context_chars = self.config.context_chars;
        let tutor = Arc::clone(&self.tutor);
        let events = self.events_tx.clone();
        let cancel = self.chat_cancel.clone();

        tokio::spawn(async move {
            let (delta_tx, mut delta_rx) = mpsc::unbounded_channel();
            let forward = async {
                while let Some(text) = delta_rx.recv().await {
                    let _ = events.send(AppEvent::TutorDelta { session, text });
                }
            };
            let reply = ask(tutor.as_ref(), &question, &context, context_chars, delta_tx, cancel);
            let (reply, ()) = tokio::join!(reply, forward);
            let _ = events.send(AppEvent::TutorReply { session, reply });
        });
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if self.state.command_line.is_input_mode() {
            return self.handle_command_line_key(key);
        }

        if self.state.show_help {
            self.state.show_help = false;
            return Ok(false);
        }

        if self.state.focused_panel == Panel::Chat && self.handle_chat_key(key) {
            return Ok(false);
        }

        match input::key_to_action(key.code, key.modifiers, self.config.vim_mode) {
            Some(action) => self.handle_action(action),
            None => Ok(false),
        }
    }

    /// Keys typed into the tutor input; returns false for keys it does not consume
    fn handle_chat_key(&mut self, key: KeyEvent) -> bool {
        let chat = &mut self.state.chat;
        match key.code {
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Char(c) => chat.insert_char(c),
            KeyCode::Backspace => chat.delete_char_before(),
            KeyCode::Left => chat.move_cursor_left(),
            KeyCode::Right => chat.move_cursor_right(),
            KeyCode::Up => chat.scroll_up(1),
            KeyCode::Down => chat.scroll_down(1),
            KeyCode::PageUp => chat.scroll_up(10),
            KeyCode::PageDown => chat.scroll_down(10),
            KeyCode::Enter => {
                if let Some(question) = chat.submit_input() {
                    self.spawn_ask(question);
                }
            }
            KeyCode::Esc => self.state.focused_panel = Panel::Content,
            _ => return false,
        }
        true
    }

    fn handle_action(&mut self, action: Action) -> Result<bool> {
        let page = self.state.content.visible_height.max(2);
        match action {
            Action::Quit => return Ok(true),
            Action::Up => match self.state.focused_panel {
                Panel::Sidebar => self.state.sidebar.move_up(),
                _ => self.state.content.scroll_up(1),
            },
            Action::Down => match self.state.focused_panel {
                Panel::Sidebar => self.state.sidebar.move_down(&CURRICULUM),
                _ => self.state.content.scroll_down(1),
            },
            Action::Left => self.focus_left(),
            Action::Right => self.focus_right(),
            Action::Top => match self.state.focused_panel {
                Panel::Sidebar => self.state.sidebar.move_to_top(),
                _ => self.state.content.scroll_offset = 0,
            },
            Action::Bottom => match self.state.focused_panel {
                Panel::Sidebar => self.state.sidebar.move_to_bottom(&CURRICULUM),
                _ => self.state.content.scroll_offset = self.state.content.max_scroll(),
            },
            Action::PageDown => self.state.content.scroll_down(page),
            Action::PageUp => self.state.content.scroll_up(page),
            Action::HalfPageDown => self.state.content.scroll_down(page / 2),
            Action::HalfPageUp => self.state.content.scroll_up(page / 2),
            Action::Select => {
                if self.state.focused_panel == Panel::Sidebar {
                    self.activate_sidebar_item();
                }
            }
            Action::Back => self.state.command_line.clear_message(),
            Action::FocusNext => self.state.focus_next(),
            Action::Command => self.state.command_line.enter_command_mode(),
            Action::Search => self.state.command_line.enter_search_mode(),
            Action::NextMatch => self.jump_match(true),
            Action::PrevMatch => self.jump_match(false),
            Action::ToggleSidebar => self.state.toggle_sidebar(),
            Action::ToggleChat => {
                if !self.state.toggle_chat() {
                    self.state.command_line.set_error("O tutor está disponível apenas nas aulas");
                }
            }
            Action::ToggleTheme => self.set_theme(self.state.theme_mode.toggle())?,
            Action::Yank => self.yank(None)?,
            Action::Help => self.state.show_help = true,
        }
        Ok(false)
    }

    fn focus_left(&mut self) {
        self.state.focused_panel = match self.state.focused_panel {
            Panel::Chat => Panel::Content,
            Panel::Content if self.state.panel_visibility.sidebar => Panel::Sidebar,
            other => other,
        };
    }

    fn focus_right(&mut self) {
        self.state.focused_panel = match self.state.focused_panel {
            Panel::Sidebar => Panel::Content,
            Panel::Content if self.state.chat_visible() => Panel::Chat,
            other => other,
        };
    }

    /// Enter on a sidebar row: chapters fold, topics open
    fn activate_sidebar_item(&mut self) {
        let sidebar = &mut self.state.sidebar;
        match sidebar.item_at(&CURRICULUM, sidebar.selected_index) {
            Some(SidebarItem::Chapter(chapter)) => {
                sidebar.toggle(chapter);
                sidebar.clamp_selection(&CURRICULUM);
            }
            Some(SidebarItem::Topic(chapter, topic)) => {
                if let Some(topic) = CURRICULUM.chapters().get(chapter).and_then(|c| c.topics.get(topic)) {
                    self.select(topic);
                }
            }
            None => {}
        }
    }

    fn jump_match(&mut self, forward: bool) {
        if self.state.search.pattern.is_none() {
            self.state.command_line.set_error("Nenhuma busca ativa");
            return;
        }
        let content = &mut self.state.content;
        let jumped = if forward { content.next_match() } else { content.prev_match() };
        match jumped {
            Some(index) => {
                let total = content.search_matches.len();
                self.state.command_line.set_message(format!("/{} [{}/{}]", self.state.search.query, index + 1, total));
            }
            None => {
                self.state.command_line.set_error(format!("Padrão não encontrado: {}", self.state.search.query))
            }
        }
    }

    fn handle_command_line_key(&mut self, key: KeyEvent) -> Result<bool> {
        let command_line = &mut self.state.command_line;
        match key.code {
            KeyCode::Esc => command_line.exit_input_mode(),
            KeyCode::Enter => {
                let input = std::mem::take(&mut command_line.input);
                let mode = command_line.mode;
                command_line.exit_input_mode();
                match mode {
                    CommandMode::Command => {
                        command_line.add_to_history(input.trim().to_string());
                        return self.execute_command(&input);
                    }
                    CommandMode::Search => self.run_command(command::parse_search(&input))?,
                    CommandMode::Normal => {}
                };
            }
            KeyCode::Backspace => {
                if command_line.input.is_empty() {
                    command_line.exit_input_mode();
                } else {
                    command_line.delete_char();
                }
            }
            KeyCode::Delete => command_line.delete_char_forward(),
            KeyCode::Left => command_line.move_left(),
            KeyCode::Right => command_line.move_right(),
            KeyCode::Home => command_line.move_start(),
            KeyCode::End => command_line.move_end(),
            KeyCode::Up if command_line.mode == CommandMode::Command => command_line.history_up(),
            KeyCode::Down if command_line.mode == CommandMode::Command => command_line.history_down(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                command_line.exit_input_mode()
            }
            KeyCode::Char(c) => command_line.insert_char(c),
            _ => {}
        }
        Ok(false)
    }

    /// Parse and run a `:` command; returns true if should exit
    fn execute_command(&mut self, input: &str) -> Result<bool> {
        match parse_command(input) {
            ParseResult::Ok(Command::Quit) => return Ok(true),
            ParseResult::Ok(cmd) => self.run_command(cmd)?,
            ParseResult::UnknownCommand(cmd) => {
                self.state.command_line.set_error(format!("Comando desconhecido: {}", cmd))
            }
            ParseResult::MissingArgument(cmd) => {
                self.state.command_line.set_error(format!("O comando :{} precisa de um argumento", cmd))
            }
            ParseResult::InvalidArgument { command, argument } => self
                .state
                .command_line
                .set_error(format!("Argumento inválido para :{}: {}", command, argument)),
        }
        Ok(false)
    }

    fn run_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Quit | Command::Nop => self.state.command_line.clear_message(),
            Command::Help => self.state.show_help = true,
            Command::Goto(id) => match CURRICULUM.find_topic(&id) {
                Some(topic) => self.select(topic),
                None => self.state.command_line.set_error(format!("Tópico não encontrado: {}", id)),
            },
            Command::Theme(mode) => {
                let mode = mode.unwrap_or_else(|| self.state.theme_mode.toggle());
                self.set_theme(mode)?;
            }
            Command::Ask(question) => self.ask_from_command_line(&question),
            Command::Key(key) => self.store_api_key(&key)?,
            Command::Model(None) => {
                let model = self.tutor.model();
                self.state.command_line.set_message(format!("Modelo: {} ({})", model.display_name(), model.model_id()));
            }
            Command::Model(Some(name)) => match ClaudeModel::parse(&name) {
                Some(model) => {
                    self.tutor = Arc::new(self.tutor.as_ref().clone().with_model(model));
                    self.state.command_line.set_message(format!("Modelo: {}", model.display_name()));
                }
                None => self
                    .state
                    .command_line
                    .set_error(format!("Modelo desconhecido: {} (use haiku, sonnet ou opus)", name)),
            },
            Command::Yank(index) => self.yank(index)?,
            Command::Search(query) => {
                self.state.search.set_query(&query).context("Invalid search pattern")?;
                self.state.content.current_match = None;
                if self.state.search.pattern.is_none() {
                    self.state.content.search_matches.clear();
                    self.state.command_line.clear_message();
                }
            }
        }
        Ok(())
    }

    fn ask_from_command_line(&mut self, question: &str) {
        if !self.state.navigator.chat_available() {
            self.state.command_line.set_error("O tutor está disponível apenas nas aulas");
            return;
        }
        self.state.panel_visibility.chat = true;
        self.state.focused_panel = Panel::Chat;
        match self.state.chat.submit(question) {
            Some(question) => self.spawn_ask(question),
            None => self.state.command_line.set_error("Aguarde a resposta do tutor"),
        }
    }

    fn store_api_key(&mut self, key: &str) -> Result<()> {
        if !ApiKeyManager::validate_key_format(key) {
            self.state.command_line.set_error("Formato de chave inválido (esperado sk-ant-...)");
            return Ok(());
        }
        let model = self.tutor.model();
        self.tutor = Arc::new(ClaudeClient::new(key)?.with_model(model));
        match ApiKeyManager::set_api_key(key) {
            Ok(()) => self
                .state
                .command_line
                .set_message(format!("Chave salva: {}", ApiKeyManager::mask_key(key))),
            Err(err) => {
                tracing::warn!(error = %err, "Could not store API key in keyring");
                self.state.command_line.set_message(format!(
                    "Chave usada apenas nesta sessão: {}",
                    ApiKeyManager::mask_key(key)
                ));
            }
        }
        Ok(())
    }

    /// Switch theme and persist the choice
    fn set_theme(&mut self, mode: ThemeMode) -> Result<()> {
        self.state.theme_mode = mode;
        self.config.theme = Some(mode);
        let label = match mode {
            ThemeMode::Light => "claro",
            ThemeMode::Dark => "escuro",
        };
        self.state.command_line.set_message(format!("Tema {}", label));
        self.config.save().context("Failed to save theme preference")
    }

    /// Copy a lesson's code block, or a special page's link, to the clipboard
    fn yank(&mut self, index: Option<usize>) -> Result<()> {
        let clip = match self.state.clip(index) {
            Ok(clip) => clip,
            Err(message) => {
                self.state.command_line.set_error(message);
                return Ok(());
            }
        };

        let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
        match clip {
            Clip::Link(link) => {
                clipboard.set_text(link).context("Failed to copy link")?;
                self.state.command_line.set_message(format!("Link copiado: {}", link));
            }
            Clip::Code { number, text } => {
                clipboard.set_text(text).context("Failed to copy code")?;
                self.state.command_line.set_message(format!("Exemplo {} copiado", number));
            }
        }
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown.cancel();
        let _ = self.restore_terminal();
    }
}
