//! Command parsing for the command line

use crate::theme::ThemeMode;

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Quit the application: :q or :quit
    Quit,
    /// Show help: :help or :h
    Help,
    /// Jump to a topic by id: :goto <topic-id>
    Goto(String),
    /// Switch theme, toggling when no mode is given: :theme [light|dark]
    Theme(Option<ThemeMode>),
    /// Ask the tutor about the displayed lesson: :ask <question>
    Ask(String),
    /// Store the API key: :key <api-key>
    Key(String),
    /// Show or set the tutor model: :model [haiku|sonnet|opus]
    Model(Option<String>),
    /// Copy the n-th code example, or the page / n-th bibliography link: :yank [n]
    Yank(Option<usize>),
    /// Search content: /pattern
    Search(String),
    /// Clear message: (empty command)
    Nop,
}

/// Result of parsing a command
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
    /// Argument present but not understood
    InvalidArgument { command: String, argument: String },
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    match cmd.to_lowercase().as_str() {
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        "goto" | "g" => required("goto", args, |a| Command::Goto(a.to_string())),
        "theme" | "tema" => {
            if args.is_empty() {
                ParseResult::Ok(Command::Theme(None))
            } else {
                match args.parse::<ThemeMode>() {
                    Ok(mode) => ParseResult::Ok(Command::Theme(Some(mode))),
                    Err(_) => invalid("theme", args),
                }
            }
        }
        "ask" | "a" => required("ask", args, |a| Command::Ask(a.to_string())),
        "key" | "k" => required("key", args, |a| Command::Key(a.to_string())),
        "model" | "m" => ParseResult::Ok(Command::Model((!args.is_empty()).then(|| args.to_string()))),
        "yank" | "y" => {
            if args.is_empty() {
                ParseResult::Ok(Command::Yank(None))
            } else {
                match args.parse::<usize>() {
                    Ok(n) if n > 0 => ParseResult::Ok(Command::Yank(Some(n))),
                    _ => invalid("yank", args),
                }
            }
        }
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}

fn required(command: &str, args: &str, build: impl FnOnce(&str) -> Command) -> ParseResult {
    if args.is_empty() {
        ParseResult::MissingArgument(command.to_string())
    } else {
        ParseResult::Ok(build(args))
    }
}

fn invalid(command: &str, argument: &str) -> ParseResult {
    ParseResult::InvalidArgument { command: command.to_string(), argument: argument.to_string() }
}

/// Parse a search query (without the leading /)
pub fn parse_search(input: &str) -> Command {
    Command::Search(input.to_string())
}
