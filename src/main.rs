use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pymath::app::Overrides;
use pymath::curriculum::{CURRICULUM, Curriculum, EVALUATION, SpecialPage, resources::bibliography_markdown};
use pymath::lesson::{ContentResolver, parse_lesson};
use pymath::theme::ThemeMode;
use pymath::tutor::{ApiKeyManager, ClaudeClient, ask};
use pymath::{App, Config};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pymath")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Color theme for this session (light or dark)
    #[arg(long, global = true)]
    theme: Option<ThemeMode>,

    /// Directory of <topic-id>.md files that override the built-in lessons
    #[arg(long, global = true)]
    lessons: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the course outline
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a lesson's markdown
    Show {
        /// Topic id, as printed by `list`
        id: String,
        /// Print only the code examples
        #[arg(long)]
        code: bool,
    },
    /// Ask the tutor one question
    Ask {
        /// Topic whose lesson is sent as context
        #[arg(short, long)]
        topic: Option<String>,
        /// The question
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Store the Claude API key, or show the current key status
    Auth {
        /// API key to store in the system keyring
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.is_none());

    let config = Config::load()?;
    let lessons_dir = cli.lessons.clone().or_else(|| config.lessons_dir.clone());

    match cli.command {
        Some(Commands::List { json }) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&CURRICULUM)?);
            } else {
                print!("{}", outline(&CURRICULUM));
            }
        }
        Some(Commands::Show { id, code }) => {
            let text = page_text(&resolver(lessons_dir), &id)?;
            if code {
                print!("{}", code_listing(&text));
            } else {
                print!("{}", text);
            }
        }
        Some(Commands::Ask { topic, question }) => {
            ask_once(&config, lessons_dir, topic.as_deref(), &question.join(" ")).await?;
        }
        Some(Commands::Auth { key: Some(key) }) => {
            ApiKeyManager::set_api_key(&key).context("Failed to store API key")?;
            println!("API key stored: {}", ApiKeyManager::mask_key(key.trim()));
        }
        Some(Commands::Auth { key: None }) => match ApiKeyManager::resolve() {
            Ok((key, source)) => println!("API key: {} ({:?})", ApiKeyManager::mask_key(&key), source),
            Err(err) => println!("No API key available ({}). Run `pymath auth <key>`.", err),
        },
        None => {
            let overrides = Overrides { theme: cli.theme, lessons_dir: cli.lessons };
            let mut app = App::new(config, overrides)?;
            app.run().await?;
        }
    }

    Ok(())
}

/// The TUI owns the terminal, so it logs to a file; subcommands log to stderr
fn init_logging(tui: bool) {
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "pymath=info".into());

    let log_file = if tui {
        Config::log_path().ok().and_then(|path| {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).ok()?;
            }
            std::fs::OpenOptions::new().create(true).append(true).open(path).ok()
        })
    } else {
        None
    };

    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false).with_ansi(false).with_writer(Mutex::new(file)))
            .init(),
        // Without a log file the TUI stays silent rather than drawing over the screen
        None if tui => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
            .init(),
        None => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
    }
}

fn resolver(lessons_dir: Option<PathBuf>) -> ContentResolver {
    match lessons_dir {
        Some(dir) => ContentResolver::with_directory(dir),
        None => ContentResolver::embedded(),
    }
}

/// Chapters and their topics, one per line
fn outline(curriculum: &Curriculum) -> String {
    let mut out = String::new();
    for chapter in curriculum.chapters() {
        out.push_str(chapter.title);
        out.push('\n');
        for topic in chapter.topics {
            out.push_str(&format!("  {:<22} [{:<6}] {}\n", topic.id, topic.difficulty.label(), topic.title));
        }
    }
    out.push_str(&format!("\n{} tópicos\n", curriculum.topic_count()));
    out
}

/// Markdown for a topic id; special pages print their own text
fn page_text(resolver: &ContentResolver, id: &str) -> Result<String> {
    let Some(topic) = CURRICULUM.find_topic(id) else {
        bail!("Unknown topic id: {} (see `pymath list`)", id);
    };
    Ok(match topic.special_page() {
        Some(SpecialPage::Evaluation) => EVALUATION.to_markdown(),
        Some(SpecialPage::Bibliography) => bibliography_markdown(),
        None => resolver.resolve(topic),
    })
}

/// The code blocks of a lesson, separated by blank lines, under its title
fn code_listing(markdown: &str) -> String {
    let lesson = parse_lesson(markdown);
    let mut out = String::new();
    if let Some(title) = lesson.title() {
        out.push_str(&format!("# {}\n\n", title));
    }
    for block in lesson.code_blocks() {
        out.push_str(&block.code);
        out.push_str("\n\n");
    }
    out
}

/// Stream one tutor reply to stdout
async fn ask_once(config: &Config, lessons_dir: Option<PathBuf>, topic: Option<&str>, question: &str) -> Result<()> {
    let context = match topic {
        Some(id) => page_text(&resolver(lessons_dir), id)?,
        None => String::new(),
    };
    let tutor = ClaudeClient::from_stored_key().context("Failed to create tutor client")?.with_model(config.model);

    let (delta_tx, mut delta_rx) = mpsc::unbounded_channel::<String>();
    let forward = async {
        let mut streamed = String::new();
        let mut stdout = std::io::stdout();
        while let Some(text) = delta_rx.recv().await {
            print!("{}", text);
            let _ = stdout.flush();
            streamed.push_str(&text);
        }
        streamed
    };
    let reply = ask(&tutor, question, &context, config.context_chars, delta_tx, CancellationToken::new());
    let (reply, streamed) = tokio::join!(reply, forward);

    // Fallback and empty replies never arrive as deltas
    if streamed != reply.text {
        if !streamed.is_empty() {
            println!();
        }
        print!("{}", reply.text);
    }
    println!();

    if let Some(hint) = reply.error.as_ref().and_then(|e| e.hint()) {
        eprintln!("{}", hint);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_lists_every_topic() {
        let text = outline(&CURRICULUM);
        for topic in CURRICULUM.topics() {
            assert!(text.contains(topic.id));
        }
    }

    #[test]
    fn special_pages_print_their_text() {
        let resolver = ContentResolver::embedded();
        let text = page_text(&resolver, SpecialPage::Bibliography.topic_id()).unwrap();
        assert!(text.starts_with("# Bibliografia Recomendada"));
        let text = page_text(&resolver, SpecialPage::Evaluation.topic_id()).unwrap();
        assert!(text.contains(EVALUATION.sheet_href));
    }

    #[test]
    fn code_listing_keeps_only_code() {
        let listing = code_listing("# Listas\n\nTexto.\n\n```python\nx = [1, 2]\n```\n\n```python\nprint(x)\n```\n");
        assert_eq!(listing, "# Listas\n\nx = [1, 2]\n\nprint(x)\n\n");
    }

    #[test]
    fn unknown_topic_is_an_error() {
        assert!(page_text(&ContentResolver::embedded(), "m99-nope").is_err());
    }
}
