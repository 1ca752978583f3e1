//! Syntax highlighting using syntect
//!
//! Code blocks are highlighted as a whole so multi-line strings and docstrings
//! keep their scope. The syntect theme follows the active [`ThemeMode`].

use once_cell::sync::Lazy;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use syntect::highlighting::{
    FontStyle, HighlightState, Highlighter, RangedHighlightIterator, ThemeSet,
};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};

use crate::theme::{Theme, ThemeMode};

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Lessons are Python-first, so bare or unknown fences fall back to Python keywords
const PYTHON_KEYWORDS: &[&str] = &[
    "def", "class", "if", "elif", "else", "for", "while", "try", "except", "finally", "with",
    "as", "import", "from", "return", "yield", "raise", "pass", "break", "continue", "lambda",
    "and", "or", "not", "in", "is", "None", "True", "False", "async", "await", "global",
    "nonlocal", "match", "case", "del", "assert",
];

const PYTHON_BUILTINS: &[&str] = &[
    "int", "float", "complex", "str", "bool", "list", "tuple", "dict", "set", "frozenset",
    "bytes", "print", "len", "range", "enumerate", "zip", "map", "filter", "sum", "min", "max",
    "abs", "round", "type", "isinstance", "open", "input", "sorted", "reversed", "any", "all",
];

fn syntect_theme_name(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Dark => "base16-ocean.dark",
        ThemeMode::Light => "InspiredGitHub",
    }
}

/// Map common language names/aliases to syntect syntax names
fn normalize_language(lang: &str) -> &str {
    let base_lang = lang.split(',').next().unwrap_or(lang).trim();

    match base_lang.to_lowercase().as_str() {
        "py" | "python" | "python3" | "py3" | "pycon" => "Python",
        "sh" | "bash" | "shell" | "zsh" | "console" => "Bourne Again Shell (bash)",
        "js" | "javascript" => "JavaScript",
        "c" => "C",
        "cpp" | "c++" => "C++",
        "java" => "Java",
        "rs" | "rust" => "Rust",
        "json" => "JSON",
        "yaml" | "yml" => "YAML",
        "toml" => "TOML",
        "csv" | "txt" | "text" | "plaintext" => "Plain Text",
        "md" | "markdown" => "Markdown",
        "sql" => "SQL",
        "latex" | "tex" => "LaTeX",
        _ => base_lang,
    }
}

fn find_syntax(language: Option<&str>) -> Option<&'static SyntaxReference> {
    let lang = language?;
    let normalized = normalize_language(lang);

    SYNTAX_SET
        .find_syntax_by_name(normalized)
        .or_else(|| SYNTAX_SET.find_syntax_by_extension(normalized.to_lowercase().as_str()))
        .or_else(|| SYNTAX_SET.find_syntax_by_extension(lang))
}

fn syntect_to_ratatui_color(color: syntect::highlighting::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Highlight a whole code block, one span list per line
pub fn highlight_code(code: &str, language: Option<&str>, theme: &Theme) -> Vec<Vec<Span<'static>>> {
    let syntax = find_syntax(language);
    let syntect_theme = THEME_SET.themes.get(syntect_theme_name(theme.mode));

    let (Some(syntax), Some(syntect_theme)) = (syntax, syntect_theme) else {
        return code.lines().map(|line| highlight_basic(line, theme)).collect();
    };

    let highlighter = Highlighter::new(syntect_theme);
    let mut highlight_state = HighlightState::new(&highlighter, ScopeStack::new());
    let mut parse_state = ParseState::new(syntax);

    code.lines()
        .map(|line| {
            // The newline syntaxes expect a trailing '\n' to close line-scoped rules
            let with_newline = format!("{}\n", line);
            let ops = match parse_state.parse_line(&with_newline, &SYNTAX_SET) {
                Ok(ops) => ops,
                Err(err) => {
                    tracing::debug!(error = %err, "syntect parse failed, using basic highlighting");
                    return highlight_basic(line, theme);
                }
            };
            let spans: Vec<_> =
                RangedHighlightIterator::new(&mut highlight_state, &ops, &with_newline, &highlighter)
                    .filter_map(|(style, text, _range)| {
                        let text = text.trim_end_matches('\n');
                        (!text.is_empty()).then(|| Span::styled(text.to_string(), convert_style(style, theme)))
                    })
                    .collect();
            if spans.is_empty() { vec![Span::styled(String::new(), code_style(theme))] } else { spans }
        })
        .collect()
}

fn convert_style(style: syntect::highlighting::Style, theme: &Theme) -> Style {
    let mut converted = code_style(theme).fg(syntect_to_ratatui_color(style.foreground));
    if style.font_style.contains(FontStyle::BOLD) {
        converted = converted.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        converted = converted.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        converted = converted.add_modifier(Modifier::UNDERLINED);
    }
    converted
}

fn code_style(theme: &Theme) -> Style {
    Style::default().fg(theme.fg_primary).bg(theme.bg_secondary)
}

/// Keyword-based highlighting with the app palette
fn highlight_basic(line: &str, theme: &Theme) -> Vec<Span<'static>> {
    let base_style = code_style(theme);
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                flush_word(&mut current, &mut spans, theme);
                let mut literal = String::from(c);
                let mut escaped = false;
                for ch in chars.by_ref() {
                    literal.push(ch);
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == c {
                        break;
                    }
                }
                spans.push(Span::styled(literal, base_style.fg(theme.syntax_string)));
            }
            '#' => {
                flush_word(&mut current, &mut spans, theme);
                let comment: String = std::iter::once(c).chain(chars.by_ref()).collect();
                spans.push(Span::styled(comment, base_style.fg(theme.syntax_comment)));
            }
            '0'..='9' if current.is_empty() => {
                let mut number = String::from(c);
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_alphanumeric() || ch == '.' || ch == '_' {
                        number.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                spans.push(Span::styled(number, base_style.fg(theme.syntax_number)));
            }
            c if c.is_alphanumeric() || c == '_' => current.push(c),
            _ => {
                flush_word(&mut current, &mut spans, theme);
                let style = if "+-*/%=<>!&|^~@:;,.()[]{}".contains(c) {
                    base_style.fg(theme.syntax_operator)
                } else {
                    base_style
                };
                spans.push(Span::styled(c.to_string(), style));
            }
        }
    }
    flush_word(&mut current, &mut spans, theme);

    if spans.is_empty() {
        spans.push(Span::styled(line.to_string(), base_style));
    }
    spans
}

fn flush_word(word: &mut String, spans: &mut Vec<Span<'static>>, theme: &Theme) {
    if word.is_empty() {
        return;
    }
    let base = code_style(theme);
    let style = if PYTHON_KEYWORDS.contains(&word.as_str()) {
        base.fg(theme.syntax_keyword).add_modifier(Modifier::BOLD)
    } else if PYTHON_BUILTINS.contains(&word.as_str()) {
        base.fg(theme.syntax_function)
    } else if word.starts_with(char::is_uppercase) && word.len() > 1 {
        base.fg(theme.syntax_type)
    } else {
        base
    };
    spans.push(Span::styled(std::mem::take(word), style));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &[Span<'_>]) -> String {
        line.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn normalize_python() {
        assert_eq!(normalize_language("python"), "Python");
        assert_eq!(normalize_language("py"), "Python");
        assert_eq!(normalize_language("python3"), "Python");
    }

    #[test]
    fn normalize_shell() {
        assert_eq!(normalize_language("bash"), "Bourne Again Shell (bash)");
        assert_eq!(normalize_language("console"), "Bourne Again Shell (bash)");
    }

    #[test]
    fn find_python_syntax() {
        assert!(find_syntax(Some("python")).is_some());
        assert!(find_syntax(None).is_none());
    }

    #[test]
    fn highlight_preserves_text_per_line() {
        let theme = Theme::default();
        let code = "def f(x):\n    return x ** 2\n\nprint(f(3))";
        let lines = highlight_code(code, Some("python"), &theme);
        assert_eq!(lines.len(), 4);
        assert_eq!(text_of(&lines[0]), "def f(x):");
        assert_eq!(text_of(&lines[1]), "    return x ** 2");
        assert_eq!(text_of(&lines[2]), "");
        assert_eq!(text_of(&lines[3]), "print(f(3))");
    }

    #[test]
    fn light_and_dark_differ() {
        let code = "import math";
        let dark = highlight_code(code, Some("python"), &Theme::for_mode(ThemeMode::Dark));
        let light = highlight_code(code, Some("python"), &Theme::for_mode(ThemeMode::Light));
        assert_ne!(dark[0][0].style, light[0][0].style);
    }

    #[test]
    fn unknown_language_uses_basic() {
        let theme = Theme::default();
        let lines = highlight_code("x = 1 # um", Some("nonexistent_lang"), &theme);
        assert_eq!(text_of(&lines[0]), "x = 1 # um");
        assert!(lines[0].iter().any(|s| s.style.fg == Some(theme.syntax_comment)));
    }

    #[test]
    fn basic_highlight_keywords() {
        let theme = Theme::default();
        let spans = highlight_basic("def main(): pass", &theme);
        assert!(spans.iter().any(|s| s.content == "def" && s.style.fg == Some(theme.syntax_keyword)));
    }

    #[test]
    fn basic_highlight_string() {
        let theme = Theme::default();
        let spans = highlight_basic("s = \"olá\"", &theme);
        assert!(spans.iter().any(|s| s.content == "\"olá\"" && s.style.fg == Some(theme.syntax_string)));
    }
}
