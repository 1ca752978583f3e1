//! Evaluation and bibliography pages

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::content::{parse_inline, wrap_spans};
use crate::curriculum::{BIBLIOGRAPHY, EVALUATION, Reference, SpecialPage};
use crate::theme::Theme;

const BIBLIOGRAPHY_HEADING: &str = "Bibliografia Recomendada";
const BIBLIOGRAPHY_SUMMARY: &str =
    "Coleção de recursos para aprofundar seus conhecimentos em Python e Matemática.";

/// Rendered lines for a dedicated page
pub fn lines(page: SpecialPage, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    match page {
        SpecialPage::Evaluation => evaluation_lines(theme, width),
        SpecialPage::Bibliography => bibliography_lines(theme, width),
    }
}

fn heading(text: &str, summary: &str, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(""),
    ];
    lines.extend(wrap_spans(vec![Span::styled(summary.to_string(), Style::default().fg(theme.fg_secondary))], width));
    lines.push(Line::from(""));
    lines
}

fn evaluation_lines(theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = heading(EVALUATION.heading, EVALUATION.summary, theme, width);
    let border = Style::default().fg(theme.error);
    let inner_width = width.saturating_sub(4);

    lines.push(Line::from(vec![
        Span::styled("┌─ ", border),
        Span::styled(EVALUATION.sheet_title, Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD)),
        Span::styled(" ─", border),
    ]));
    let description =
        wrap_spans(vec![Span::styled(EVALUATION.sheet_description, Style::default().fg(theme.fg_secondary))], inner_width);
    for line in description {
        let mut spans = vec![Span::styled("│ ", border)];
        spans.extend(line.spans);
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled("│", border)));
    lines.push(Line::from(vec![
        Span::styled("│ ", border),
        Span::styled("PDF ", Style::default().fg(theme.bg_primary).bg(theme.error).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(
            EVALUATION.sheet_href,
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::UNDERLINED),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("│ ", border),
        Span::styled("y copia o link", Style::default().fg(theme.fg_muted)),
    ]));
    lines.push(Line::from(Span::styled("└──────", border)));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled("● ", Style::default().fg(theme.error)),
        Span::styled(
            "Instruções Importantes",
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(""));
    for instruction in EVALUATION.instructions {
        let spans = parse_inline(instruction, Style::default().fg(theme.fg_primary), theme);
        for (i, line) in wrap_spans(spans, width.saturating_sub(4)).into_iter().enumerate() {
            let prefix = if i == 0 {
                Span::styled("  • ", Style::default().fg(theme.accent_secondary))
            } else {
                Span::raw("    ")
            };
            let mut spans = vec![prefix];
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }
    }
    lines
}

fn bibliography_lines(theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = heading(BIBLIOGRAPHY_HEADING, BIBLIOGRAPHY_SUMMARY, theme, width);
    for (i, reference) in BIBLIOGRAPHY.iter().enumerate() {
        lines.extend(reference_lines(i + 1, reference, theme, width));
    }
    lines
}

/// One numbered entry; the number is what `:yank` takes
fn reference_lines(number: usize, reference: &Reference, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let indent = "     ";
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" [{}] ", number), Style::default().fg(theme.accent_secondary)),
            Span::styled(reference.title, Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!(" {} ", reference.kind.label()),
                Style::default().fg(theme.fg_muted).bg(theme.bg_tertiary),
            ),
        ]),
        Line::from(vec![
            Span::raw(indent),
            Span::styled(reference.author, Style::default().fg(theme.accent_primary)),
        ]),
    ];

    let description = vec![Span::styled(reference.description, Style::default().fg(theme.fg_secondary))];
    for line in wrap_spans(description, width.saturating_sub(indent.len())) {
        let mut spans = vec![Span::raw(indent)];
        spans.extend(line.spans);
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(vec![
        Span::raw(indent),
        Span::styled(reference.href, Style::default().fg(theme.info).add_modifier(Modifier::UNDERLINED)),
    ]));
    lines.push(Line::from(vec![
        Span::raw(indent),
        Span::styled(format!(":yank {} copia o link", number), Style::default().fg(theme.fg_muted)),
    ]));
    lines.push(Line::from(""));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn evaluation_shows_sheet_link_and_instructions() {
        let rendered = text(&lines(SpecialPage::Evaluation, &Theme::default(), 200));
        assert!(rendered.contains(EVALUATION.heading));
        assert!(rendered.contains(EVALUATION.sheet_href));
        assert!(rendered.contains("2 Parcelares"));
        // Bold markers are rendered, not shown
        assert!(!rendered.contains("**"));
    }

    #[test]
    fn bibliography_numbers_every_reference() {
        let rendered = text(&lines(SpecialPage::Bibliography, &Theme::default(), 200));
        for (i, reference) in BIBLIOGRAPHY.iter().enumerate() {
            assert!(rendered.contains(&format!("[{}] {}", i + 1, reference.title)));
            assert!(rendered.contains(reference.href));
        }
        assert!(rendered.contains("PDF"));
        assert!(rendered.contains("Website"));
    }
}
