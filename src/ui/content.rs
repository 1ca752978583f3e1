//! Lesson pane: markdown blocks, loading and welcome views, search highlighting

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{math, special};
use crate::app::navigation::View;
use crate::app::state::AppState;
use crate::curriculum::{CURRICULUM, Topic};
use crate::lesson::model::{Alignment, CodeBlock, ContentBlock, List, Table};
use crate::syntax;
use crate::theme::Theme;

const SOURCE_BADGE: &str = " Baseado em: El Libro de Python ";
const LOADING_TEXT: &str = "Carregando material didático...";

/// Draw the content panel for whatever the navigator is showing
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme, focused: bool) {
    let border_color = if focused { theme.border_focused } else { theme.border };

    let title = match state.navigator.view() {
        View::Idle => " PyMath ".to_string(),
        View::Loading { topic, .. } | View::Displaying { topic, .. } | View::Special { topic, .. } => {
            format!(" {} ", topic.title)
        }
    };

    let mut block = Block::default()
        .title(title)
        .title(Line::from(Span::styled(SOURCE_BADGE, Style::default().fg(theme.fg_muted))).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary));

    if let (View::Displaying { .. }, Some(lesson)) = (state.navigator.view(), state.lesson.as_ref()) {
        let minutes = lesson.reading_time_minutes();
        block = block.title_bottom(
            Line::from(Span::styled(format!(" ~{} min de leitura ", minutes), Style::default().fg(theme.fg_muted)))
                .right_aligned(),
        );
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Reserve 1 column for scrollbar
    let content_width = inner.width.saturating_sub(2) as usize;
    let content_area =
        Rect { x: inner.x, y: inner.y, width: inner.width.saturating_sub(1), height: inner.height };
    let scrollbar_x = inner.x + inner.width.saturating_sub(1);

    let mut lines = page_lines(state, theme, content_width);

    state.content.total_lines = lines.len();
    state.content.visible_height = inner.height as usize;
    apply_search(state, &mut lines, theme);
    state.content.clamp_scroll();

    let total_lines = lines.len();
    let scroll_offset = state.content.scroll_offset;
    let visible_lines: Vec<Line> = lines.into_iter().skip(scroll_offset).take(inner.height as usize).collect();

    frame.render_widget(Paragraph::new(visible_lines), content_area);

    if state.navigator.is_loading() || matches!(state.navigator.view(), View::Idle) {
        return;
    }
    draw_scrollbar(frame, scrollbar_x, inner.y, inner.height, scroll_offset, total_lines, theme);
}

/// All lines of the current page, before scrolling
fn page_lines(state: &AppState, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    match state.navigator.view() {
        View::Idle => welcome_lines(theme),
        View::Loading { topic, .. } => {
            let mut lines = breadcrumb(topic, theme);
            lines.extend(loading_lines(theme));
            lines
        }
        View::Displaying { topic, .. } => {
            let mut lines = breadcrumb(topic, theme);
            if let Some(lesson) = &state.lesson {
                lines.extend(render_content_blocks(&lesson.blocks, theme, width));
            }
            lines
        }
        View::Special { page, .. } => special::lines(*page, theme, width),
    }
}

/// Chapter and topic above the lesson
fn breadcrumb(topic: &Topic, theme: &Theme) -> Vec<Line<'static>> {
    let chapter = CURRICULUM.chapter_index_of(topic.id).map(|i| CURRICULUM.chapters()[i].title).unwrap_or("");
    vec![
        Line::from(vec![
            Span::styled("Capítulo Atual  ", Style::default().fg(theme.fg_muted)),
            Span::styled(chapter.to_string(), Style::default().fg(theme.fg_secondary)),
            Span::styled(" › ", Style::default().fg(theme.fg_muted)),
            Span::styled(
                topic.title.to_string(),
                Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ]
}

fn loading_lines(theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ⟳ ", Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)),
            Span::styled(LOADING_TEXT, Style::default().fg(theme.fg_muted)),
        ]),
    ]
}

/// Shown before anything is selected
fn welcome_lines(theme: &Theme) -> Vec<Line<'static>> {
    let muted = Style::default().fg(theme.fg_muted);
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "Bem-vindo ao PyMath",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Programação de Computadores para Matemáticos",
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(""),
        Line::from(Span::styled("Atalhos:", Style::default().fg(theme.fg_primary))),
        Line::from(""),
        Line::from(Span::styled("  j/k      Navegar no índice", muted)),
        Line::from(Span::styled("  Enter    Abrir aula", muted)),
        Line::from(Span::styled("  c        Tutor virtual", muted)),
        Line::from(Span::styled("  /        Buscar na aula", muted)),
        Line::from(Span::styled("  ?        Ajuda", muted)),
        Line::from(Span::styled("  q        Sair", muted)),
    ]
}

/// Recompute search hits over `lines`, take a pending jump, and highlight hits
fn apply_search(state: &mut AppState, lines: &mut [Line<'static>], theme: &Theme) {
    let content = &mut state.content;
    let search = &mut state.search;

    content.search_matches = if search.pattern.is_some() {
        lines.iter().enumerate().filter(|(_, line)| search.is_match(&line_text(line))).map(|(i, _)| i).collect()
    } else {
        Vec::new()
    };
    if content.current_match.is_some_and(|i| i >= content.search_matches.len()) {
        content.current_match = None;
    }

    if search.jump_pending {
        search.jump_pending = false;
        content.current_match = None;
        match content.next_match() {
            Some(index) => state.command_line.set_message(format!(
                "/{} [{}/{}]",
                search.query,
                index + 1,
                content.search_matches.len()
            )),
            None => state.command_line.set_error(format!("Padrão não encontrado: {}", search.query)),
        }
    }

    let current_line = content.current_match.and_then(|i| content.search_matches.get(i)).copied();
    for &row in &content.search_matches {
        let bg = if Some(row) == current_line { theme.selection } else { theme.bg_tertiary };
        if let Some(line) = lines.get_mut(row) {
            for span in line.spans.iter_mut() {
                span.style = span.style.bg(bg);
            }
        }
    }
}

/// Plain text of a rendered line
fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

/// Draw a scrollbar indicator
fn draw_scrollbar(
    frame: &mut Frame,
    x: u16,
    y: u16,
    height: u16,
    scroll_offset: usize,
    total_lines: usize,
    theme: &Theme,
) {
    if total_lines == 0 || height == 0 {
        return;
    }

    let height = height as usize;

    let visible_ratio = (height as f64 / total_lines as f64).min(1.0);
    let thumb_height = ((height as f64 * visible_ratio).ceil() as usize).max(1);

    let top = thumb_top(height, thumb_height, scroll_offset, total_lines);

    for i in 0..height {
        let on_thumb = i >= top && i < top + thumb_height;
        let (ch, style) = if on_thumb {
            ("█", Style::default().fg(theme.accent_secondary))
        } else {
            ("░", Style::default().fg(theme.bg_tertiary))
        };

        frame.render_widget(
            Paragraph::new(ch).style(style),
            Rect { x, y: y.saturating_add(i as u16), width: 1, height: 1 },
        );
    }
}

/// First row of the scrollbar thumb; the thumb never leaves the track
fn thumb_top(height: usize, thumb_height: usize, scroll_offset: usize, total_lines: usize) -> usize {
    let max_scroll = total_lines.saturating_sub(height / 2);
    let scroll_ratio = if total_lines <= height || max_scroll == 0 {
        0.0
    } else {
        (scroll_offset as f64 / max_scroll as f64).min(1.0)
    };
    (height.saturating_sub(thumb_height) as f64 * scroll_ratio).round() as usize
}

/// Render content blocks to styled lines
pub fn render_content_blocks(blocks: &[ContentBlock], theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut code_number = 0;

    for block in blocks {
        match block {
            ContentBlock::Heading { level, text } => render_heading(&mut lines, *level, text, theme),
            ContentBlock::Paragraph(text) => render_paragraph(&mut lines, text, theme, width),
            ContentBlock::Code(code) => {
                code_number += 1;
                render_code_block(&mut lines, code, code_number, theme);
            }
            ContentBlock::List(list) => render_list(&mut lines, list, theme, width),
            ContentBlock::Blockquote(text) => render_blockquote(&mut lines, text, theme, width),
            ContentBlock::HorizontalRule => render_horizontal_rule(&mut lines, theme, width),
            ContentBlock::Image { alt, .. } => render_image(&mut lines, alt, theme),
            ContentBlock::Table(table) => render_table(&mut lines, table, theme),
            ContentBlock::Math(expr) => render_math(&mut lines, expr, theme),
        }
    }

    lines
}

fn render_heading(lines: &mut Vec<Line<'static>>, level: u8, text: &str, theme: &Theme) {
    let (base_style, prefix) = match level {
        1 => (Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD | Modifier::UNDERLINED), ""),
        2 => (Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD), ""),
        3 => (Style::default().fg(theme.info).add_modifier(Modifier::BOLD), "  "),
        4 => (Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD), "    "),
        _ => (Style::default().fg(theme.fg_muted), "      "),
    };

    let mut spans: Vec<Span<'static>> = Vec::new();
    if !prefix.is_empty() {
        spans.push(Span::styled(prefix, base_style));
    }
    spans.extend(parse_inline(text, base_style, theme));

    lines.push(Line::from(""));
    lines.push(Line::from(spans));
    if level <= 2 {
        lines.push(Line::from(""));
    }
}

fn render_paragraph(lines: &mut Vec<Line<'static>>, text: &str, theme: &Theme, width: usize) {
    let spans = parse_inline(text, Style::default().fg(theme.fg_primary), theme);
    lines.extend(wrap_spans(spans, width.saturating_sub(2)));
    lines.push(Line::from(""));
}

/// Parse the inline markup left in block text into styled spans
///
/// Delimiters follow the flanking rule: an opener must be followed by a
/// non-space and a closer preceded by one. Unmatched markers stay literal.
pub fn parse_inline(text: &str, base: Style, theme: &Theme) -> Vec<Span<'static>> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let consumed = match c {
            '`' => find_char(&chars, i + 1, '`').map(|end| {
                let code: String = chars[i + 1..end].iter().collect();
                (vec![Span::styled(code, Style::default().fg(theme.syntax_string).bg(theme.bg_secondary))], end + 1)
            }),
            '$' => inline_math(&chars, i, theme),
            '*' if chars.get(i + 1) == Some(&'*') => find_delimited(&chars, i, "**").map(|(inner, next)| {
                (parse_inline(&inner, base.add_modifier(Modifier::BOLD), theme), next)
            }),
            '*' => find_delimited(&chars, i, "*")
                .map(|(inner, next)| (parse_inline(&inner, base.add_modifier(Modifier::ITALIC), theme), next)),
            '~' if chars.get(i + 1) == Some(&'~') => find_delimited(&chars, i, "~~").map(|(inner, next)| {
                (parse_inline(&inner, base.add_modifier(Modifier::CROSSED_OUT), theme), next)
            }),
            '[' => link(&chars, i, base, theme),
            _ => None,
        };

        match consumed {
            Some((styled, next)) => {
                if !plain.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut plain), base));
                }
                spans.extend(styled);
                i = next;
            }
            None => {
                plain.push(c);
                i += 1;
            }
        }
    }

    if !plain.is_empty() {
        spans.push(Span::styled(plain, base));
    }
    if spans.is_empty() {
        spans.push(Span::raw(""));
    }
    spans
}

fn find_char(chars: &[char], from: usize, target: char) -> Option<usize> {
    chars.iter().skip(from).position(|&c| c == target).map(|p| p + from)
}

fn matches_at(chars: &[char], at: usize, marker: &[char]) -> bool {
    chars.get(at..at + marker.len()) == Some(marker)
}

/// Content between `marker` at `start` and its flanking closer, plus the index after it
fn find_delimited(chars: &[char], start: usize, marker: &str) -> Option<(String, usize)> {
    let marker: Vec<char> = marker.chars().collect();
    let n = marker.len();
    let open_end = start + n;
    if chars.get(open_end).is_none_or(|c| c.is_whitespace()) {
        return None;
    }

    let mut j = open_end + 1;
    while j + n <= chars.len() {
        // `**` inside `*...*` is nested bold, not a closer
        if n == 1 && matches_at(chars, j, &['*', '*']) {
            j += 2;
            continue;
        }
        if matches_at(chars, j, &marker) && !chars[j - 1].is_whitespace() {
            return Some((chars[open_end..j].iter().collect(), j + n));
        }
        j += 1;
    }
    None
}

/// `$inline$` or `$$display$$` math at `start`
fn inline_math(chars: &[char], start: usize, theme: &Theme) -> Option<(Vec<Span<'static>>, usize)> {
    let style = Style::default().fg(theme.syntax_type).add_modifier(Modifier::ITALIC);
    let (inner, next) = if chars.get(start + 1) == Some(&'$') {
        let body = start + 2;
        let mut j = body;
        loop {
            if j + 2 > chars.len() {
                return None;
            }
            if matches_at(chars, j, &['$', '$']) {
                break;
            }
            j += 1;
        }
        (chars[body..j].iter().collect::<String>(), j + 2)
    } else {
        let (inner, next) = find_delimited(chars, start, "$")?;
        // "$5 e $6" is currency, not math
        if chars.get(next).is_some_and(|c| c.is_ascii_digit()) {
            return None;
        }
        (inner, next)
    };
    Some((vec![Span::styled(math::prettify(inner.trim()), style)], next))
}

/// `[label](url)` at `start`; the url follows the label in muted text
fn link(chars: &[char], start: usize, base: Style, theme: &Theme) -> Option<(Vec<Span<'static>>, usize)> {
    let close = find_char(chars, start + 1, ']')?;
    if chars.get(close + 1) != Some(&'(') {
        return None;
    }
    let end = find_char(chars, close + 2, ')')?;

    let label: String = chars[start + 1..close].iter().collect();
    let url: String = chars[close + 2..end].iter().collect();
    let link_style = base.fg(theme.accent_secondary).add_modifier(Modifier::UNDERLINED);

    let mut spans = parse_inline(&label, link_style, theme);
    if !url.is_empty() && url != label {
        spans.push(Span::styled(format!(" ({})", url), Style::default().fg(theme.fg_muted)));
    }
    Some((spans, end + 1))
}

/// Wrap styled spans into lines while preserving formatting
pub fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![Line::from(spans)];
    }

    let mut lines = Vec::new();
    let mut current_line: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0;

    for span in spans {
        let style = span.style;

        for word in span.content.split_inclusive(char::is_whitespace) {
            let word_len = word.chars().count();

            if current_width + word_len > width && current_width > 0 {
                lines.push(Line::from(std::mem::take(&mut current_line)));
                current_width = 0;
            }

            current_line.push(Span::styled(word.to_string(), style));
            current_width += word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(Line::from(current_line));
    }

    if lines.is_empty() {
        lines.push(Line::from(""));
    }

    lines
}

/// Boxed, highlighted code; the header number is the `:yank` index
fn render_code_block(lines: &mut Vec<Line<'static>>, code: &CodeBlock, number: usize, theme: &Theme) {
    let lang_label = code.language.as_deref().unwrap_or("code");
    lines.push(Line::from(vec![
        Span::styled("┌─ ", Style::default().fg(theme.border)),
        Span::styled(format!("[{}] ", number), Style::default().fg(theme.accent_secondary)),
        Span::styled(lang_label.to_string(), Style::default().fg(theme.info)),
        Span::styled(" ─".to_string(), Style::default().fg(theme.border)),
    ]));

    for highlighted in syntax::highlight_code(&code.code, code.language.as_deref(), theme) {
        let mut line_spans = vec![Span::styled("│ ", Style::default().fg(theme.border))];
        line_spans.extend(highlighted);
        lines.push(Line::from(line_spans));
    }

    lines.push(Line::from(Span::styled("└──────", Style::default().fg(theme.border))));
    lines.push(Line::from(""));
}

fn render_list(lines: &mut Vec<Line<'static>>, list: &List, theme: &Theme, width: usize) {
    let marker_style = Style::default().fg(theme.accent_secondary);
    let mut number = list.start.unwrap_or(1);

    for item in &list.items {
        let indent = "  ".repeat(item.depth + 1);
        let (marker, text) = if let Some(rest) = item.text.strip_prefix("[x] ") {
            ("☑ ".to_string(), rest)
        } else if let Some(rest) = item.text.strip_prefix("[ ] ") {
            ("☐ ".to_string(), rest)
        } else if list.ordered() && item.depth == 0 {
            let marker = format!("{}. ", number);
            number += 1;
            (marker, item.text.as_str())
        } else if item.depth == 0 {
            ("• ".to_string(), item.text.as_str())
        } else {
            ("◦ ".to_string(), item.text.as_str())
        };

        let prefix_width = indent.chars().count() + marker.chars().count();
        let spans = parse_inline(text, Style::default().fg(theme.fg_primary), theme);
        let wrapped = wrap_spans(spans, width.saturating_sub(prefix_width));

        for (i, line) in wrapped.into_iter().enumerate() {
            let prefix = if i == 0 {
                Span::styled(format!("{}{}", indent, marker), marker_style)
            } else {
                Span::raw(" ".repeat(prefix_width))
            };
            let mut line_spans = vec![prefix];
            line_spans.extend(line.spans);
            lines.push(Line::from(line_spans));
        }
    }
    lines.push(Line::from(""));
}

fn render_blockquote(lines: &mut Vec<Line<'static>>, text: &str, theme: &Theme, width: usize) {
    let prefix = "  │ ";
    let content_width = width.saturating_sub(4);
    let base = Style::default().fg(theme.fg_muted).add_modifier(Modifier::ITALIC);

    for paragraph in text.lines().filter(|l| !l.trim().is_empty()) {
        for line in wrap_spans(parse_inline(paragraph, base, theme), content_width) {
            let mut line_spans = vec![Span::styled(prefix, Style::default().fg(theme.accent_primary))];
            line_spans.extend(line.spans);
            lines.push(Line::from(line_spans));
        }
    }
    lines.push(Line::from(""));
}

fn render_horizontal_rule(lines: &mut Vec<Line<'static>>, theme: &Theme, width: usize) {
    let rule_width = width.saturating_sub(4).min(32);
    lines.push(Line::from(Span::styled("─".repeat(rule_width), Style::default().fg(theme.border))));
    lines.push(Line::from(""));
}

fn render_image(lines: &mut Vec<Line<'static>>, alt: &str, theme: &Theme) {
    lines.push(Line::from(Span::styled(format!("[Imagem: {}]", alt), Style::default().fg(theme.fg_muted))));
    lines.push(Line::from(""));
}

fn render_math(lines: &mut Vec<Line<'static>>, expr: &str, theme: &Theme) {
    let style = Style::default().fg(theme.syntax_type).add_modifier(Modifier::ITALIC);
    for row in math::prettify(expr).lines().filter(|l| !l.trim().is_empty()) {
        lines.push(Line::from(Span::styled(format!("    {}", row.trim()), style)));
    }
    lines.push(Line::from(""));
}

fn render_table(lines: &mut Vec<Line<'static>>, table: &Table, theme: &Theme) {
    let num_cols = table.column_count();
    if num_cols == 0 {
        return;
    }

    // Size columns to content, capped so wide tables still fit
    let col_widths: Vec<usize> = (0..num_cols)
        .map(|i| {
            table
                .headers
                .get(i)
                .into_iter()
                .chain(table.rows.iter().filter_map(|r| r.get(i)))
                .map(|cell| cell_text(cell).chars().count())
                .max()
                .unwrap_or(0)
                .clamp(3, 30)
        })
        .collect();

    lines.push(Line::from(""));

    if !table.headers.is_empty() {
        let header_bg = theme.accent_secondary;
        let mut header_spans: Vec<Span<'static>> = Vec::new();

        for (i, header) in table.headers.iter().enumerate() {
            let width = col_widths.get(i).copied().unwrap_or(15);
            if i > 0 {
                header_spans.push(Span::styled("  ", Style::default().bg(header_bg)));
            }
            header_spans.push(Span::styled(
                align(&cell_text(header), width, table.alignments.get(i).copied()),
                Style::default().fg(theme.bg_primary).bg(header_bg).add_modifier(Modifier::BOLD),
            ));
        }

        header_spans.push(Span::styled("  ", Style::default().bg(header_bg)));
        lines.push(Line::from(header_spans));
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_bg = if row_idx % 2 == 0 { theme.bg_secondary } else { theme.bg_primary };

        let mut wrapped_cells: Vec<Vec<String>> = Vec::new();
        let mut max_lines = 1;
        for (i, cell) in row.iter().enumerate() {
            let width = col_widths.get(i).copied().unwrap_or(15);
            let wrapped = wrap_cell_text(&cell_text(cell), width);
            max_lines = max_lines.max(wrapped.len());
            wrapped_cells.push(wrapped);
        }
        while wrapped_cells.len() < num_cols {
            wrapped_cells.push(vec![String::new()]);
        }

        for line_idx in 0..max_lines {
            let mut row_spans: Vec<Span<'static>> = Vec::new();

            for (col_idx, wrapped) in wrapped_cells.iter().enumerate() {
                let width = col_widths.get(col_idx).copied().unwrap_or(15);
                let cell_line = wrapped.get(line_idx).map(|s| s.as_str()).unwrap_or("");

                if col_idx > 0 {
                    row_spans.push(Span::styled("  ", Style::default().bg(row_bg)));
                }

                // First column usually holds the operator or function name
                let style = if col_idx == 0 {
                    Style::default().fg(theme.syntax_keyword).bg(row_bg)
                } else {
                    Style::default().fg(theme.fg_primary).bg(row_bg)
                };

                row_spans.push(Span::styled(
                    align(cell_line, width, table.alignments.get(col_idx).copied()),
                    style,
                ));
            }

            row_spans.push(Span::styled("  ", Style::default().bg(row_bg)));
            lines.push(Line::from(row_spans));
        }
    }

    lines.push(Line::from(""));
}

/// Cell text without inline markup
fn cell_text(cell: &str) -> String {
    let plain: String = cell.chars().filter(|&c| c != '`').collect();
    let plain = plain.replace("**", "");
    if plain.contains('$') { math::prettify(&plain.replace('$', "")) } else { plain }
}

fn align(s: &str, width: usize, alignment: Option<Alignment>) -> String {
    let len = s.chars().count();
    if len >= width {
        return pad_or_truncate(s, width);
    }
    let gap = width - len;
    match alignment {
        Some(Alignment::Right) => format!("{}{}", " ".repeat(gap), s),
        Some(Alignment::Center) => format!("{}{}{}", " ".repeat(gap / 2), s, " ".repeat(gap - gap / 2)),
        _ => pad_or_truncate(s, width),
    }
}

/// Pad string to width or truncate with ellipsis
fn pad_or_truncate(s: &str, width: usize) -> String {
    let char_count = s.chars().count();
    if char_count > width {
        let truncated: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    } else {
        format!("{:width$}", s, width = width)
    }
}

/// Wrap text to fit within a given width
fn wrap_cell_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut result = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current_line.chars().count();

        if current_line.is_empty() {
            current_line = word.chars().take(width).collect();
        } else if current_len + 1 + word_len <= width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            result.push(std::mem::take(&mut current_line));
            current_line = word.chars().take(width).collect();
        }
    }

    if !current_line.is_empty() {
        result.push(current_line);
    }

    if result.is_empty() {
        result.push(String::new());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::AppState;
    use crate::lesson::model::ListItem;
    use crate::theme::{Theme, ThemeMode};
    use pretty_assertions::assert_eq;

    fn contents(spans: &[Span<'_>]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    fn base() -> Style {
        Style::default()
    }

    #[test]
    fn pad_or_truncate_short() {
        assert_eq!(pad_or_truncate("hi", 5), "hi   ");
    }

    #[test]
    fn pad_or_truncate_long() {
        assert_eq!(pad_or_truncate("hello world", 5), "hell…");
    }

    #[test]
    fn align_right_and_center() {
        assert_eq!(align("ab", 5, Some(Alignment::Right)), "   ab");
        assert_eq!(align("ab", 5, Some(Alignment::Center)), " ab  ");
    }

    #[test]
    fn wrap_cell_text_long() {
        let result = wrap_cell_text("this is a very long text", 10);
        assert!(result.len() > 1);
        assert!(result.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrap_cell_text_empty() {
        assert_eq!(wrap_cell_text("", 10), vec![""]);
    }

    #[test]
    fn inline_code() {
        let theme = Theme::default();
        let spans = parse_inline("use `print()` aqui", base(), &theme);
        assert_eq!(contents(&spans), vec!["use ", "print()", " aqui"]);
        assert_eq!(spans[1].style.fg, Some(theme.syntax_string));
    }

    #[test]
    fn bold_and_italic() {
        let theme = Theme::default();
        let spans = parse_inline("um **forte** e *leve*", base(), &theme);
        assert_eq!(contents(&spans), vec!["um ", "forte", " e ", "leve"]);
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert!(spans[3].style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn bold_inside_italic() {
        let theme = Theme::default();
        let spans = parse_inline("*muito **forte** mesmo*", base(), &theme);
        let bold = spans.iter().find(|s| s.content == "forte").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD | Modifier::ITALIC));
    }

    #[test]
    fn spaced_asterisk_is_multiplication() {
        let theme = Theme::default();
        let spans = parse_inline("2 * 3 * 4", base(), &theme);
        assert_eq!(contents(&spans), vec!["2 * 3 * 4"]);
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        let theme = Theme::default();
        let spans = parse_inline("a **b and `c", base(), &theme);
        assert_eq!(contents(&spans), vec!["a **b and `c"]);
    }

    #[test]
    fn inline_math_is_prettified() {
        let theme = Theme::default();
        let spans = parse_inline(r"seja $x \in \mathbb{R}$ real", base(), &theme);
        assert_eq!(contents(&spans), vec!["seja ", "x ∈ ℝ", " real"]);
    }

    #[test]
    fn currency_is_not_math() {
        let theme = Theme::default();
        let spans = parse_inline("custa $5 e $6", base(), &theme);
        assert_eq!(contents(&spans), vec!["custa $5 e $6"]);
    }

    #[test]
    fn link_shows_label_and_url() {
        let theme = Theme::default();
        let spans = parse_inline("veja [docs](https://docs.python.org)", base(), &theme);
        assert_eq!(contents(&spans), vec!["veja ", "docs", " (https://docs.python.org)"]);
        assert!(spans[1].style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn task_marker_is_not_a_link() {
        let theme = Theme::default();
        let spans = parse_inline("[x] feito", base(), &theme);
        assert_eq!(contents(&spans), vec!["[x] feito"]);
    }

    #[test]
    fn strikethrough() {
        let theme = Theme::default();
        let spans = parse_inline("~~velho~~ novo", base(), &theme);
        assert!(spans[0].style.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn wrap_spans_respects_width() {
        let spans = vec![Span::raw("uma frase com varias palavras para quebrar")];
        let lines = wrap_spans(spans, 12);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line_text(line).trim_end().chars().count() <= 12);
        }
    }

    #[test]
    fn render_empty() {
        assert!(render_content_blocks(&[], &Theme::default(), 80).is_empty());
    }

    #[test]
    fn code_block_is_boxed() {
        let theme = Theme::default();
        let blocks = vec![ContentBlock::Code(CodeBlock::new("x = 1\ny = 2").with_language("python"))];
        let lines = render_content_blocks(&blocks, &theme, 80);
        assert!(line_text(&lines[0]).starts_with("┌─ [1] python"));
        assert!(line_text(&lines[1]).starts_with("│ x = 1"));
        assert!(line_text(&lines[3]).starts_with("└"));
    }

    #[test]
    fn code_blocks_are_numbered_in_order() {
        let theme = Theme::default();
        let blocks = vec![
            ContentBlock::Code(CodeBlock::new("a = 1").with_language("python")),
            ContentBlock::Paragraph("Texto.".into()),
            ContentBlock::Code(CodeBlock::new("b = 2")),
        ];
        let headers: Vec<String> = render_content_blocks(&blocks, &theme, 80)
            .iter()
            .map(line_text)
            .filter(|l| l.starts_with("┌─"))
            .collect();
        assert_eq!(headers, vec!["┌─ [1] python ─", "┌─ [2] code ─"]);
    }

    #[test]
    fn scrollbar_thumb_stays_on_track() {
        // Offsets past the renderer's own max scroll pin the thumb to the bottom
        assert_eq!(thumb_top(10, 2, 95, 100), 8);
        assert_eq!(thumb_top(10, 2, 500, 100), 8);
        assert_eq!(thumb_top(10, 2, 0, 100), 0);
        assert_eq!(thumb_top(10, 10, 3, 8), 0);
    }

    #[test]
    fn ordered_list_numbers_from_start() {
        let theme = Theme::default();
        let list = List {
            start: Some(3),
            items: vec![
                ListItem { depth: 0, text: "três".into() },
                ListItem { depth: 1, text: "detalhe".into() },
                ListItem { depth: 0, text: "quatro".into() },
            ],
        };
        let lines = render_content_blocks(&[ContentBlock::List(list)], &theme, 80);
        assert_eq!(line_text(&lines[0]), "  3. três");
        assert_eq!(line_text(&lines[1]), "    ◦ detalhe");
        assert_eq!(line_text(&lines[2]), "  4. quatro");
    }

    #[test]
    fn task_list_items_get_checkboxes() {
        let theme = Theme::default();
        let list = List { start: None, items: vec![ListItem { depth: 0, text: "[x] pronto".into() }] };
        let lines = render_content_blocks(&[ContentBlock::List(list)], &theme, 80);
        assert_eq!(line_text(&lines[0]), "  ☑ pronto");
    }

    #[test]
    fn blockquote_keeps_paragraphs() {
        let theme = Theme::default();
        let lines = render_content_blocks(&[ContentBlock::Blockquote("um\ndois".into())], &theme, 80);
        assert_eq!(line_text(&lines[0]), "  │ um");
        assert_eq!(line_text(&lines[1]), "  │ dois");
    }

    #[test]
    fn display_math_is_indented() {
        let theme = Theme::default();
        let lines = render_content_blocks(&[ContentBlock::Math(r"a \times b".into())], &theme, 80);
        assert_eq!(line_text(&lines[0]), "    a × b");
    }

    #[test]
    fn table_header_and_rows() {
        let theme = Theme::default();
        let mut table = Table::new(vec!["Operador".into(), "Significado".into()]);
        table.rows.push(vec!["`+`".into(), "soma".into()]);
        let lines = render_content_blocks(&[ContentBlock::Table(table)], &theme, 80);
        assert!(line_text(&lines[1]).starts_with("Operador"));
        assert!(line_text(&lines[2]).starts_with("+ "));
    }

    fn displayed_state(markdown: &str) -> AppState {
        let mut state = AppState::new(ThemeMode::Dark);
        let topic = CURRICULUM.find_topic("m1-what-is").unwrap();
        let request = match state.select_topic(topic) {
            crate::app::navigation::Selection::Fetch(request) => request,
            other => panic!("unexpected selection {:?}", other),
        };
        assert!(state.finish_load(request.id, markdown.to_string()));
        state
    }

    #[test]
    fn search_jumps_to_first_hit_once() {
        let theme = Theme::default();
        let mut state = displayed_state("# Título\n\nPrimeiro parágrafo.\n\nSegundo exemplo.\n");
        state.search.set_query("segundo").unwrap();

        let mut lines = page_lines(&state, &theme, 80);
        state.content.total_lines = lines.len();
        state.content.visible_height = 10;
        apply_search(&mut state, &mut lines, &theme);

        assert!(!state.search.jump_pending);
        assert_eq!(state.content.current_match, Some(0));
        let row = state.content.search_matches[0];
        assert!(line_text(&lines[row]).contains("Segundo"));
        assert_eq!(lines[row].spans[0].style.bg, Some(theme.selection));
        assert_eq!(state.command_line.message.as_deref(), Some("/segundo [1/1]"));
    }

    #[test]
    fn search_without_hits_reports_error() {
        let theme = Theme::default();
        let mut state = displayed_state("# Título\n\nNada aqui.\n");
        state.search.set_query("lambda").unwrap();

        let mut lines = page_lines(&state, &theme, 80);
        apply_search(&mut state, &mut lines, &theme);

        assert!(state.content.search_matches.is_empty());
        assert!(state.command_line.is_error);
    }

    #[test]
    fn breadcrumb_names_chapter_and_topic() {
        let theme = Theme::default();
        let topic = CURRICULUM.find_topic("m1-what-is").unwrap();
        let text = line_text(&breadcrumb(topic, &theme)[0]);
        assert!(text.contains(topic.title));
        assert!(text.contains(CURRICULUM.chapters()[0].title));
    }

    #[test]
    fn loading_view_shows_message() {
        let theme = Theme::default();
        let mut state = AppState::new(ThemeMode::Dark);
        state.select_topic(CURRICULUM.find_topic("m1-what-is").unwrap());
        let lines = page_lines(&state, &theme, 80);
        assert!(lines.iter().any(|l| line_text(l).contains(LOADING_TEXT)));
    }
}
