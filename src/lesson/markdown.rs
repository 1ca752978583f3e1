//! Markdown parser for lessons
//!
//! Turns a markdown string into [`Lesson`] blocks. Inline emphasis, links and
//! math are re-emitted as markup inside the block text; see [`super::model`].

use once_cell::sync::Lazy;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;

use super::model::{Alignment, CodeBlock, ContentBlock, Lesson, List, ListItem, Table};

/// Matches any HTML tag (compiled once)
static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Parse a markdown string into a lesson
pub fn parse_lesson(markdown: &str) -> Lesson {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_MATH;

    let mut builder = LessonBuilder::default();
    for event in Parser::new_ext(markdown, options) {
        builder.event(event);
    }
    builder.finish()
}

#[derive(Default)]
struct ListBuilder {
    start: Option<u64>,
    items: Vec<ListItem>,
    current: String,
    /// Top-level items already flushed out as an earlier block
    emitted: u64,
}

#[derive(Default)]
struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    alignments: Vec<Alignment>,
}

#[derive(Default)]
struct LessonBuilder {
    blocks: Vec<ContentBlock>,
    /// Inline text of the innermost open container
    inline: String,
    heading: Option<u8>,
    code: Option<CodeBlock>,
    lists: Vec<ListBuilder>,
    quote: Option<String>,
    table: Option<TableBuilder>,
    image: Option<(String, String)>,
    links: Vec<String>,
    in_html_comment: bool,
}

impl LessonBuilder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush_paragraph();
                self.heading = Some(heading_level_to_u8(level));
            }
            Event::End(TagEnd::Heading(_)) => {
                let text = std::mem::take(&mut self.inline).trim().to_string();
                if let Some(level) = self.heading.take() {
                    if !text.is_empty() {
                        self.blocks.push(ContentBlock::Heading { level, text });
                    }
                }
            }

            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => self.end_paragraph(),

            Event::Start(Tag::CodeBlock(kind)) => {
                self.flush_paragraph();
                self.flush_lists();
                let mut block = CodeBlock::new(String::new());
                if let CodeBlockKind::Fenced(info) = kind {
                    // Info strings like "python title=x" keep only the language
                    if let Some(lang) = info.split_whitespace().next() {
                        block = block.with_language(lang);
                    }
                }
                self.code = Some(block);
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(mut block) = self.code.take() {
                    block.code = block.code.trim_end().to_string();
                    self.blocks.push(ContentBlock::Code(block));
                }
            }

            Event::Start(Tag::List(start)) => {
                let depth = self.lists.len().saturating_sub(1);
                if let Some(parent) = self.lists.last_mut() {
                    // Text before a nested list belongs to the parent item
                    let text = take_trimmed(&mut parent.current, &mut self.inline);
                    if !text.is_empty() {
                        parent.items.push(ListItem { depth, text });
                    }
                } else {
                    self.flush_paragraph();
                }
                self.lists.push(ListBuilder { start, ..ListBuilder::default() });
            }
            Event::End(TagEnd::List(_)) => {
                if let Some(list) = self.lists.pop() {
                    match self.lists.last_mut() {
                        Some(parent) => parent.items.extend(list.items),
                        None => self.push_list(list),
                    }
                }
            }

            Event::Start(Tag::Item) => {
                if let Some(list) = self.lists.last_mut() {
                    list.current.clear();
                }
            }
            Event::End(TagEnd::Item) => {
                let depth = self.lists.len().saturating_sub(1);
                if let Some(list) = self.lists.last_mut() {
                    let text = take_trimmed(&mut list.current, &mut self.inline);
                    if !text.is_empty() {
                        list.items.push(ListItem { depth, text });
                    }
                }
            }

            Event::Start(Tag::BlockQuote(_)) => {
                self.flush_paragraph();
                self.quote = Some(String::new());
            }
            Event::End(TagEnd::BlockQuote(_)) => {
                if !self.inline.trim().is_empty() {
                    self.end_paragraph();
                }
                if let Some(content) = self.quote.take() {
                    let content = content.trim().to_string();
                    if !content.is_empty() {
                        self.blocks.push(ContentBlock::Blockquote(content));
                    }
                }
            }

            Event::Start(Tag::Table(alignments)) => {
                self.flush_paragraph();
                self.table = Some(TableBuilder {
                    alignments: alignments.iter().map(|a| convert_alignment(*a)).collect(),
                    ..TableBuilder::default()
                });
            }
            Event::End(TagEnd::Table) => {
                if let Some(built) = self.table.take() {
                    let mut table = Table::new(built.headers);
                    table.rows = built.rows;
                    table.alignments = built.alignments;
                    self.blocks.push(ContentBlock::Table(table));
                }
            }
            Event::Start(Tag::TableHead) | Event::Start(Tag::TableRow) => {
                if let Some(table) = self.table.as_mut() {
                    table.row.clear();
                }
            }
            Event::End(TagEnd::TableHead) => {
                // Header cells come directly inside TableHead, without a TableRow
                if let Some(table) = self.table.as_mut() {
                    table.headers = std::mem::take(&mut table.row);
                }
            }
            Event::End(TagEnd::TableRow) => {
                if let Some(table) = self.table.as_mut() {
                    if !table.row.is_empty() {
                        table.rows.push(std::mem::take(&mut table.row));
                    }
                }
            }
            Event::Start(Tag::TableCell) => self.inline.clear(),
            Event::End(TagEnd::TableCell) => {
                let cell = std::mem::take(&mut self.inline).trim().to_string();
                if let Some(table) = self.table.as_mut() {
                    table.row.push(cell);
                }
            }

            Event::Start(Tag::Image { dest_url, .. }) => {
                self.image = Some((String::new(), dest_url.to_string()));
            }
            Event::End(TagEnd::Image) => {
                if let Some((alt, src)) = self.image.take() {
                    self.flush_paragraph();
                    self.blocks.push(ContentBlock::Image { alt, src });
                }
            }

            Event::Start(Tag::Emphasis) | Event::End(TagEnd::Emphasis) => self.push_inline("*"),
            Event::Start(Tag::Strong) | Event::End(TagEnd::Strong) => self.push_inline("**"),
            Event::Start(Tag::Strikethrough) | Event::End(TagEnd::Strikethrough) => {
                self.push_inline("~~")
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                self.links.push(dest_url.to_string());
                self.push_inline("[");
            }
            Event::End(TagEnd::Link) => {
                let dest = self.links.pop().unwrap_or_default();
                self.push_inline(&format!("]({})", dest));
            }

            Event::Rule => {
                self.flush_paragraph();
                self.flush_lists();
                self.blocks.push(ContentBlock::HorizontalRule);
            }

            Event::Text(text) => {
                if let Some(code) = self.code.as_mut() {
                    code.code.push_str(&text);
                } else if let Some((alt, _)) = self.image.as_mut() {
                    alt.push_str(&text);
                } else {
                    self.inline.push_str(&text);
                }
            }
            Event::Code(code) => {
                self.inline.push('`');
                self.inline.push_str(&code);
                self.inline.push('`');
            }
            Event::InlineMath(expr) => {
                self.inline.push('$');
                self.inline.push_str(expr.trim());
                self.inline.push('$');
            }
            Event::DisplayMath(expr) => {
                if self.lists.is_empty() && self.table.is_none() && self.quote.is_none() {
                    self.flush_paragraph();
                    self.blocks.push(ContentBlock::Math(expr.trim().to_string()));
                } else {
                    self.push_inline(&format!("$${}$$", expr.trim()));
                }
            }
            Event::TaskListMarker(done) => self.push_inline(if done { "[x] " } else { "[ ] " }),

            Event::SoftBreak | Event::HardBreak => {
                if let Some(code) = self.code.as_mut() {
                    code.code.push('\n');
                } else if self.quote.is_some() && self.lists.is_empty() {
                    self.inline.push('\n');
                } else {
                    self.inline.push(' ');
                }
            }

            Event::Html(html) | Event::InlineHtml(html) => self.html(&html),

            _ => {}
        }
    }

    fn finish(mut self) -> Lesson {
        self.flush_paragraph();
        while let Some(list) = self.lists.pop() {
            self.push_list(list);
        }
        Lesson { blocks: self.blocks }
    }

    fn push_inline(&mut self, markup: &str) {
        if self.image.is_none() {
            self.inline.push_str(markup);
        }
    }

    /// Route finished paragraph text to the container that owns it
    fn end_paragraph(&mut self) {
        if let Some(list) = self.lists.last_mut() {
            let text = std::mem::take(&mut self.inline);
            if !list.current.is_empty() {
                list.current.push(' ');
            }
            list.current.push_str(text.trim());
        } else if let Some(quote) = self.quote.as_mut() {
            quote.push_str(self.inline.trim());
            quote.push('\n');
            self.inline.clear();
        } else {
            self.flush_paragraph();
        }
    }

    fn flush_paragraph(&mut self) {
        if self.lists.is_empty() && self.quote.is_none() && self.table.is_none() {
            flush_text(&mut self.inline, &mut self.blocks);
        }
    }

    /// Emit the items collected so far so a following block keeps document order
    fn flush_lists(&mut self) {
        if self.lists.is_empty() {
            return;
        }
        let innermost = self.lists.len() - 1;
        let mut inline = std::mem::take(&mut self.inline);
        let mut items = Vec::new();
        for (depth, list) in self.lists.iter_mut().enumerate() {
            let mut rest = if depth == innermost { std::mem::take(&mut inline) } else { String::new() };
            let pending = take_trimmed(&mut list.current, &mut rest);
            items.append(&mut list.items);
            if !pending.is_empty() {
                items.push(ListItem { depth, text: pending });
            }
        }
        let Some(root) = self.lists.first_mut() else { return };
        let start = root.start.map(|s| s + root.emitted);
        root.emitted += items.iter().filter(|i| i.depth == 0).count() as u64;
        if !items.is_empty() {
            self.blocks.push(ContentBlock::List(List { start, items }));
        }
    }

    fn push_list(&mut self, list: ListBuilder) {
        if !list.items.is_empty() {
            let start = list.start.map(|s| s + list.emitted);
            self.blocks.push(ContentBlock::List(List { start, items: list.items }));
        }
    }

    fn html(&mut self, html: &str) {
        if html.contains("<!--") {
            self.in_html_comment = true;
        }
        if html.contains("-->") {
            self.in_html_comment = false;
            return;
        }
        if self.in_html_comment {
            return;
        }
        let text = HTML_TAG_RE
            .replace_all(html, "")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
            .replace("&quot;", "\"");
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            self.inline.push_str(trimmed);
        }
    }
}

/// Join an item's earlier text with the pending inline buffer
fn take_trimmed(current: &mut String, inline: &mut String) -> String {
    let mut text = std::mem::take(current);
    let rest = std::mem::take(inline);
    let rest = rest.trim();
    if !rest.is_empty() {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(rest);
    }
    text.trim().to_string()
}

fn flush_text(text: &mut String, blocks: &mut Vec<ContentBlock>) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        blocks.push(ContentBlock::Paragraph(trimmed.to_string()));
    }
    text.clear();
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn convert_alignment(align: pulldown_cmark::Alignment) -> Alignment {
    match align {
        pulldown_cmark::Alignment::None | pulldown_cmark::Alignment::Left => Alignment::Left,
        pulldown_cmark::Alignment::Center => Alignment::Center,
        pulldown_cmark::Alignment::Right => Alignment::Right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blocks(md: &str) -> Vec<ContentBlock> {
        parse_lesson(md).blocks
    }

    fn item(depth: usize, text: &str) -> ListItem {
        ListItem { depth, text: text.into() }
    }

    #[test]
    fn parse_heading() {
        let blocks = blocks("# Módulo Math");
        assert_eq!(blocks, vec![ContentBlock::Heading { level: 1, text: "Módulo Math".into() }]);
    }

    #[test]
    fn parse_multiple_headings() {
        let blocks = blocks("# H1\n## H2\n### H3");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(&blocks[0], ContentBlock::Heading { level: 1, .. }));
        assert!(matches!(&blocks[1], ContentBlock::Heading { level: 2, .. }));
        assert!(matches!(&blocks[2], ContentBlock::Heading { level: 3, .. }));
    }

    #[test]
    fn emphasis_and_links_survive() {
        let blocks = blocks("O módulo **`math`** é *útil*, veja [docs](https://docs.python.org).");
        assert_eq!(
            blocks,
            vec![ContentBlock::Paragraph(
                "O módulo **`math`** é *útil*, veja [docs](https://docs.python.org).".into()
            )]
        );
    }

    #[test]
    fn inline_math_is_delimited() {
        let blocks = blocks("Retorna o menor inteiro maior ou igual a $x$.");
        assert_eq!(
            blocks,
            vec![ContentBlock::Paragraph("Retorna o menor inteiro maior ou igual a $x$.".into())]
        );
    }

    #[test]
    fn display_math_is_its_own_block() {
        let blocks = blocks("Um complexo:\n\n$$ z = a + b j $$\n\nfim");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::Paragraph("Um complexo:".into()),
                ContentBlock::Math("z = a + b j".into()),
                ContentBlock::Paragraph("fim".into()),
            ]
        );
    }

    #[test]
    fn parse_code_block() {
        let blocks = blocks("```python\nimport math\nprint(math.pi)\n```");
        assert_eq!(
            blocks,
            vec![ContentBlock::Code(
                CodeBlock::new("import math\nprint(math.pi)").with_language("python")
            )]
        );
    }

    #[test]
    fn parse_code_without_language() {
        let blocks = blocks("```\n$ python\n```");
        assert_eq!(blocks, vec![ContentBlock::Code(CodeBlock::new("$ python"))]);
    }

    #[test]
    fn parse_unordered_list() {
        let blocks = blocks("- Item 1\n- Item 2\n- Item 3");
        assert_eq!(
            blocks,
            vec![ContentBlock::List(List {
                start: None,
                items: vec![item(0, "Item 1"), item(0, "Item 2"), item(0, "Item 3")],
            })]
        );
    }

    #[test]
    fn parse_ordered_list_keeps_start() {
        let blocks = blocks("3. Terceiro\n4. Quarto");
        let ContentBlock::List(list) = &blocks[0] else { panic!("expected list, got {:?}", blocks) };
        assert_eq!(list.start, Some(3));
        assert_eq!(list.items.len(), 2);
    }

    #[test]
    fn nested_list_items_carry_depth() {
        let blocks = blocks("- Frutas\n  - maçã\n  - pera\n- Legumes");
        assert_eq!(
            blocks,
            vec![ContentBlock::List(List {
                start: None,
                items: vec![item(0, "Frutas"), item(1, "maçã"), item(1, "pera"), item(0, "Legumes")],
            })]
        );
    }

    #[test]
    fn code_inside_list_keeps_document_order() {
        let md = "1. Primeiro\n\n   ```python\n   x = 1\n   ```\n\n2. Segundo\n";
        let blocks = blocks(md);
        assert!(matches!(&blocks[0], ContentBlock::List(l) if l.start == Some(1) && l.items[0].text == "Primeiro"));
        assert!(matches!(&blocks[1], ContentBlock::Code(_)));
        let ContentBlock::List(rest) = blocks.last().unwrap() else { panic!("expected list") };
        assert_eq!(rest.start, Some(2));
        assert_eq!(rest.items, vec![item(0, "Segundo")]);
    }

    #[test]
    fn parse_blockquote() {
        let blocks = blocks("> **Nota:** O conteúdo\n> continua aqui");
        assert_eq!(
            blocks,
            vec![ContentBlock::Blockquote("**Nota:** O conteúdo\ncontinua aqui".into())]
        );
    }

    #[test]
    fn parse_horizontal_rule() {
        assert_eq!(blocks("---"), vec![ContentBlock::HorizontalRule]);
    }

    #[test]
    fn parse_table() {
        let md = "| Operador | Nome |\n|:--|--:|\n| `+` | soma |\n| `**` | potência |";
        let blocks = blocks(md);
        let ContentBlock::Table(table) = &blocks[0] else { panic!("expected table, got {:?}", blocks) };
        assert_eq!(table.headers, vec!["Operador", "Nome"]);
        assert_eq!(table.rows, vec![vec!["`+`", "soma"], vec!["`**`", "potência"]]);
        assert_eq!(table.alignments, vec![Alignment::Left, Alignment::Right]);
    }

    #[test]
    fn parse_image_uses_alt_text() {
        let blocks = blocks("![Gráfico seno](seno.png)");
        assert_eq!(
            blocks,
            vec![ContentBlock::Image { alt: "Gráfico seno".into(), src: "seno.png".into() }]
        );
    }

    #[test]
    fn parse_empty_content() {
        assert!(blocks("").is_empty());
        assert!(blocks("   \n\n   ").is_empty());
    }

    #[test]
    fn skip_html_comments() {
        let blocks = blocks("Antes\n\n<!-- escondido -->\n\nDepois");
        assert_eq!(
            blocks,
            vec![ContentBlock::Paragraph("Antes".into()), ContentBlock::Paragraph("Depois".into())]
        );
    }

    #[test]
    fn parse_mixed_content() {
        let md = r#"# Título

Um parágrafo.

```python
print("olá")
```

- Item 1
- Item 2
"#;
        let blocks = blocks(md);
        assert_eq!(blocks.len(), 4);
        assert!(matches!(&blocks[0], ContentBlock::Heading { level: 1, .. }));
        assert!(matches!(&blocks[1], ContentBlock::Paragraph(_)));
        assert!(matches!(&blocks[2], ContentBlock::Code(_)));
        assert!(matches!(&blocks[3], ContentBlock::List(_)));
    }

    #[test]
    fn flush_text_whitespace() {
        let mut text = String::from("   ");
        let mut out = Vec::new();
        flush_text(&mut text, &mut out);
        assert!(out.is_empty());
        assert!(text.is_empty());
    }

    #[test]
    fn heading_level_conversion() {
        assert_eq!(heading_level_to_u8(HeadingLevel::H1), 1);
        assert_eq!(heading_level_to_u8(HeadingLevel::H6), 6);
    }
}
