//! Content model for lessons
//!
//! A lesson is an ordered list of blocks. Inline formatting inside block text is
//! kept as lightweight markup (`**bold**`, `*italic*`, `` `code` ``, `$math$` and
//! `[label](url)`) so the renderer can style it without another parse pass.

use serde::Serialize;

/// A parsed lesson
#[derive(Debug, Clone, Default, Serialize)]
pub struct Lesson {
    pub blocks: Vec<ContentBlock>,
}

impl Lesson {
    /// Title taken from the first level-1 heading
    pub fn title(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            ContentBlock::Heading { level: 1, text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Code blocks in document order
    pub fn code_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.blocks.iter().filter_map(|b| match b {
            ContentBlock::Code(code) => Some(code),
            _ => None,
        })
    }

    /// The n-th code block, counting from 1 as the renderer numbers them
    pub fn code_block(&self, number: usize) -> Option<&CodeBlock> {
        self.code_blocks().nth(number.checked_sub(1)?)
    }

    pub fn word_count(&self) -> usize {
        self.blocks.iter().map(ContentBlock::word_count).sum()
    }

    /// Estimated reading time, never below one minute
    pub fn reading_time_minutes(&self) -> u32 {
        // 200 words per minute for technical prose
        (self.word_count() / 200).max(1) as u32
    }
}

/// A block of lesson content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ContentBlock {
    /// A heading (level 1-6)
    Heading { level: u8, text: String },
    Paragraph(String),
    Code(CodeBlock),
    /// A list; nested items carry their depth
    List(List),
    Blockquote(String),
    /// An image reference, shown as its alt text
    Image { alt: String, src: String },
    HorizontalRule,
    Table(Table),
    /// A display formula (`$$ ... $$`)
    Math(String),
}

impl ContentBlock {
    pub fn word_count(&self) -> usize {
        match self {
            Self::Heading { text, .. } | Self::Paragraph(text) | Self::Blockquote(text) => {
                text.split_whitespace().count()
            }
            // Code reads slower
            Self::Code(code) => code.code.split_whitespace().count() / 3,
            Self::List(list) => list.items.iter().map(|i| i.text.split_whitespace().count()).sum(),
            Self::Table(table) => table.word_count(),
            Self::Math(expr) => expr.split_whitespace().count(),
            Self::Image { .. } | Self::HorizontalRule => 0,
        }
    }
}

/// A fenced or indented code block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub code: String,
    /// Language from the fence info string, if any
    pub language: Option<String>,
}

impl CodeBlock {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into(), language: None }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// An ordered or bulleted list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    /// First number for ordered lists, `None` for bullets
    pub start: Option<u64>,
    pub items: Vec<ListItem>,
}

impl List {
    pub fn ordered(&self) -> bool {
        self.start.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    /// Nesting depth, 0 for top-level items
    pub depth: usize,
    pub text: String,
}

/// A table structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub alignments: Vec<Alignment>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        let col_count = headers.len();
        Self { headers, rows: Vec::new(), alignments: vec![Alignment::Left; col_count] }
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).chain(std::iter::once(self.headers.len())).max().unwrap_or(0)
    }

    pub fn word_count(&self) -> usize {
        self.headers
            .iter()
            .chain(self.rows.iter().flatten())
            .map(|cell| cell.split_whitespace().count())
            .sum()
    }
}

/// Column alignment for tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_block_counts_from_one() {
        let lesson = Lesson {
            blocks: vec![
                ContentBlock::Code(CodeBlock::new("x = 1")),
                ContentBlock::Paragraph("entre".into()),
                ContentBlock::Code(CodeBlock::new("print(x)").with_language("python")),
            ],
        };
        assert_eq!(lesson.code_block(1).map(|c| c.code.as_str()), Some("x = 1"));
        assert_eq!(lesson.code_block(2).map(|c| c.code.as_str()), Some("print(x)"));
        assert!(lesson.code_block(0).is_none());
        assert!(lesson.code_block(3).is_none());
    }

    #[test]
    fn lesson_title_is_first_h1() {
        let lesson = Lesson {
            blocks: vec![
                ContentBlock::Paragraph("intro".into()),
                ContentBlock::Heading { level: 2, text: "Sub".into() },
                ContentBlock::Heading { level: 1, text: "Main".into() },
            ],
        };
        assert_eq!(lesson.title(), Some("Main"));
        assert_eq!(Lesson::default().title(), None);
    }

    #[test]
    fn content_block_word_count() {
        let para = ContentBlock::Paragraph("O módulo math é muito útil.".into());
        assert_eq!(para.word_count(), 6);

        let code = ContentBlock::Code(CodeBlock::new("import math\nprint(math.pi)"));
        assert!(code.word_count() < 2);
    }

    #[test]
    fn reading_time_has_a_floor() {
        assert_eq!(Lesson::default().reading_time_minutes(), 1);

        let long = Lesson { blocks: vec![ContentBlock::Paragraph("palavra ".repeat(650))] };
        assert_eq!(long.reading_time_minutes(), 3);
    }

    #[test]
    fn code_blocks_in_order() {
        let lesson = Lesson {
            blocks: vec![
                ContentBlock::Code(CodeBlock::new("a = 1").with_language("python")),
                ContentBlock::HorizontalRule,
                ContentBlock::Code(CodeBlock::new("b = 2")),
            ],
        };
        let codes: Vec<_> = lesson.code_blocks().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["a = 1", "b = 2"]);
    }

    #[test]
    fn table_column_count_uses_widest_row() {
        let mut table = Table::new(vec!["x".into(), "y".into()]);
        table.rows.push(vec!["1".into(), "2".into(), "3".into()]);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.word_count(), 5);
    }
}
