//! Course structure
//!
//! The curriculum is a compile-time tree of chapters and topics. Nothing mutates
//! it at runtime; every other component refers to topics by their `id`.

mod catalog;
pub mod resources;

pub use catalog::CURRICULUM;
pub use resources::{BIBLIOGRAPHY, EVALUATION, Reference, ReferenceKind};

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/// Topic id of the final exam page
pub const EVALUATION_TOPIC_ID: &str = "evaluation-main";

/// Topic id of the bibliography page
pub const BIBLIOGRAPHY_TOPIC_ID: &str = "bibliography-main";

/// Difficulty tag shown next to each topic in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Green,
    Orange,
    Red,
}

impl Difficulty {
    /// Short label used by the CLI listing
    pub fn label(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single lesson unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Topic {
    /// Unique identifier, also the lesson lookup key
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// One-line summary
    pub description: &'static str,
    /// Difficulty tag
    pub difficulty: Difficulty,
    /// Hint describing what the lesson covers, handed to the tutor
    pub prompt_context: &'static str,
}

impl Topic {
    /// The special page this topic opens, if it is not a regular lesson
    pub fn special_page(&self) -> Option<SpecialPage> {
        SpecialPage::from_topic_id(self.id)
    }
}

/// An ordered group of topics, shown as one collapsible sidebar section
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Chapter {
    pub id: &'static str,
    pub title: &'static str,
    pub topics: &'static [Topic],
}

impl Chapter {
    pub const fn new(id: &'static str, title: &'static str, topics: &'static [Topic]) -> Self {
        Self { id, title, topics }
    }
}

/// The ordered list of chapters
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct Curriculum {
    chapters: &'static [Chapter],
}

impl Curriculum {
    pub const fn new(chapters: &'static [Chapter]) -> Self {
        Self { chapters }
    }

    /// Chapters in display order
    pub fn chapters(&self) -> &'static [Chapter] {
        self.chapters
    }

    /// The topic shown when nothing has been selected yet
    pub fn first(&self) -> Option<&'static Topic> {
        self.chapters.iter().find_map(|c| c.topics.first())
    }

    /// All topics in display order
    pub fn topics(&self) -> impl Iterator<Item = &'static Topic> + '_ {
        self.chapters.iter().flat_map(|c| c.topics.iter())
    }

    /// Total number of topics across all chapters
    pub fn topic_count(&self) -> usize {
        self.chapters.iter().map(|c| c.topics.len()).sum()
    }

    /// Look up a topic by id
    pub fn find_topic(&self, id: &str) -> Option<&'static Topic> {
        self.topics().find(|t| t.id == id)
    }

    /// Index of the chapter containing the given topic
    pub fn chapter_index_of(&self, topic_id: &str) -> Option<usize> {
        self.chapters.iter().position(|c| c.topics.iter().any(|t| t.id == topic_id))
    }

    /// Topic ids that appear more than once, in first-seen order
    pub fn duplicate_ids(&self) -> Vec<&'static str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for topic in self.topics() {
            if !seen.insert(topic.id) && !duplicates.contains(&topic.id) {
                duplicates.push(topic.id);
            }
        }
        duplicates
    }
}

/// Pages rendered by a dedicated view instead of the markdown pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialPage {
    /// Final exam information and the evaluation sheet
    Evaluation,
    /// Recommended books and references
    Bibliography,
}

impl SpecialPage {
    pub fn from_topic_id(id: &str) -> Option<Self> {
        match id {
            EVALUATION_TOPIC_ID => Some(Self::Evaluation),
            BIBLIOGRAPHY_TOPIC_ID => Some(Self::Bibliography),
            _ => None,
        }
    }

    pub fn topic_id(&self) -> &'static str {
        match self {
            Self::Evaluation => EVALUATION_TOPIC_ID,
            Self::Bibliography => BIBLIOGRAPHY_TOPIC_ID,
        }
    }
}
