//! Lesson content: the embedded texts, where to find them, and how to parse them

pub mod library;
pub mod markdown;
pub mod model;
pub mod resolver;

pub use markdown::parse_lesson;
pub use model::{CodeBlock, ContentBlock, Lesson};
pub use resolver::{ContentResolver, DirectoryLessons, EmbeddedLessons, LessonSource, pending_placeholder};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::CURRICULUM;

    #[test]
    fn every_lesson_parses_to_blocks() {
        let resolver = ContentResolver::embedded();
        for topic in CURRICULUM.topics().filter(|t| t.special_page().is_none()) {
            let lesson = parse_lesson(&resolver.resolve(topic));
            assert!(!lesson.blocks.is_empty(), "{} parsed to nothing", topic.id);
        }
    }

    #[test]
    fn placeholder_parses_to_heading_and_note() {
        let topic = CURRICULUM.find_topic("m4-arith").unwrap();
        let lesson = parse_lesson(&pending_placeholder(topic));
        assert!(matches!(
            &lesson.blocks[0],
            ContentBlock::Heading { level: 2, text } if text == "Conteúdo em Desenvolvimento"
        ));
        assert!(matches!(&lesson.blocks[1], ContentBlock::Blockquote(q) if q.contains(topic.title)));
    }
}
