//! Topic id to markdown lookup
//!
//! Sources are consulted in order and the first hit wins. A topic nobody
//! provides resolves to [`pending_placeholder`], so resolution never fails.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use super::library;
use crate::curriculum::Topic;

/// Something that may hold the markdown for a topic
pub trait LessonSource: Send + Sync + fmt::Debug {
    fn lookup(&self, topic_id: &str) -> Option<String>;
}

/// The lesson table compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLessons;

impl LessonSource for EmbeddedLessons {
    fn lookup(&self, topic_id: &str) -> Option<String> {
        library::embedded(topic_id).map(str::to_owned)
    }
}

/// Lessons read from `<dir>/<topic-id>.md` at lookup time
#[derive(Debug, Clone)]
pub struct DirectoryLessons {
    dir: PathBuf,
}

impl DirectoryLessons {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, topic_id: &str) -> Option<PathBuf> {
        // Ids are plain slugs; anything that could escape the directory is a miss
        if topic_id.is_empty() || topic_id.contains(['/', '\\']) || topic_id.starts_with('.') {
            return None;
        }
        Some(self.dir.join(format!("{}.md", topic_id)))
    }
}

impl LessonSource for DirectoryLessons {
    fn lookup(&self, topic_id: &str) -> Option<String> {
        let path = self.path_for(topic_id)?;
        match std::fs::read_to_string(&path) {
            Ok(markdown) => Some(markdown),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Failed to read lesson file");
                None
            }
        }
    }
}

/// Ordered chain of lesson sources
#[derive(Debug, Clone)]
pub struct ContentResolver {
    sources: Vec<Arc<dyn LessonSource>>,
}

impl Default for ContentResolver {
    fn default() -> Self {
        Self::embedded()
    }
}

impl ContentResolver {
    /// Resolver backed only by the compiled-in lessons
    pub fn embedded() -> Self {
        Self { sources: vec![Arc::new(EmbeddedLessons)] }
    }

    /// Resolver that prefers files in `dir` over the compiled-in lessons
    pub fn with_directory(dir: impl Into<PathBuf>) -> Self {
        Self::embedded().prepend(DirectoryLessons::new(dir))
    }

    /// Put a source in front of the existing ones
    pub fn prepend(mut self, source: impl LessonSource + 'static) -> Self {
        self.sources.insert(0, Arc::new(source));
        self
    }

    /// Markdown for `topic`, or the placeholder when no source has it
    pub fn resolve(&self, topic: &Topic) -> String {
        match self.sources.iter().find_map(|s| s.lookup(topic.id)) {
            Some(markdown) => markdown,
            None => {
                tracing::debug!(topic = topic.id, "No lesson registered, using placeholder");
                pending_placeholder(topic)
            }
        }
    }

    /// Async form of [`resolve`](Self::resolve); file reads run off the runtime threads
    pub async fn resolve_async(&self, topic: Topic) -> String {
        let resolver = self.clone();
        match tokio::task::spawn_blocking(move || resolver.resolve(&topic)).await {
            Ok(markdown) => markdown,
            Err(err) => {
                tracing::error!(topic = topic.id, error = %err, "Lesson resolution task failed");
                pending_placeholder(&topic)
            }
        }
    }
}

/// Markdown shown for a topic whose lesson is still being written
pub fn pending_placeholder(topic: &Topic) -> String {
    format!(
        "\n## Conteúdo em Desenvolvimento\n\n\
         > **Nota:** O conteúdo para o tópico **\"{}\"** está sendo finalizado pela nossa equipe editorial.\n\n\
         Por favor, consulte os Módulos 1 a 9, que contêm a maior parte do material essencial sobre Python e Computação Científica.",
        topic.title
    )
}
