//! Topic selection state machine
//!
//! Every fetch is tagged with a request id. Only the completion carrying the
//! id of the most recent request may change what is on screen; anything older
//! is dropped.

use crate::curriculum::{SpecialPage, Topic};

/// What the content pane is showing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    /// Nothing selected yet
    #[default]
    Idle,
    /// Waiting for the lesson text of `topic`
    Loading { topic: Topic, request: u64 },
    /// Lesson markdown for `topic`
    Displaying { topic: Topic, markdown: String },
    /// One of the dedicated pages
    Special { topic: Topic, page: SpecialPage },
}

/// A lesson fetch the caller must run and report back through [`Navigator::complete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRequest {
    pub id: u64,
    pub topic: Topic,
}

/// What the caller should do after a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Same topic, already on screen
    Unchanged,
    /// A special page is now showing; nothing to fetch
    Special(SpecialPage),
    /// Resolve the lesson for this request
    Fetch(ContentRequest),
}

#[derive(Debug, Default)]
pub struct Navigator {
    current: Option<Topic>,
    view: View,
    next_request: u64,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected topic, if any
    pub fn current(&self) -> Option<&Topic> {
        self.current.as_ref()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, View::Loading { .. })
    }

    /// Markdown on screen, if a lesson is being displayed
    pub fn markdown(&self) -> Option<&str> {
        match &self.view {
            View::Displaying { markdown, .. } => Some(markdown),
            _ => None,
        }
    }

    /// The tutor is available only next to a displayed lesson
    pub fn chat_available(&self) -> bool {
        matches!(self.view, View::Displaying { .. })
    }

    /// Select `topic`
    pub fn select(&mut self, topic: &Topic) -> Selection {
        if let View::Displaying { topic: shown, markdown } = &self.view {
            if shown.id == topic.id && !markdown.is_empty() {
                return Selection::Unchanged;
            }
        }

        self.current = Some(*topic);

        if let Some(page) = topic.special_page() {
            self.view = View::Special { topic: *topic, page };
            return Selection::Special(page);
        }

        let id = self.next_request;
        self.next_request += 1;
        self.view = View::Loading { topic: *topic, request: id };
        Selection::Fetch(ContentRequest { id, topic: *topic })
    }

    /// Apply a finished fetch; returns false if it was stale and ignored
    pub fn complete(&mut self, request_id: u64, markdown: String) -> bool {
        match self.view {
            View::Loading { topic, request } if request == request_id => {
                self.view = View::Displaying { topic, markdown };
                true
            }
            _ => {
                tracing::debug!(request_id, "Discarding stale lesson load");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::{BIBLIOGRAPHY_TOPIC_ID, CURRICULUM, EVALUATION_TOPIC_ID};
    use crate::lesson::{ContentResolver, LessonSource};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves every id and counts the lookups
    #[derive(Debug, Default)]
    struct CountingLessons {
        lookups: Arc<AtomicUsize>,
    }

    impl LessonSource for CountingLessons {
        fn lookup(&self, topic_id: &str) -> Option<String> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Some(format!("# {}", topic_id))
        }
    }

    /// Select the way the app does: resolve only when asked to fetch
    fn select_and_load(nav: &mut Navigator, resolver: &ContentResolver, topic: &Topic) -> Selection {
        let selection = nav.select(topic);
        if let Selection::Fetch(request) = &selection {
            nav.complete(request.id, resolver.resolve(&request.topic));
        }
        selection
    }

    fn topic(id: &str) -> &'static Topic {
        CURRICULUM.find_topic(id).unwrap()
    }

    fn fetch(selection: Selection) -> ContentRequest {
        match selection {
            Selection::Fetch(request) => request,
            other => panic!("expected fetch, got {:?}", other),
        }
    }

    #[test]
    fn starts_idle() {
        let nav = Navigator::new();
        assert_eq!(nav.view(), &View::Idle);
        assert!(nav.current().is_none());
        assert!(!nav.chat_available());
    }

    #[test]
    fn first_selection_loads_then_displays() {
        let resolver = ContentResolver::embedded();
        let mut nav = Navigator::new();
        let first = CURRICULUM.first().unwrap();

        let request = fetch(nav.select(first));
        assert!(nav.is_loading());
        assert_eq!(request.topic.id, "m1-what-is");

        assert!(nav.complete(request.id, resolver.resolve(&request.topic)));
        assert!(matches!(nav.view(), View::Displaying { topic, .. } if topic.id == "m1-what-is"));
        assert!(nav.markdown().unwrap().contains('#'));
        assert!(nav.chat_available());
    }

    #[test]
    fn reselecting_displayed_topic_is_a_no_op() {
        let mut nav = Navigator::new();
        let request = fetch(nav.select(topic("m9-math")));
        nav.complete(request.id, "# Math".into());

        assert_eq!(nav.select(topic("m9-math")), Selection::Unchanged);
        assert_eq!(nav.markdown(), Some("# Math"));
    }

    #[test]
    fn resolver_runs_once_per_real_selection() {
        let lookups = Arc::new(AtomicUsize::new(0));
        let resolver = ContentResolver::embedded().prepend(CountingLessons { lookups: Arc::clone(&lookups) });
        let mut nav = Navigator::new();

        assert!(matches!(select_and_load(&mut nav, &resolver, topic("m2-for")), Selection::Fetch(_)));
        assert_eq!(lookups.load(Ordering::SeqCst), 1);
        assert_eq!(nav.markdown(), Some("# m2-for"));

        assert_eq!(select_and_load(&mut nav, &resolver, topic("m2-for")), Selection::Unchanged);
        assert_eq!(lookups.load(Ordering::SeqCst), 1);

        select_and_load(&mut nav, &resolver, topic(EVALUATION_TOPIC_ID));
        select_and_load(&mut nav, &resolver, topic(BIBLIOGRAPHY_TOPIC_ID));
        assert_eq!(lookups.load(Ordering::SeqCst), 1);

        // Coming back from a special page resolves again
        select_and_load(&mut nav, &resolver, topic("m2-for"));
        assert_eq!(lookups.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn reselecting_while_loading_refetches() {
        let mut nav = Navigator::new();
        let first = fetch(nav.select(topic("m9-math")));
        let second = fetch(nav.select(topic("m9-math")));
        assert!(second.id > first.id);
        assert!(!nav.complete(first.id, "old".into()));
        assert!(nav.complete(second.id, "new".into()));
    }

    #[test]
    fn special_pages_skip_resolution() {
        let mut nav = Navigator::new();
        assert_eq!(nav.select(topic(EVALUATION_TOPIC_ID)), Selection::Special(SpecialPage::Evaluation));
        assert!(matches!(nav.view(), View::Special { page: SpecialPage::Evaluation, .. }));
        assert!(!nav.chat_available());

        assert_eq!(
            nav.select(topic(BIBLIOGRAPHY_TOPIC_ID)),
            Selection::Special(SpecialPage::Bibliography)
        );
        assert_eq!(nav.current().unwrap().id, BIBLIOGRAPHY_TOPIC_ID);
    }

    #[test]
    fn stale_completion_never_overwrites_newer_selection() {
        let mut nav = Navigator::new();
        let a = fetch(nav.select(topic("m1-vars")));
        let b = fetch(nav.select(topic("m5-deco")));

        // A resolves after B was requested
        assert!(!nav.complete(a.id, "variables".into()));
        assert!(nav.is_loading());

        assert!(nav.complete(b.id, "decorators".into()));
        assert_eq!(nav.markdown(), Some("decorators"));

        // Late duplicate of A after B is shown
        assert!(!nav.complete(a.id, "variables".into()));
        assert_eq!(nav.markdown(), Some("decorators"));
    }

    #[test]
    fn completion_after_switching_to_special_is_dropped() {
        let mut nav = Navigator::new();
        let request = fetch(nav.select(topic("m1-vars")));
        nav.select(topic(BIBLIOGRAPHY_TOPIC_ID));
        assert!(!nav.complete(request.id, "variables".into()));
        assert!(matches!(nav.view(), View::Special { .. }));
    }

    #[test]
    fn empty_markdown_does_not_count_as_loaded() {
        let mut nav = Navigator::new();
        let request = fetch(nav.select(topic("m1-vars")));
        nav.complete(request.id, String::new());
        assert!(matches!(nav.select(topic("m1-vars")), Selection::Fetch(_)));
    }

    #[tokio::test]
    async fn async_resolution_end_to_end() {
        let resolver = ContentResolver::embedded();
        let mut nav = Navigator::new();

        let request = fetch(nav.select(topic("m3-float")));
        let markdown = resolver.resolve_async(request.topic).await;
        assert!(nav.complete(request.id, markdown));
        assert!(nav.markdown().unwrap().contains("Conteúdo em Desenvolvimento"));
    }
}
