//! Sidebar accordion and cursor
//!
//! The chapter holding the current topic is pinned open. Besides it, at most
//! one chapter the user opened by hand is expanded at a time.

use crate::curriculum::{Curriculum, Topic};

/// A row in the flattened sidebar tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarItem {
    Chapter(usize),
    Topic(usize, usize),
}

#[derive(Debug, Clone)]
pub struct SidebarState {
    pinned: Option<usize>,
    open: Option<usize>,
    /// Cursor row in the flattened tree
    pub selected_index: usize,
    /// First visible row
    pub scroll_offset: usize,
    /// Visible height in rows (updated on render)
    pub visible_height: usize,
}

impl Default for SidebarState {
    fn default() -> Self {
        // With nothing selected the first chapter starts open
        Self { pinned: None, open: Some(0), selected_index: 0, scroll_offset: 0, visible_height: 0 }
    }
}

impl SidebarState {
    pub fn is_expanded(&self, chapter: usize) -> bool {
        self.pinned == Some(chapter) || self.open == Some(chapter)
    }

    pub fn pinned(&self) -> Option<usize> {
        self.pinned
    }

    /// Expanded chapter indices, ascending
    pub fn expanded(&self) -> Vec<usize> {
        let mut chapters: Vec<usize> = self.pinned.into_iter().chain(self.open).collect();
        chapters.sort_unstable();
        chapters.dedup();
        chapters
    }

    /// Open or close a chapter by hand; the pinned chapter cannot be closed
    pub fn toggle(&mut self, chapter: usize) {
        if self.pinned == Some(chapter) {
            return;
        }
        self.open = if self.open == Some(chapter) { None } else { Some(chapter) };
    }

    /// Pin the chapter of a newly selected topic and collapse the hand-opened one
    pub fn reveal(&mut self, chapter: usize) {
        self.pinned = Some(chapter);
        self.open = None;
    }

    /// Rows in display order
    pub fn items(&self, curriculum: &Curriculum) -> Vec<SidebarItem> {
        let mut items = Vec::new();
        for (chapter_idx, chapter) in curriculum.chapters().iter().enumerate() {
            items.push(SidebarItem::Chapter(chapter_idx));
            if self.is_expanded(chapter_idx) {
                items.extend((0..chapter.topics.len()).map(|t| SidebarItem::Topic(chapter_idx, t)));
            }
        }
        items
    }

    pub fn item_at(&self, curriculum: &Curriculum, index: usize) -> Option<SidebarItem> {
        self.items(curriculum).get(index).copied()
    }

    /// Topic under the cursor, if the cursor is on a topic row
    pub fn selected_topic(&self, curriculum: &Curriculum) -> Option<&'static Topic> {
        match self.item_at(curriculum, self.selected_index)? {
            SidebarItem::Topic(c, t) => curriculum.chapters().get(c)?.topics.get(t),
            SidebarItem::Chapter(_) => None,
        }
    }

    /// Move the cursor onto a topic row, if it is visible
    pub fn focus_topic(&mut self, curriculum: &Curriculum, topic_id: &str) {
        let position = self.items(curriculum).iter().position(|item| match item {
            SidebarItem::Topic(c, t) => curriculum.chapters()[*c].topics[*t].id == topic_id,
            SidebarItem::Chapter(_) => false,
        });
        if let Some(index) = position {
            self.selected_index = index;
            self.ensure_selection_visible();
        }
    }

    pub fn move_down(&mut self, curriculum: &Curriculum) {
        let count = self.items(curriculum).len();
        if self.selected_index + 1 < count {
            self.selected_index += 1;
        }
        self.ensure_selection_visible();
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
        self.ensure_selection_visible();
    }

    pub fn move_to_top(&mut self) {
        self.selected_index = 0;
        self.ensure_selection_visible();
    }

    pub fn move_to_bottom(&mut self, curriculum: &Curriculum) {
        self.selected_index = self.items(curriculum).len().saturating_sub(1);
        self.ensure_selection_visible();
    }

    /// Keep the cursor on a valid row after the tree shrank
    pub fn clamp_selection(&mut self, curriculum: &Curriculum) {
        let count = self.items(curriculum).len();
        self.selected_index = self.selected_index.min(count.saturating_sub(1));
        self.ensure_selection_visible();
    }

    /// Ensure the selected item is visible by adjusting scroll offset
    pub fn ensure_selection_visible(&mut self) {
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        }
        let visible = self.visible_height;
        if visible > 0 && self.selected_index >= self.scroll_offset + visible {
            self.scroll_offset = self.selected_index + 1 - visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::CURRICULUM;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn first_chapter_open_without_selection() {
        let sidebar = SidebarState::default();
        assert_eq!(sidebar.expanded(), vec![0]);
        assert_eq!(sidebar.pinned(), None);
    }

    #[test]
    fn toggle_is_an_accordion() {
        let mut sidebar = SidebarState::default();
        sidebar.toggle(3);
        assert_eq!(sidebar.expanded(), vec![3]);
        sidebar.toggle(5);
        assert_eq!(sidebar.expanded(), vec![5]);
        sidebar.toggle(5);
        assert!(sidebar.expanded().is_empty());
    }

    #[test]
    fn pinned_chapter_stays_open() {
        let mut sidebar = SidebarState::default();
        sidebar.reveal(2);
        sidebar.toggle(2);
        assert!(sidebar.is_expanded(2));

        sidebar.toggle(4);
        assert_eq!(sidebar.expanded(), vec![2, 4]);

        // A new selection collapses the hand-opened chapter
        sidebar.reveal(7);
        assert_eq!(sidebar.expanded(), vec![7]);
    }

    #[test]
    fn items_follow_expansion() {
        let mut sidebar = SidebarState::default();
        let chapters = CURRICULUM.chapters().len();
        let first_len = CURRICULUM.chapters()[0].topics.len();

        assert_eq!(sidebar.items(&CURRICULUM).len(), chapters + first_len);
        assert_eq!(sidebar.item_at(&CURRICULUM, 0), Some(SidebarItem::Chapter(0)));
        assert_eq!(sidebar.item_at(&CURRICULUM, 1), Some(SidebarItem::Topic(0, 0)));
        assert_eq!(sidebar.item_at(&CURRICULUM, first_len + 1), Some(SidebarItem::Chapter(1)));

        sidebar.toggle(0);
        assert_eq!(sidebar.items(&CURRICULUM).len(), chapters);
    }

    #[test]
    fn selected_topic_resolves_rows() {
        let mut sidebar = SidebarState::default();
        assert_eq!(sidebar.selected_topic(&CURRICULUM), None);
        sidebar.move_down(&CURRICULUM);
        assert_eq!(sidebar.selected_topic(&CURRICULUM).unwrap().id, "m1-what-is");
    }

    #[test]
    fn focus_topic_moves_cursor() {
        let mut sidebar = SidebarState::default();
        let chapter = CURRICULUM.chapter_index_of("m5-deco").unwrap();
        sidebar.reveal(chapter);
        sidebar.focus_topic(&CURRICULUM, "m5-deco");
        assert_eq!(sidebar.selected_topic(&CURRICULUM).unwrap().id, "m5-deco");
    }

    #[test]
    fn scrolling_keeps_cursor_visible() {
        let mut sidebar = SidebarState { visible_height: 5, ..SidebarState::default() };
        for _ in 0..8 {
            sidebar.move_down(&CURRICULUM);
        }
        assert_eq!(sidebar.selected_index, 8);
        assert_eq!(sidebar.scroll_offset, 4);
        sidebar.move_to_top();
        assert_eq!(sidebar.scroll_offset, 0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Toggle(usize),
        Reveal(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![(0usize..12).prop_map(Op::Toggle), (0usize..12).prop_map(Op::Reveal)]
    }

    proptest! {
        #[test]
        fn at_most_one_unpinned_chapter_is_open(ops in proptest::collection::vec(op(), 0..64)) {
            let mut sidebar = SidebarState::default();
            for op in ops {
                match op {
                    Op::Toggle(c) => sidebar.toggle(c),
                    Op::Reveal(c) => sidebar.reveal(c),
                }
                let unpinned = sidebar.expanded().into_iter().filter(|c| Some(*c) != sidebar.pinned()).count();
                prop_assert!(unpinned <= 1);
                if let Some(pinned) = sidebar.pinned() {
                    prop_assert!(sidebar.is_expanded(pinned));
                }
            }
        }
    }
}
