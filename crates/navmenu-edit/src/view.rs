//! View state
//!
//! Expansion, search and scroll target, kept apart from the flat list.
//! Expansion is keyed by synthetic key, so renaming an identifier never
//! collapses or expands anything by accident.

use std::collections::BTreeSet;

use navmenu_hierarchy::{build, Forest};
use navmenu_model::{MenuEntry, SyntheticKey};

/// Per-user presentation state for one menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Keys of expanded nodes
    pub expanded: BTreeSet<SyntheticKey>,

    /// Current search term, empty for no filter
    pub search: String,

    /// Entry the view should scroll to next
    pub scroll_target: Option<SyntheticKey>,
}

impl ViewState {
    /// Empty view state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand every root when nothing is expanded yet
    pub fn initialize(&mut self, entries: &[MenuEntry]) {
        if self.expanded.is_empty() {
            self.expanded.extend(build(entries).root_keys());
        }
    }

    /// Flip the expansion of `key`
    pub fn toggle(&mut self, key: &SyntheticKey) {
        if !self.expanded.remove(key) {
            self.expanded.insert(key.clone());
        }
    }

    /// Check if `key` is expanded
    #[inline]
    #[must_use]
    pub fn is_expanded(&self, key: &SyntheticKey) -> bool {
        self.expanded.contains(key)
    }

    /// Expand every node
    pub fn expand_all(&mut self, entries: &[MenuEntry]) {
        self.expanded = entries.iter().map(|e| e.key().clone()).collect();
    }

    /// Collapse everything below the roots
    pub fn collapse_all(&mut self, entries: &[MenuEntry]) {
        self.expanded = build(entries).root_keys().into_iter().collect();
    }

    /// Forget all expansion and the scroll target
    pub fn clear(&mut self) {
        self.expanded.clear();
        self.scroll_target = None;
    }

    /// Expand every ancestor of `key` and scroll to it
    pub fn ensure_visible(&mut self, entries: &[MenuEntry], key: &SyntheticKey) {
        self.expanded.extend(build(entries).path_to(key));
        self.scroll_target = Some(key.clone());
    }

    /// Take the pending scroll target
    pub fn take_scroll_target(&mut self) -> Option<SyntheticKey> {
        self.scroll_target.take()
    }

    /// Replace the search term
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Rows shown for `entries` under the current expansion
    #[must_use]
    pub fn visible_count(&self, entries: &[MenuEntry]) -> usize {
        build(entries).visible_count(|key| self.is_expanded(key))
    }

    /// Forest restricted by the search term
    #[must_use]
    pub fn filtered(&self, entries: &[MenuEntry]) -> Forest {
        build(entries).filter(&self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u64) -> SyntheticKey {
        SyntheticKey::from_sequence(n)
    }

    fn entries() -> Vec<MenuEntry> {
        vec![
            MenuEntry::new(key(1)).with_name("A").with_identifier("a"),
            MenuEntry::new(key(2))
                .with_name("B")
                .with_identifier("b")
                .with_parent("a"),
            MenuEntry::new(key(3))
                .with_name("C")
                .with_identifier("c")
                .with_parent("b"),
            MenuEntry::new(key(4)).with_name("D").with_identifier("d"),
        ]
    }

    #[test]
    fn initialize_expands_roots_once() {
        let mut view = ViewState::new();
        view.initialize(&entries());
        assert_eq!(view.expanded, BTreeSet::from([key(1), key(4)]));
        assert_eq!(view.visible_count(&entries()), 3);

        view.toggle(&key(1));
        view.toggle(&key(4));
        view.toggle(&key(2));
        view.initialize(&entries());
        assert_eq!(view.expanded, BTreeSet::from([key(2)]));
    }

    #[test]
    fn expand_and_collapse_all() {
        let mut view = ViewState::new();
        view.expand_all(&entries());
        assert_eq!(view.visible_count(&entries()), 4);
        view.collapse_all(&entries());
        assert_eq!(view.visible_count(&entries()), 3);
        view.clear();
        assert_eq!(view.visible_count(&entries()), 2);
    }

    #[test]
    fn ensure_visible_expands_ancestors() {
        let mut view = ViewState::new();
        view.ensure_visible(&entries(), &key(3));
        assert!(view.is_expanded(&key(1)));
        assert!(view.is_expanded(&key(2)));
        assert!(!view.is_expanded(&key(3)));
        assert_eq!(view.take_scroll_target(), Some(key(3)));
        assert_eq!(view.take_scroll_target(), None);
    }

    #[test]
    fn filtered_uses_search_term() {
        let mut view = ViewState::new();
        view.set_search("c");
        let forest = view.filtered(&entries());
        assert_eq!(forest.len(), 3);
        assert_eq!(forest.roots.len(), 1);
    }
}
