//! Edit session
//!
//! [`EditSession`] owns one loaded [`Document`]: the baseline captured on
//! load and the current working copy. Every edit goes through the
//! [`MutationEngine`] and replaces the working copy only on success. An
//! open [`DuplicateResolution`] is refreshed after each update or delete.

use navmenu_hierarchy::{build, DuplicateFinding, Forest, IntegrityReport};
use navmenu_model::{Document, MenuEntry, SyntheticKey};
use tracing::debug;

use crate::engine::MutationEngine;
use crate::error::EditResult;
use crate::ops::{EntryPatch, NewEntry};
use crate::resolution::{DuplicateResolution, Refresh};

/// Baseline plus working copy of one menu
#[derive(Debug, Clone)]
pub struct EditSession {
    engine: MutationEngine,
    baseline: Document,
    current: Document,
    resolution: Option<DuplicateResolution>,
}

impl EditSession {
    /// Session over a freshly loaded document
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self::with_engine(document, MutationEngine::new())
    }

    /// Session with a given engine
    #[must_use]
    pub fn with_engine(document: Document, engine: MutationEngine) -> Self {
        debug!(entries = document.len(), "session opened");
        Self {
            engine,
            baseline: document.clone(),
            current: document,
            resolution: None,
        }
    }

    /// Working copy
    #[inline]
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.current
    }

    /// Entries of the working copy
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.current.entries
    }

    /// Document as loaded
    #[inline]
    #[must_use]
    pub fn baseline(&self) -> &Document {
        &self.baseline
    }

    /// Check if the working copy differs from the baseline
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.current != self.baseline
    }

    /// Derived forest of the working copy
    #[must_use]
    pub fn forest(&self) -> Forest {
        build(self.entries())
    }

    /// Integrity findings for the working copy
    #[must_use]
    pub fn integrity(&self) -> IntegrityReport {
        IntegrityReport::analyze(self.entries())
    }

    /// Add an entry and return it
    ///
    /// # Errors
    ///
    /// See [`MutationEngine::add`].
    pub fn add(&mut self, new: NewEntry) -> EditResult<MenuEntry> {
        let added = self.engine.add(self.entries(), new)?;
        self.commit(added.entries);
        Ok(added.entry)
    }

    /// Patch the entry with `key`
    ///
    /// # Errors
    ///
    /// See [`MutationEngine::update`].
    pub fn update(&mut self, key: &SyntheticKey, patch: &EntryPatch) -> EditResult<()> {
        let next = self.engine.update(self.entries(), key, patch)?;
        self.commit(next);
        Ok(())
    }

    /// Delete the entry with `key`
    ///
    /// # Errors
    ///
    /// See [`MutationEngine::delete`].
    pub fn delete(&mut self, key: &SyntheticKey) -> EditResult<()> {
        let next = self.engine.delete(self.entries(), key)?;
        self.commit(next);
        Ok(())
    }

    /// Merge two byte-identical duplicates
    ///
    /// # Errors
    ///
    /// See [`MutationEngine::merge_identical_duplicates`].
    pub fn merge_identical_duplicates(&mut self, finding: &DuplicateFinding) -> EditResult<()> {
        let next = self
            .engine
            .merge_identical_duplicates(self.entries(), finding)?;
        self.commit(next);
        Ok(())
    }

    /// Move the entry with `key` under `parent`, or to the top with `None`
    ///
    /// # Errors
    ///
    /// See [`MutationEngine::reparent`].
    pub fn reparent(&mut self, key: &SyntheticKey, parent: Option<&str>) -> EditResult<()> {
        let next = self.engine.reparent(self.entries(), key, parent)?;
        self.commit(next);
        Ok(())
    }

    /// Change the weight of the entry with `key`
    ///
    /// # Errors
    ///
    /// See [`MutationEngine::reorder`].
    pub fn reorder(&mut self, key: &SyntheticKey, weight: i64) -> EditResult<()> {
        let next = self.engine.reorder(self.entries(), key, weight)?;
        self.commit(next);
        Ok(())
    }

    /// Discard all edits
    pub fn reset(&mut self) {
        let entries = self.engine.reset(&self.baseline.entries);
        self.current = self.baseline.with_entries(entries);
        self.resolution = None;
    }

    /// Start resolving `finding`
    pub fn start_resolving(&mut self, finding: &DuplicateFinding) -> &DuplicateResolution {
        debug!(identifier = %finding.identifier, "resolving duplicates");
        self.resolution
            .insert(DuplicateResolution::open(finding, &self.current.entries))
    }

    /// Open resolution, if any
    #[inline]
    #[must_use]
    pub fn resolution(&self) -> Option<&DuplicateResolution> {
        self.resolution.as_ref()
    }

    /// Abandon the open resolution
    pub fn cancel_resolution(&mut self) {
        self.resolution = None;
    }

    /// Install a new working list and refresh any open resolution
    fn commit(&mut self, entries: Vec<MenuEntry>) {
        self.current.entries = entries;
        self.refresh_resolution();
    }

    fn refresh_resolution(&mut self) {
        if let Some(open) = self.resolution.take() {
            self.resolution = match open.refresh(&self.current.entries) {
                Refresh::Open(still) => Some(still),
                Refresh::Closed => {
                    debug!("duplicate resolution closed");
                    None
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navmenu_model::KeyAllocator;

    fn session() -> EditSession {
        let keys = KeyAllocator::new();
        let entries = keys.assign(vec![
            navmenu_model::RawEntry::named("A", "dup"),
            navmenu_model::RawEntry::named("A", "dup"),
            navmenu_model::RawEntry::named("B", "b"),
        ]);
        EditSession::with_engine(Document::new(entries), MutationEngine::with_allocator(keys))
    }

    #[test]
    fn tracks_dirty_and_resets() {
        let mut session = session();
        assert!(!session.is_dirty());

        let added = session.add(NewEntry::new("C", "c")).unwrap();
        assert_eq!(added.key().as_str(), "item_4");
        assert!(session.is_dirty());

        session.reset();
        assert!(!session.is_dirty());
        assert_eq!(session.entries().len(), 3);
    }

    #[test]
    fn failed_edit_leaves_copy_untouched() {
        let mut session = session();
        let before = session.document().clone();
        assert!(session.update(&SyntheticKey::from_sequence(99), &EntryPatch::new()).is_err());
        assert_eq!(session.document(), &before);
    }

    #[test]
    fn resolution_closes_after_rename() {
        let mut session = session();
        let finding = session.integrity().duplicates.remove(0);
        session.start_resolving(&finding);
        assert_eq!(session.resolution().map(|r| r.entries().len()), Some(2));

        let second = finding.entries[1].key().clone();
        session
            .update(&second, &EntryPatch::new().identifier("dup_2"))
            .unwrap();
        assert!(session.resolution().is_none());
        assert!(session.integrity().duplicates.is_empty());
    }

    #[test]
    fn resolution_follows_added_duplicate() {
        let mut session = session();
        let finding = session.integrity().duplicates.remove(0);
        session.start_resolving(&finding);

        let added = session.add(NewEntry::new("A again", "dup")).unwrap();
        let open = session.resolution().unwrap();
        assert_eq!(open.entries().len(), 3);
        assert!(open.entries().iter().any(|e| e.key() == added.key()));
    }
}
