//! Mutation engine
//!
//! Functional updates over the flat list. Every operation takes the list by
//! reference and returns a new one; on error the input is untouched.
//! Entries are addressed by synthetic key only.

use navmenu_hierarchy::{build, is_byte_identical, DuplicateFinding};
use navmenu_model::{KeyAllocator, MenuEntry, SyntheticKey};
use tracing::debug;

use crate::error::{EditError, EditResult};
use crate::ops::{EntryPatch, NewEntry};

/// Result of [`MutationEngine::add`]
#[derive(Debug, Clone, PartialEq)]
pub struct Added {
    /// List with the new entry appended
    pub entries: Vec<MenuEntry>,
    /// The new entry
    pub entry: MenuEntry,
}

/// Applies edits to flat entry lists
///
/// Holds the key allocator used for added entries. The default engine shares
/// the process-wide allocator, so its keys never collide with keys assigned
/// on load.
#[derive(Debug, Clone)]
pub struct MutationEngine {
    keys: KeyAllocator,
}

impl Default for MutationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationEngine {
    /// Engine over the process-wide allocator
    #[must_use]
    pub fn new() -> Self {
        Self::with_allocator(KeyAllocator::global().clone())
    }

    /// Engine over a given allocator
    #[inline]
    #[must_use]
    pub fn with_allocator(keys: KeyAllocator) -> Self {
        Self { keys }
    }

    /// Allocator used for new keys
    #[inline]
    #[must_use]
    pub fn allocator(&self) -> &KeyAllocator {
        &self.keys
    }

    /// Append a new entry under a fresh key
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Validation`] when name or identifier is missing.
    pub fn add(&self, entries: &[MenuEntry], new: NewEntry) -> EditResult<Added> {
        let entry = new.into_entry(self.keys.next_key())?;
        debug!(key = %entry.key(), identifier = ?entry.identifier, "add entry");

        let mut next = entries.to_vec();
        next.push(entry.clone());
        Ok(Added {
            entries: next,
            entry,
        })
    }

    /// Merge `patch` into the entry with `key`
    ///
    /// # Errors
    ///
    /// - [`EditError::Validation`] when the patch empties the name
    /// - [`EditError::NotFound`] when no entry has `key`
    pub fn update(
        &self,
        entries: &[MenuEntry],
        key: &SyntheticKey,
        patch: &EntryPatch,
    ) -> EditResult<Vec<MenuEntry>> {
        patch.validate()?;
        let index = position(entries, key)?;
        debug!(%key, ?patch, "update entry");

        let mut next = entries.to_vec();
        next[index] = patch.apply(&entries[index]);
        Ok(next)
    }

    /// Remove exactly the entry with `key`
    ///
    /// Children keep their `parent` and become roots.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] when no entry has `key`.
    pub fn delete(&self, entries: &[MenuEntry], key: &SyntheticKey) -> EditResult<Vec<MenuEntry>> {
        let index = position(entries, key)?;
        debug!(%key, "delete entry");

        let mut next = entries.to_vec();
        next.remove(index);
        Ok(next)
    }

    /// Drop one of two byte-identical duplicates
    ///
    /// The entry with the larger key goes. Both entries are looked up again
    /// in `entries`, so a finding taken before an edit cannot drop the
    /// edited entry.
    ///
    /// # Errors
    ///
    /// - [`EditError::InvalidOperation`] unless the finding is byte
    ///   identical with exactly two entries, and both entries still are
    /// - [`EditError::NotFound`] when either entry is already gone
    pub fn merge_identical_duplicates(
        &self,
        entries: &[MenuEntry],
        finding: &DuplicateFinding,
    ) -> EditResult<Vec<MenuEntry>> {
        let [first, second] = finding.entries.as_slice() else {
            return Err(EditError::invalid_operation(format!(
                "can only merge exactly 2 duplicates, '{}' has {}",
                finding.identifier,
                finding.entries.len()
            )));
        };
        if !finding.are_byte_identical {
            return Err(EditError::invalid_operation(format!(
                "duplicates of '{}' are not identical",
                finding.identifier
            )));
        }

        let current = (position(entries, first.key())?, position(entries, second.key())?);
        let (a, b) = (&entries[current.0], &entries[current.1]);
        let still_duplicates = a.identifier() == Some(finding.identifier.as_str())
            && b.identifier() == Some(finding.identifier.as_str());
        if !still_duplicates || !is_byte_identical(a, b) {
            return Err(EditError::invalid_operation(format!(
                "duplicates of '{}' changed since they were found",
                finding.identifier
            )));
        }

        let doomed = first.key().max(second.key());
        debug!(identifier = %finding.identifier, key = %doomed, "merge duplicates");
        self.delete(entries, doomed)
    }

    /// Replace the list with a captured snapshot
    #[must_use]
    pub fn reset(&self, baseline: &[MenuEntry]) -> Vec<MenuEntry> {
        debug!(entries = baseline.len(), "reset to baseline");
        baseline.to_vec()
    }

    /// Set or clear the parent of the entry with `key`
    ///
    /// # Errors
    ///
    /// - [`EditError::NotFound`] when no entry has `key`
    /// - [`EditError::Validation`] when `parent` is the entry's own
    ///   identifier or one of its descendants'
    pub fn reparent(
        &self,
        entries: &[MenuEntry],
        key: &SyntheticKey,
        parent: Option<&str>,
    ) -> EditResult<Vec<MenuEntry>> {
        let index = position(entries, key)?;
        let parent = parent.unwrap_or_default();

        if !parent.is_empty() {
            if entries[index].identifier() == Some(parent) {
                return Err(EditError::validation(format!(
                    "'{parent}' cannot be its own parent"
                )));
            }
            let forest = build(entries);
            let descendants = forest
                .find(key)
                .map(|node| node.descendant_keys())
                .unwrap_or_default();
            let under_itself = entries
                .iter()
                .filter(|e| descendants.contains(e.key()))
                .any(|e| e.identifier() == Some(parent));
            if under_itself {
                return Err(EditError::validation(format!(
                    "'{parent}' is a descendant of the entry"
                )));
            }
        }

        self.update(entries, key, &EntryPatch::new().parent(parent))
    }

    /// Set the weight of the entry with `key`
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NotFound`] when no entry has `key`.
    pub fn reorder(
        &self,
        entries: &[MenuEntry],
        key: &SyntheticKey,
        weight: i64,
    ) -> EditResult<Vec<MenuEntry>> {
        self.update(entries, key, &EntryPatch::new().weight(weight))
    }
}

fn position(entries: &[MenuEntry], key: &SyntheticKey) -> EditResult<usize> {
    entries
        .iter()
        .position(|e| e.key() == key)
        .ok_or_else(|| EditError::NotFound(key.clone()))
}
