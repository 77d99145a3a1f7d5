//! Duplicate resolution
//!
//! A [`DuplicateResolution`] tracks the entries sharing one identifier
//! while the user edits or deletes them. After each edit it is refreshed
//! against the new list and closes once at most one entry is left.

use navmenu_hierarchy::{diff_entries, DuplicateFinding, FieldDiff};
use navmenu_model::MenuEntry;

/// Open resolution for one duplicated identifier
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateResolution {
    identifier: String,
    entries: Vec<MenuEntry>,
}

/// Outcome of [`DuplicateResolution::refresh`]
#[derive(Debug, Clone, PartialEq)]
pub enum Refresh {
    /// Two or more entries still share the identifier
    Open(DuplicateResolution),
    /// Nothing left to resolve
    Closed,
}

impl DuplicateResolution {
    /// Start resolving `finding` against the current list
    #[must_use]
    pub fn open(finding: &DuplicateFinding, entries: &[MenuEntry]) -> Self {
        Self {
            identifier: finding.identifier.clone(),
            entries: carrying(&finding.identifier, entries),
        }
    }

    /// Identifier under resolution
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Entries still carrying the identifier, in list order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Re-collect against `entries`, closing at one entry or fewer
    #[must_use]
    pub fn refresh(self, entries: &[MenuEntry]) -> Refresh {
        let remaining = carrying(&self.identifier, entries);
        if remaining.len() <= 1 {
            Refresh::Closed
        } else {
            Refresh::Open(Self {
                identifier: self.identifier,
                entries: remaining,
            })
        }
    }

    /// Field comparison when exactly two entries remain
    #[must_use]
    pub fn diff(&self) -> Option<Vec<FieldDiff>> {
        match self.entries.as_slice() {
            [left, right] => Some(diff_entries(left, right)),
            _ => None,
        }
    }
}

fn carrying(identifier: &str, entries: &[MenuEntry]) -> Vec<MenuEntry> {
    entries
        .iter()
        .filter(|e| e.identifier() == Some(identifier))
        .cloned()
        .collect()
}
