//! Menu document
//!
//! [`Document`] wraps the flat entry list together with every YAML field the
//! engine does not own, so a load/save cycle never loses unrelated config.

use serde_yaml::Mapping;

use crate::entry::MenuEntry;
use crate::key::SyntheticKey;

/// A loaded menu document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Flat entry list, the single source of truth
    pub entries: Vec<MenuEntry>,

    /// Keys next to `main` inside `menu`
    pub menu_extra: Mapping,

    /// Top-level keys other than `menu`
    pub extra: Mapping,
}

impl Document {
    /// Document holding only entries
    #[inline]
    #[must_use]
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry with the given key
    #[must_use]
    pub fn find(&self, key: &SyntheticKey) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.key() == key)
    }

    /// Same passthrough fields with a replaced entry list
    #[inline]
    #[must_use]
    pub fn with_entries(&self, entries: Vec<MenuEntry>) -> Self {
        Self {
            entries,
            menu_extra: self.menu_extra.clone(),
            extra: self.extra.clone(),
        }
    }
}
