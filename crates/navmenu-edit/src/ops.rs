//! Edit payloads
//!
//! [`NewEntry`] carries the fields of an entry to add. [`EntryPatch`]
//! carries the fields to change on an existing one; an absent field is left
//! alone and `Some("")` clears it.

use navmenu_model::{normalize_optional, MenuEntry, SyntheticKey};
use serde_yaml::Mapping;

use crate::error::{EditError, EditResult};

/// Fields of an entry about to be added
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEntry {
    /// Display string, required
    pub name: Option<String>,
    /// Human identifier, required
    pub identifier: Option<String>,
    /// Link target
    pub url: Option<String>,
    /// Icon name
    pub pre: Option<String>,
    /// Parent identifier
    pub parent: Option<String>,
    /// Sort key
    pub weight: Option<i64>,
    /// Extra YAML keys
    pub extra: Mapping,
}

impl NewEntry {
    /// New entry with the two required fields
    #[must_use]
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            identifier: Some(identifier.into()),
            ..Self::default()
        }
    }

    /// Set url
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set icon
    #[must_use]
    pub fn with_pre(mut self, pre: impl Into<String>) -> Self {
        self.pre = Some(pre.into());
        self
    }

    /// Set parent identifier
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set weight
    #[must_use]
    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Build the entry under `key`
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Validation`] when name or identifier is missing
    /// or empty.
    pub(crate) fn into_entry(self, key: SyntheticKey) -> EditResult<MenuEntry> {
        let name = normalize_optional(self.name)
            .ok_or_else(|| EditError::validation("name is required"))?;
        let identifier = normalize_optional(self.identifier)
            .ok_or_else(|| EditError::validation("identifier is required"))?;

        let mut entry = MenuEntry::new(key)
            .with_name(name)
            .with_identifier(identifier);
        entry.url = normalize_optional(self.url);
        entry.pre = normalize_optional(self.pre);
        entry.parent = normalize_optional(self.parent);
        entry.weight = self.weight;
        entry.extra = self.extra;
        Ok(entry)
    }
}

/// Changes to apply to one entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    /// New name; may not be empty
    pub name: Option<String>,
    /// New identifier; empty clears
    pub identifier: Option<String>,
    /// New url; empty clears
    pub url: Option<String>,
    /// New icon; empty clears
    pub pre: Option<String>,
    /// New parent; empty clears
    pub parent: Option<String>,
    /// New weight
    pub weight: Option<i64>,
}

impl EntryPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set or clear identifier
    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Set or clear url
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set or clear icon
    #[must_use]
    pub fn pre(mut self, pre: impl Into<String>) -> Self {
        self.pre = Some(pre.into());
        self
    }

    /// Set or clear parent
    #[must_use]
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set weight
    #[must_use]
    pub fn weight(mut self, weight: i64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Check if the patch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reject patches that cannot apply to any entry
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Validation`] when the patch empties the name.
    pub fn validate(&self) -> EditResult<()> {
        match self.name.as_deref() {
            Some("") => Err(EditError::validation("name may not be cleared")),
            _ => Ok(()),
        }
    }

    /// Entry with this patch merged in
    ///
    /// A field set by the patch also drops any passthrough copy of it kept
    /// from an uncoercible load.
    pub(crate) fn apply(&self, entry: &MenuEntry) -> MenuEntry {
        let mut patched = entry.clone();
        if let Some(name) = &self.name {
            patched.name = Some(name.clone());
            patched.extra.shift_remove("name");
        }
        merge_text(&mut patched.extra, "identifier", self.identifier.as_ref(), &mut patched.identifier);
        merge_text(&mut patched.extra, "url", self.url.as_ref(), &mut patched.url);
        merge_text(&mut patched.extra, "pre", self.pre.as_ref(), &mut patched.pre);
        merge_text(&mut patched.extra, "parent", self.parent.as_ref(), &mut patched.parent);
        if let Some(weight) = self.weight {
            patched.weight = Some(weight);
            patched.extra.shift_remove("weight");
        }
        patched
    }
}

fn merge_text(extra: &mut Mapping, field: &str, value: Option<&String>, current: &mut Option<String>) {
    if let Some(value) = value {
        *current = normalize_optional(Some(value.clone()));
        extra.shift_remove(field);
    }
}
