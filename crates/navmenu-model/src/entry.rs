//! Menu entries
//!
//! Provides [`MenuEntry`], the flat, authoritative form of one navigation
//! menu item, and [`RawEntry`], the shape the codec hands to the identity
//! assigner before keys exist.

use serde_yaml::Mapping;

use crate::key::SyntheticKey;

/// One navigation menu item in the flat list
///
/// The key is fixed at construction and has no setter. Every other field is
/// public and freely replaced by the mutation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    key: SyntheticKey,

    /// Display string
    pub name: Option<String>,

    /// Human identifier, the target of other entries' `parent`
    pub identifier: Option<String>,

    /// Link target
    pub url: Option<String>,

    /// Icon name (`pre` in YAML)
    pub pre: Option<String>,

    /// Identifier of the parent entry
    pub parent: Option<String>,

    /// Sort key among siblings; absent reads as 0
    pub weight: Option<i64>,

    /// Unknown per-entry keys, passed through verbatim
    pub extra: Mapping,
}

impl MenuEntry {
    /// Entry with only a key
    #[inline]
    #[must_use]
    pub fn new(key: SyntheticKey) -> Self {
        Self {
            key,
            name: None,
            identifier: None,
            url: None,
            pre: None,
            parent: None,
            weight: None,
            extra: Mapping::new(),
        }
    }

    /// Synthetic key
    #[inline]
    #[must_use]
    pub fn key(&self) -> &SyntheticKey {
        &self.key
    }

    /// Effective weight
    #[inline]
    #[must_use]
    pub fn weight(&self) -> i64 {
        self.weight.unwrap_or(0)
    }

    /// Human identifier, treating an empty string as absent
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        non_empty(self.identifier.as_deref())
    }

    /// Parent identifier, treating an empty string as absent
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        non_empty(self.parent.as_deref())
    }

    /// Display name, empty string when absent
    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Set name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set identifier
    #[inline]
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Set url
    #[inline]
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set icon
    #[inline]
    #[must_use]
    pub fn with_pre(mut self, pre: impl Into<String>) -> Self {
        self.pre = Some(pre.into());
        self
    }

    /// Set parent identifier
    #[inline]
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set weight
    #[inline]
    #[must_use]
    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Entry as decoded, before key assignment
///
/// May carry a preserved key (in-memory round trips only) and nested
/// `children` from the naturally nested YAML layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    /// Preserved key, if any
    pub key: Option<SyntheticKey>,
    /// Display string
    pub name: Option<String>,
    /// Human identifier
    pub identifier: Option<String>,
    /// Link target
    pub url: Option<String>,
    /// Icon name
    pub pre: Option<String>,
    /// Parent identifier
    pub parent: Option<String>,
    /// Sort key
    pub weight: Option<i64>,
    /// Nested children
    pub children: Vec<RawEntry>,
    /// Unknown keys
    pub extra: Mapping,
}

impl RawEntry {
    /// Raw entry with a name and identifier
    #[must_use]
    pub fn named(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            identifier: Some(identifier.into()),
            ..Self::default()
        }
    }

    /// Entry with this raw entry's fields under `key`, children dropped
    pub(crate) fn into_entry(self, key: SyntheticKey) -> (MenuEntry, Vec<RawEntry>) {
        let entry = MenuEntry {
            key,
            name: self.name,
            identifier: self.identifier,
            url: self.url,
            pre: self.pre,
            parent: self.parent,
            weight: self.weight,
            extra: self.extra,
        };
        (entry, self.children)
    }
}

impl From<MenuEntry> for RawEntry {
    fn from(entry: MenuEntry) -> Self {
        Self {
            key: Some(entry.key),
            name: entry.name,
            identifier: entry.identifier,
            url: entry.url,
            pre: entry.pre,
            parent: entry.parent,
            weight: entry.weight,
            children: Vec::new(),
            extra: entry.extra,
        }
    }
}

/// Collapse an empty optional string to absent
#[inline]
#[must_use]
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[inline]
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
