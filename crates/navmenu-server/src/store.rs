//! In-memory menu store
//!
//! Holds the posted JSON document verbatim. One lock guards it; the last
//! write wins.

use std::sync::Arc;

use parking_lot::RwLock;

/// Shared handle to the stored document
#[derive(Debug, Clone, Default)]
pub struct MenuStore {
    inner: Arc<RwLock<Option<serde_json::Value>>>,
}

impl MenuStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the stored document
    #[must_use]
    pub fn get(&self) -> Option<serde_json::Value> {
        self.inner.read().clone()
    }

    /// Replace the stored document
    pub fn set(&self, document: serde_json::Value) {
        *self.inner.write() = Some(document);
    }

    /// Drop the stored document
    pub fn clear(&self) {
        *self.inner.write() = None;
    }

    /// Check if nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let store = MenuStore::new();
        assert!(store.is_empty());

        let other = store.clone();
        store.set(serde_json::json!({"a": 1}));
        other.set(serde_json::json!({"a": 2}));
        assert_eq!(store.get(), Some(serde_json::json!({"a": 2})));

        store.clear();
        assert!(other.is_empty());
    }
}
