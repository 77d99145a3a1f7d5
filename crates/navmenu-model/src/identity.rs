//! Identity assignment
//!
//! Turns decoded [`RawEntry`] values into keyed [`MenuEntry`] values:
//! - Entries without a key get a freshly minted one
//! - Preserved keys are kept verbatim (a repeated preserved key is re-minted)
//! - Nested `children` are flattened depth-first, parent before children,
//!   and a child without a `parent` inherits its enclosing entry's identifier

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::entry::{MenuEntry, RawEntry};
use crate::key::KeyAllocator;

impl KeyAllocator {
    /// Assign keys and flatten nesting
    ///
    /// Idempotent: feeding the output back in (via `RawEntry::from`) returns
    /// it unchanged.
    #[must_use]
    pub fn assign(&self, raw: Vec<RawEntry>) -> Vec<MenuEntry> {
        self.observe_all(&raw);

        let mut out = Vec::with_capacity(raw.len());
        let mut seen = HashSet::new();
        let mut nested = 0usize;

        // Explicit stack: (entry, identifier of the enclosing entry)
        let mut stack: Vec<(RawEntry, Option<String>)> =
            raw.into_iter().rev().map(|e| (e, None)).collect();

        while let Some((mut raw, enclosing)) = stack.pop() {
            if let Some(enclosing) = enclosing {
                nested += 1;
                if raw.parent.as_deref().map_or(true, str::is_empty) {
                    raw.parent = Some(enclosing);
                }
            }

            let key = match raw.key.take() {
                Some(key) if !seen.contains(&key) => key,
                Some(key) => {
                    let fresh = self.next_key();
                    warn!(repeated = %key, replacement = %fresh, "repeated synthetic key re-minted");
                    fresh
                }
                None => self.next_key(),
            };
            seen.insert(key.clone());

            let own_identifier = raw.identifier.clone().filter(|s| !s.is_empty());
            let (entry, children) = raw.into_entry(key);
            out.push(entry);

            for child in children.into_iter().rev() {
                stack.push((child, own_identifier.clone()));
            }
        }

        if nested > 0 {
            debug!(nested, total = out.len(), "flattened nested menu entries");
        }
        out
    }

    fn observe_all(&self, raw: &[RawEntry]) {
        for entry in raw {
            if let Some(key) = &entry.key {
                self.observe(key);
            }
            self.observe_all(&entry.children);
        }
    }
}

/// Assign keys with the process-wide allocator
#[inline]
#[must_use]
pub fn assign(raw: Vec<RawEntry>) -> Vec<MenuEntry> {
    KeyAllocator::global().assign(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::SyntheticKey;
    use pretty_assertions::assert_eq;

    #[test]
    fn assigns_fresh_keys_in_order() {
        let alloc = KeyAllocator::new();
        let out = alloc.assign(vec![RawEntry::named("A", "a"), RawEntry::named("B", "b")]);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].key(), &SyntheticKey::from_sequence(1));
        assert_eq!(out[1].key(), &SyntheticKey::from_sequence(2));
        assert_eq!(out[1].name.as_deref(), Some("B"));
    }

    #[test]
    fn preserves_existing_keys() {
        let alloc = KeyAllocator::new();
        let preserved = SyntheticKey::new("test-uid-1").unwrap();
        let raw = RawEntry {
            key: Some(preserved.clone()),
            ..RawEntry::named("Home", "home")
        };

        let out = alloc.assign(vec![raw]);
        assert_eq!(out[0].key(), &preserved);
    }

    #[test]
    fn fresh_keys_skip_preserved_ones() {
        let alloc = KeyAllocator::new();
        let raw = vec![
            RawEntry::named("A", "a"),
            RawEntry {
                key: Some(SyntheticKey::from_sequence(1)),
                ..RawEntry::named("B", "b")
            },
        ];

        let out = alloc.assign(raw);
        assert_eq!(out[1].key(), &SyntheticKey::from_sequence(1));
        assert_ne!(out[0].key(), out[1].key());
    }

    #[test]
    fn repeated_preserved_key_is_reminted() {
        let alloc = KeyAllocator::new();
        let shared = SyntheticKey::new("dup").unwrap();
        let raw = vec![
            RawEntry {
                key: Some(shared.clone()),
                ..RawEntry::named("A", "a")
            },
            RawEntry {
                key: Some(shared.clone()),
                ..RawEntry::named("B", "b")
            },
        ];

        let out = alloc.assign(raw);
        assert_eq!(out[0].key(), &shared);
        assert_ne!(out[1].key(), &shared);
    }

    #[test]
    fn second_pass_is_a_noop() {
        let alloc = KeyAllocator::new();
        let first = alloc.assign(vec![RawEntry::named("A", "a"), RawEntry::named("B", "b")]);
        let second = alloc.assign(first.iter().cloned().map(RawEntry::from).collect());
        assert_eq!(first, second);
    }

    #[test]
    fn flattens_children_and_links_parent() {
        let alloc = KeyAllocator::new();
        let grandchild = RawEntry::named("C", "c");
        let child = RawEntry {
            children: vec![grandchild],
            ..RawEntry::named("B", "b")
        };
        let explicit = RawEntry {
            parent: Some("elsewhere".into()),
            ..RawEntry::named("D", "d")
        };
        let root = RawEntry {
            children: vec![child, explicit],
            ..RawEntry::named("A", "a")
        };
        let sibling = RawEntry::named("E", "e");

        let out = alloc.assign(vec![root, sibling]);
        let names: Vec<_> = out.iter().map(|e| e.display_name()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);

        assert_eq!(out[0].parent, None);
        assert_eq!(out[1].parent.as_deref(), Some("a"));
        assert_eq!(out[2].parent.as_deref(), Some("b"));
        // An explicit parent wins over the nesting
        assert_eq!(out[3].parent.as_deref(), Some("elsewhere"));
        assert_eq!(out[4].parent, None);
    }

    #[test]
    fn child_of_unidentified_entry_stays_unlinked() {
        let alloc = KeyAllocator::new();
        let root = RawEntry {
            name: Some("Anon".into()),
            children: vec![RawEntry::named("Child", "child")],
            ..RawEntry::default()
        };

        let out = alloc.assign(vec![root]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].parent, None);
    }
}
