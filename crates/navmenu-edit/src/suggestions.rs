//! Parent suggestions
//!
//! Candidates for an entry's `parent` field, matched against what the user
//! typed so far. The entry being edited and its descendants are never
//! offered.

use std::collections::HashSet;

use navmenu_hierarchy::build;
use navmenu_model::{MenuEntry, SyntheticKey};

/// Number of suggestions returned when the caller has no preference
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// One candidate parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentSuggestion {
    /// Value to store in `parent`
    pub value: String,
    /// `"<name> (<identifier or no-id>)"`
    pub label: String,
    /// Key of the candidate
    pub key: SyntheticKey,
}

/// Up to `limit` candidate parents whose name or identifier contains `input`
///
/// Matching is case-insensitive. An empty input yields nothing.
#[must_use]
pub fn parent_suggestions(
    entries: &[MenuEntry],
    editing: Option<&SyntheticKey>,
    input: &str,
    limit: usize,
) -> Vec<ParentSuggestion> {
    if input.is_empty() {
        return Vec::new();
    }
    let needle = input.to_lowercase();

    let mut excluded: HashSet<SyntheticKey> = HashSet::new();
    if let Some(key) = editing {
        excluded.insert(key.clone());
        if let Some(node) = build(entries).find(key) {
            excluded.extend(node.descendant_keys());
        }
    }

    entries
        .iter()
        .filter(|e| !excluded.contains(e.key()))
        .filter(|e| {
            [e.name.as_deref(), e.identifier()]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .take(limit)
        .map(|e| ParentSuggestion {
            value: e
                .identifier()
                .unwrap_or_else(|| e.display_name())
                .to_owned(),
            label: format!("{} ({})", e.display_name(), e.identifier().unwrap_or("no-id")),
            key: e.key().clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u64) -> SyntheticKey {
        SyntheticKey::from_sequence(n)
    }

    #[test]
    fn excludes_self_and_descendants() {
        let entries = vec![
            MenuEntry::new(key(1)).with_name("Docs").with_identifier("docs"),
            MenuEntry::new(key(2))
                .with_name("Docs API")
                .with_identifier("docs_api")
                .with_parent("docs"),
            MenuEntry::new(key(3)).with_name("Other docs"),
        ];

        let found = parent_suggestions(&entries, Some(&key(1)), "DOCS", DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "Other docs");
        assert_eq!(found[0].label, "Other docs (no-id)");

        let all = parent_suggestions(&entries, None, "docs", DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(all[0].label, "Docs (docs)");
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn respects_limit_and_empty_input() {
        let entries: Vec<MenuEntry> = (1..=20)
            .map(|n| MenuEntry::new(key(n)).with_name(format!("Item {n}")))
            .collect();
        assert_eq!(parent_suggestions(&entries, None, "item", 10).len(), 10);
        assert!(parent_suggestions(&entries, None, "", 10).is_empty());
    }
}
