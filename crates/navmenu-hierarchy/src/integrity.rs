//! Integrity analysis
//!
//! Pure, on-demand checks over the flat list:
//!
//! - Duplicate human identifiers, with byte-identical classification
//! - Entries lacking an identifier
//! - Parents that resolve to nothing
//! - Parent cycles, self-parents included
//!
//! Nothing here mutates or caches. Re-run after every edit.

use indexmap::IndexMap;
use navmenu_model::{MenuEntry, SyntheticKey};
use tracing::warn;

use crate::links::{Detached, ParentLinks};

/// A group of entries sharing one human identifier
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateFinding {
    /// The shared identifier
    pub identifier: String,

    /// Entries carrying it, in list order
    pub entries: Vec<MenuEntry>,

    /// `name`, `url`, `pre`, `parent` and `weight` agree across the group
    pub are_byte_identical: bool,
}

impl DuplicateFinding {
    /// Keys of the grouped entries
    #[must_use]
    pub fn keys(&self) -> Vec<SyntheticKey> {
        self.entries.iter().map(|e| e.key().clone()).collect()
    }
}

/// Group entries by non-empty identifier, keeping groups of two or more
///
/// Groups come out in order of first appearance.
#[must_use]
pub fn find_duplicate_identifiers(entries: &[MenuEntry]) -> Vec<DuplicateFinding> {
    let mut groups: IndexMap<&str, Vec<&MenuEntry>> = IndexMap::new();
    for entry in entries {
        if let Some(identifier) = entry.identifier() {
            groups.entry(identifier).or_default().push(entry);
        }
    }

    groups
        .into_iter()
        .filter(|(_, group)| group.len() >= 2)
        .map(|(identifier, group)| {
            let first = group[0];
            let are_byte_identical = group.iter().all(|e| is_byte_identical(first, e));
            DuplicateFinding {
                identifier: identifier.to_owned(),
                entries: group.into_iter().cloned().collect(),
                are_byte_identical,
            }
        })
        .collect()
}

/// Check if two entries agree on name, url, pre, parent and weight
///
/// Keys and identifiers are not compared.
#[must_use]
pub fn is_byte_identical(a: &MenuEntry, b: &MenuEntry) -> bool {
    a.name == b.name
        && a.url == b.url
        && a.pre == b.pre
        && a.parent == b.parent
        && a.weight == b.weight
}

/// Entries with no identifier (absent or empty), in list order
#[must_use]
pub fn find_missing_identifiers(entries: &[MenuEntry]) -> Vec<MenuEntry> {
    entries
        .iter()
        .filter(|e| e.identifier().is_none())
        .cloned()
        .collect()
}

/// Entries whose `parent` is set but names no identifier in the list
#[must_use]
pub fn find_unresolved_parents(entries: &[MenuEntry]) -> Vec<MenuEntry> {
    let links = ParentLinks::resolve(entries);
    entries
        .iter()
        .enumerate()
        .filter(|&(index, _)| links.detached(index) == Some(Detached::Unresolved))
        .map(|(_, entry)| entry.clone())
        .collect()
}

/// Groups of entries whose parent chain loops back on itself
///
/// Each loop is reported once, starting from its member that comes first
/// in the list. A self-parent is a loop of one.
#[must_use]
pub fn find_parent_cycles(entries: &[MenuEntry]) -> Vec<Vec<SyntheticKey>> {
    let links = ParentLinks::resolve(entries);
    let mut reported = vec![false; entries.len()];
    let mut cycles = Vec::new();

    for index in 0..entries.len() {
        if reported[index]
            || !matches!(
                links.detached(index),
                Some(Detached::Cycle | Detached::SelfParent)
            )
        {
            continue;
        }
        let members = links.cycle_from(index);
        for &member in &members {
            reported[member] = true;
        }
        cycles.push(
            members
                .into_iter()
                .map(|i| entries[i].key().clone())
                .collect(),
        );
    }
    cycles
}

/// One compared field of two entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    /// YAML field name
    pub field: &'static str,
    /// Value on the left entry
    pub left: Option<String>,
    /// Value on the right entry
    pub right: Option<String>,
}

impl FieldDiff {
    /// Check if the two sides differ
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        self.left != self.right
    }
}

/// Field names compared by [`diff_entries`], in display order
pub const DIFF_FIELDS: [&str; 6] = ["name", "identifier", "url", "pre", "parent", "weight"];

/// Side-by-side comparison of two entries, one row per field
#[must_use]
pub fn diff_entries(left: &MenuEntry, right: &MenuEntry) -> Vec<FieldDiff> {
    let values = |e: &MenuEntry| {
        [
            e.name.clone(),
            e.identifier.clone(),
            e.url.clone(),
            e.pre.clone(),
            e.parent.clone(),
            e.weight.map(|w| w.to_string()),
        ]
    };
    DIFF_FIELDS
        .into_iter()
        .zip(values(left).into_iter().zip(values(right)))
        .map(|(field, (left, right))| FieldDiff { field, left, right })
        .collect()
}

/// Every finding for one list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrityReport {
    /// Identifier groups of size two or more
    pub duplicates: Vec<DuplicateFinding>,
    /// Entries lacking an identifier
    pub missing_identifiers: Vec<MenuEntry>,
    /// Entries whose parent names nothing
    pub unresolved_parents: Vec<MenuEntry>,
    /// Parent loops
    pub cycles: Vec<Vec<SyntheticKey>>,
}

impl IntegrityReport {
    /// Run every check over `entries`
    #[must_use]
    pub fn analyze(entries: &[MenuEntry]) -> Self {
        Self {
            duplicates: find_duplicate_identifiers(entries),
            missing_identifiers: find_missing_identifiers(entries),
            unresolved_parents: find_unresolved_parents(entries),
            cycles: find_parent_cycles(entries),
        }
    }

    /// Emit one warning with the finding counts, unless the report is clean
    pub fn warn_if_unclean(&self) {
        if !self.is_clean() {
            warn!(
                duplicates = self.duplicates.len(),
                missing = self.missing_identifiers.len(),
                unresolved = self.unresolved_parents.len(),
                cycles = self.cycles.len(),
                "menu has integrity issues"
            );
        }
    }

    /// Check if nothing was found
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
            && self.missing_identifiers.is_empty()
            && self.unresolved_parents.is_empty()
            && self.cycles.is_empty()
    }
}
