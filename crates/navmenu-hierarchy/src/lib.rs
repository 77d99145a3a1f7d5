//! navmenu Hierarchy
//!
//! Derived views over the flat entry list.
//!
//! # Core Concepts
//!
//! - [`build`]: Flat list to rooted [`Forest`], sorted by weight
//! - [`HierarchyNode`]: One placed entry with depth and parent key
//! - [`IntegrityReport`]: Duplicate identifiers, missing identifiers,
//!   unresolved parents and parent cycles
//!
//! Both are recomputed from scratch on every call. The flat list stays the
//! only source of truth.
//!
//! # Example
//!
//! ```rust
//! use navmenu_hierarchy::build;
//! use navmenu_model::{MenuEntry, SyntheticKey};
//!
//! let entries = vec![
//!     MenuEntry::new(SyntheticKey::from_sequence(1)).with_name("A").with_identifier("a"),
//!     MenuEntry::new(SyntheticKey::from_sequence(2)).with_name("B").with_parent("a"),
//! ];
//! let forest = build(&entries);
//! assert_eq!(forest.roots.len(), 1);
//! assert_eq!(forest.roots[0].children.len(), 1);
//! ```

#![warn(unreachable_pub)]

mod forest;
mod integrity;
mod links;

pub use forest::{build, matches_term, Forest, HierarchyNode, Iter};
pub use integrity::{
    diff_entries, find_duplicate_identifiers, find_missing_identifiers, find_parent_cycles,
    find_unresolved_parents, is_byte_identical, DuplicateFinding, FieldDiff, IntegrityReport,
    DIFF_FIELDS,
};
