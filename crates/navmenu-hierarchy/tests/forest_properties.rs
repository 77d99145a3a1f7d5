//! Property tests for forest derivation.
//!
//! - Every entry appears exactly once, whatever the parent links look like.
//! - Siblings are ordered by weight, ties by list position.
//! - Every placed child really names its parent.

use std::collections::HashMap;

use navmenu_hierarchy::{build, HierarchyNode};
use navmenu_model::{MenuEntry, SyntheticKey};
use proptest::prelude::*;

/// Small identifier alphabet so that duplicates, self-parents and cycles
/// are common.
fn arb_entries() -> impl Strategy<Value = Vec<MenuEntry>> {
    proptest::collection::vec(
        (
            proptest::option::of("[a-f]"),
            proptest::option::of("[a-g]"),
            proptest::option::of(-3i64..3),
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (identifier, parent, weight))| {
                let mut entry = MenuEntry::new(SyntheticKey::from_sequence(i as u64 + 1));
                entry.identifier = identifier;
                entry.parent = parent;
                entry.weight = weight;
                entry
            })
            .collect()
    })
}

fn check_siblings(
    nodes: &[HierarchyNode],
    position: &HashMap<SyntheticKey, usize>,
) -> Result<(), TestCaseError> {
    for pair in nodes.windows(2) {
        let (a, b) = (&pair[0].entry, &pair[1].entry);
        prop_assert!(
            a.weight() < b.weight()
                || (a.weight() == b.weight() && position[a.key()] < position[b.key()])
        );
    }
    for node in nodes {
        check_siblings(&node.children, position)?;
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_forest_is_total(entries in arb_entries()) {
        let forest = build(&entries);
        prop_assert_eq!(forest.len(), entries.len());

        let mut placed: Vec<&SyntheticKey> = forest.iter().map(HierarchyNode::key).collect();
        placed.sort();
        let mut expected: Vec<&SyntheticKey> = entries.iter().map(MenuEntry::key).collect();
        expected.sort();
        prop_assert_eq!(placed, expected);
    }

    #[test]
    fn prop_siblings_sorted_stably(entries in arb_entries()) {
        let position: HashMap<SyntheticKey, usize> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key().clone(), i))
            .collect();
        check_siblings(&build(&entries).roots, &position)?;
    }

    #[test]
    fn prop_children_name_their_parent(entries in arb_entries()) {
        let forest = build(&entries);
        for node in forest.iter() {
            for child in &node.children {
                prop_assert_eq!(child.entry.parent(), node.entry.identifier());
                prop_assert_eq!(child.parent_key.as_ref(), Some(node.key()));
                prop_assert_eq!(child.depth, node.depth + 1);
            }
        }
    }
}
