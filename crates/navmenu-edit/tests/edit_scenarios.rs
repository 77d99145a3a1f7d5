//! Scenario and property tests for the mutation engine.

use navmenu_edit::{EditError, EditSession, EntryPatch, MutationEngine, NewEntry, ViewState};
use navmenu_hierarchy::{build, find_duplicate_identifiers};
use navmenu_codec::decode_yaml_with;
use navmenu_model::{Document, KeyAllocator};
use navmenu_test_utils::{arb_entries, SCENARIO_YAML};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn load_scenario(keys: &KeyAllocator) -> Document {
    decode_yaml_with(SCENARIO_YAML, keys).unwrap()
}

#[test]
fn scenario_duplicate_children_sorted_by_weight() {
    let entries = load_scenario(&KeyAllocator::new()).entries;
    assert_ne!(entries[1].key(), entries[2].key());

    let findings = find_duplicate_identifiers(&entries);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].identifier, "b");
    assert_eq!(findings[0].entries.len(), 2);
    assert!(!findings[0].are_byte_identical);

    let forest = build(&entries);
    assert_eq!(forest.roots.len(), 1);
    let children: Vec<&str> = forest.roots[0]
        .children
        .iter()
        .map(|n| n.entry.display_name())
        .collect();
    assert_eq!(children, vec!["B", "B2"]);
}

#[test]
fn scenario_add_then_delete_parent() {
    let keys = KeyAllocator::new();
    let entries = load_scenario(&keys).entries;
    let engine = MutationEngine::with_allocator(keys);

    let added = engine.add(&entries, NewEntry::new("C", "c")).unwrap();
    let a = entries[0].key().clone();
    let next = engine.delete(&added.entries, &a).unwrap();

    let forest = build(&next);
    let mut roots: Vec<&str> = forest.roots.iter().map(|n| n.entry.display_name()).collect();
    roots.sort_unstable();
    assert_eq!(roots, vec!["B", "B2", "C"]);
    assert_eq!(next.len(), 3);
}

#[test]
fn update_targets_key_not_identifier() {
    let entries = load_scenario(&KeyAllocator::new()).entries;
    let b2 = entries[2].key().clone();

    let next = MutationEngine::default()
        .update(&entries, &b2, &EntryPatch::new().name("Renamed"))
        .unwrap();

    assert_eq!(next[1], entries[1]);
    assert_eq!(next[2].name.as_deref(), Some("Renamed"));
    assert_eq!(next[2].key(), &b2);
}

#[test]
fn session_add_then_reveal() {
    let keys = KeyAllocator::new();
    let mut session = EditSession::with_engine(
        load_scenario(&keys),
        MutationEngine::with_allocator(keys),
    );
    let mut view = ViewState::new();
    view.initialize(session.entries());

    let added = session
        .add(NewEntry::new("Deep", "deep").with_parent("b"))
        .unwrap();
    view.ensure_visible(session.entries(), added.key());

    let forest = session.forest();
    for ancestor in forest.path_to(added.key()) {
        assert!(view.is_expanded(&ancestor));
    }
    assert_eq!(view.scroll_target.as_ref(), Some(added.key()));
}

#[test]
fn session_rejects_empty_name() {
    let mut session = EditSession::new(load_scenario(&KeyAllocator::new()));
    let key = session.entries()[0].key().clone();
    let err = session.update(&key, &EntryPatch::new().name("")).unwrap_err();
    assert!(matches!(err, EditError::Validation(_)));
    assert!(!session.is_dirty());
}

proptest! {
    #[test]
    fn prop_delete_removes_exactly_one(entries in arb_entries(30), pick in any::<prop::sample::Index>()) {
        prop_assume!(!entries.is_empty());
        let victim = pick.get(&entries).key().clone();
        let next = MutationEngine::default().delete(&entries, &victim).unwrap();

        prop_assert_eq!(next.len(), entries.len() - 1);
        let survivors: Vec<_> = entries.iter().filter(|e| e.key() != &victim).cloned().collect();
        prop_assert_eq!(next, survivors);
    }

    #[test]
    fn prop_update_touches_only_target(entries in arb_entries(30), pick in any::<prop::sample::Index>(), weight in -50i64..50) {
        prop_assume!(!entries.is_empty());
        let target = pick.get(&entries).key().clone();
        let next = MutationEngine::default().reorder(&entries, &target, weight).unwrap();

        for (before, after) in entries.iter().zip(&next) {
            prop_assert_eq!(before.key(), after.key());
            if before.key() == &target {
                prop_assert_eq!(after.weight(), weight);
            } else {
                prop_assert_eq!(before, after);
            }
        }
    }
}
