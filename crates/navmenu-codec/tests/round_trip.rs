//! YAML round-trip properties.
//!
//! Decoding the encoding of a document gives back the same entries, with
//! fresh keys.

use navmenu_codec::{decode_json, decode_yaml_with, encode_yaml, to_json};
use navmenu_model::{Document, KeyAllocator, MenuEntry, RawEntry};
use navmenu_test_utils::{arb_entries, SAMPLE_YAML};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Entry content without the key
fn content(entries: &[MenuEntry]) -> Vec<RawEntry> {
    entries
        .iter()
        .cloned()
        .map(|e| RawEntry {
            key: None,
            ..RawEntry::from(e)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_yaml_round_trip(entries in arb_entries(25)) {
        let document = Document::new(entries);
        let text = encode_yaml(&document).unwrap();
        let back = decode_yaml_with(&text, &KeyAllocator::new()).unwrap();

        prop_assert_eq!(content(&back.entries), content(&document.entries));
        prop_assert!(!text.contains("item_"));
    }

    #[test]
    fn prop_json_round_trip_keeps_keys(entries in arb_entries(25)) {
        let document = Document::new(entries);
        let json = to_json(&document).unwrap();
        let back = decode_json(&json, &KeyAllocator::new()).unwrap();
        prop_assert_eq!(back, document);
    }
}

#[test]
fn sample_round_trips_with_passthrough() {
    let keys = KeyAllocator::new();
    let document = decode_yaml_with(SAMPLE_YAML, &keys).unwrap();
    assert_eq!(document.len(), 6);
    assert!(document.extra.contains_key("params"));
    assert!(document.menu_extra.contains_key("footer_label"));

    let text = encode_yaml(&document).unwrap();
    let back = decode_yaml_with(&text, &keys).unwrap();
    assert_eq!(content(&back.entries), content(&document.entries));
    assert_eq!(back.extra, document.extra);
    assert_eq!(back.menu_extra, document.menu_extra);
}

#[test]
fn nested_children_come_out_flat() {
    let document = decode_yaml_with(SAMPLE_YAML, &KeyAllocator::new()).unwrap();
    let install = document
        .entries
        .iter()
        .find(|e| e.identifier() == Some("install"))
        .unwrap();
    assert_eq!(install.parent(), Some("getting_started"));

    let text = encode_yaml(&document).unwrap();
    assert!(!text.contains("children"));
}

#[test]
fn badly_typed_entries_round_trip_verbatim() {
    let text = "menu:\n  main:\n  - name: B\n    weight: 1.5\n  - 42\n  - name:\n      en: Home\n    identifier: home\n";
    let keys = KeyAllocator::new();
    let document = decode_yaml_with(text, &keys).unwrap();
    assert_eq!(document.len(), 3);

    let encoded = encode_yaml(&document).unwrap();
    assert!(encoded.contains("weight: 1.5"));
    assert!(encoded.contains("en: Home"));

    let back = decode_yaml_with(&encoded, &keys).unwrap();
    assert_eq!(content(&back.entries), content(&document.entries));
}
