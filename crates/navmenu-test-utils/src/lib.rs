//! Testing utilities for the navmenu workspace
//!
//! Shared fixtures and proptest strategies.

#![allow(missing_docs)]

use navmenu_model::{KeyAllocator, MenuEntry, RawEntry};
use proptest::prelude::*;

/// Docs-site menu with nesting, passthrough keys and a duplicate
pub const SAMPLE_YAML: &str = r#"params:
  theme: docs
menu:
  footer_label: Menu
  main:
    - name: Essentials
      identifier: essentials
      pre: book
      weight: 1000000
      class: highlighted
    - name: Getting Started
      identifier: getting_started
      parent: essentials
      url: getting-started/
      weight: 10000
      children:
        - name: Install
          identifier: install
          url: getting-started/install/
          weight: 1
    - name: Getting Started
      identifier: getting_started
      parent: essentials
      url: getting-started/
      weight: 10000
    - name: Platform
      identifier: platform
      weight: 2000000
    - name: Orphan
      parent: nowhere
"#;

/// Three entries, two of them sharing identifier `b` under `a`
pub const SCENARIO_YAML: &str = r"menu:
  main:
    - name: A
      identifier: a
      weight: 5
    - name: B
      identifier: b
      parent: a
      weight: 1
    - name: B2
      identifier: b
      parent: a
      weight: 2
";

/// Flat raw entry over a small identifier alphabet
///
/// Small alphabets make duplicate identifiers and parent cycles likely.
pub fn arb_raw_entry() -> impl Strategy<Value = RawEntry> {
    (
        proptest::option::of("[A-Z][a-z]{0,6}"),
        proptest::option::of("[a-f]"),
        proptest::option::of("[a-z/]{1,10}"),
        proptest::option::of("[a-z]{3,6}"),
        proptest::option::of("[a-g]"),
        proptest::option::of(-1_000i64..1_000),
    )
        .prop_map(|(name, identifier, url, pre, parent, weight)| RawEntry {
            name,
            identifier,
            url,
            pre,
            parent,
            weight,
            ..RawEntry::default()
        })
}

/// Keyed flat list built from [`arb_raw_entry`]
pub fn arb_entries(max: usize) -> impl Strategy<Value = Vec<MenuEntry>> {
    proptest::collection::vec(arb_raw_entry(), 0..max)
        .prop_map(|raw| KeyAllocator::new().assign(raw))
}
