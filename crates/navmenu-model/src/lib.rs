//! navmenu Model
//!
//! Flat menu entries with process-assigned identity.
//!
//! # Core Concepts
//!
//! - [`SyntheticKey`]: Opaque, immutable identity of an entry, never written to YAML
//! - [`KeyAllocator`]: Monotonic key source; [`KeyAllocator::assign`] is the identity assigner
//! - [`MenuEntry`]: Flat, authoritative form of one menu item
//! - [`RawEntry`]: Decoded form before key assignment, possibly nested
//! - [`Document`]: Entry list plus passthrough YAML fields
//!
//! # Example
//!
//! ```rust
//! use navmenu_model::{KeyAllocator, RawEntry};
//!
//! let keys = KeyAllocator::new();
//! let entries = keys.assign(vec![RawEntry::named("Home", "home")]);
//! assert_eq!(entries[0].key().as_str(), "item_1");
//! ```

#![warn(unreachable_pub)]

mod document;
mod entry;
mod identity;
mod key;

pub use document::Document;
pub use entry::{normalize_optional, MenuEntry, RawEntry};
pub use identity::assign;
pub use key::{KeyAllocator, KeyError, SyntheticKey, KEY_PREFIX};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
