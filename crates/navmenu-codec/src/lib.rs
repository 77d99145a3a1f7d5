//! navmenu Codec
//!
//! The boundary between menu text and the in-memory [`Document`].
//!
//! # Core Operations
//!
//! - **Ingress**: YAML (or the JSON wire form) to [`Document`], keys assigned
//! - **Egress**: [`Document`] to YAML with keys stripped, or to JSON with
//!   keys as `_uid`
//! - **Loading**: [`Loader`] reads files asynchronously and drops loads that
//!   finish after a newer one started
//!
//! # Example
//!
//! ```rust
//! use navmenu_codec::{decode_yaml_with, encode_yaml};
//! use navmenu_model::KeyAllocator;
//!
//! let text = "menu:\n  main:\n    - name: Home\n      identifier: home\n";
//! let document = decode_yaml_with(text, &KeyAllocator::new())?;
//! assert_eq!(document.entries[0].key().as_str(), "item_1");
//!
//! let out = encode_yaml(&document)?;
//! assert!(!out.contains("item_1"));
//! # Ok::<(), navmenu_codec::CodecError>(())
//! ```
//!
//! [`Document`]: navmenu_model::Document

#![warn(unreachable_pub)]

pub mod egress;
pub mod error;
pub mod ingress;
pub mod loader;
pub mod shape;

pub use egress::{encode_yaml, entry_value, json_to_yaml, to_json};
pub use error::{CodecError, CodecResult, ParseError, SerializeError, ShapeError};
pub use ingress::{
    decode_json, decode_value, decode_yaml, decode_yaml_with, UID_FIELD, VALUE_FIELD,
};
pub use loader::{LoadOutcome, LoadTicket, Loader};
pub use shape::{validate_json_shape, validate_shape};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
