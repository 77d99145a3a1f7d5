//! navmenu Edit
//!
//! Keeps the flat menu list consistent across user edits.
//!
//! # Core Concepts
//!
//! - [`MutationEngine`]: Add, update, delete, merge, reparent, reorder, reset
//! - [`EditSession`]: Baseline and working copy of one document
//! - [`DuplicateResolution`]: Tracks one duplicated identifier across edits
//! - [`ViewState`]: Expansion, search and scroll target, keyed by synthetic key
//! - [`parent_suggestions`]: Candidate parents for the edit form
//!
//! Entries are only ever addressed by [`SyntheticKey`](navmenu_model::SyntheticKey).
//!
//! # Example
//!
//! ```rust
//! use navmenu_edit::{EntryPatch, MutationEngine, NewEntry};
//! use navmenu_model::KeyAllocator;
//!
//! let engine = MutationEngine::with_allocator(KeyAllocator::new());
//! let added = engine.add(&[], NewEntry::new("Home", "home"))?;
//! let entries = engine.update(
//!     &added.entries,
//!     added.entry.key(),
//!     &EntryPatch::new().url("/"),
//! )?;
//! assert_eq!(entries[0].url.as_deref(), Some("/"));
//! # Ok::<(), navmenu_edit::EditError>(())
//! ```

#![warn(unreachable_pub)]

mod engine;
mod error;
mod ops;
mod resolution;
mod session;
mod suggestions;
mod view;

pub use engine::{Added, MutationEngine};
pub use error::{EditError, EditResult};
pub use ops::{EntryPatch, NewEntry};
pub use resolution::{DuplicateResolution, Refresh};
pub use session::EditSession;
pub use suggestions::{parent_suggestions, ParentSuggestion, DEFAULT_SUGGESTION_LIMIT};
pub use view::ViewState;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
