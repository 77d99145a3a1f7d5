//! Synthetic keys
//!
//! Provides [`SyntheticKey`], the process-assigned identity of a menu entry,
//! and [`KeyAllocator`], the monotonic source of fresh keys.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

/// Prefix of keys minted by a [`KeyAllocator`]
pub const KEY_PREFIX: &str = "item_";

/// Process-assigned identity of a menu entry
///
/// Keys are opaque to callers. Keys minted here have the form `item_<n>`;
/// keys carried in from an earlier in-memory state are preserved verbatim
/// whatever their form.
///
/// # Ordering
/// Minted keys order numerically on `<n>` and sort before every foreign
/// key; foreign keys order lexicographically among themselves. This keeps
/// the order total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyntheticKey(String);

impl SyntheticKey {
    /// Wrap a raw key string
    ///
    /// # Errors
    /// Returns error if the string is empty
    #[inline]
    pub fn new(raw: impl Into<String>) -> Result<Self, KeyError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(KeyError::Empty);
        }
        Ok(Self(raw))
    }

    /// Key minted from a sequence number
    #[inline]
    #[must_use]
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{KEY_PREFIX}{sequence}"))
    }

    /// Raw key string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sequence number, if this key has the minted `item_<n>` form
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        let digits = self.0.strip_prefix(KEY_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // Leading zeros would give two spellings of one number
        if digits.len() > 1 && digits.starts_with('0') {
            return None;
        }
        digits.parse().ok()
    }
}

impl Ord for SyntheticKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sequence(), other.sequence()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for SyntheticKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for SyntheticKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SyntheticKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SyntheticKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Key errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// Keys must carry at least one character
    #[error("synthetic key must not be empty")]
    Empty,
}

/// Monotonic key source
///
/// Cloning shares the counter, so every clone mints from the same sequence.
/// [`KeyAllocator::global`] is the process-wide allocator; tests build their
/// own with [`KeyAllocator::new`] for deterministic keys.
#[derive(Debug, Clone)]
pub struct KeyAllocator {
    next: Arc<AtomicU64>,
}

impl KeyAllocator {
    /// Fresh allocator whose first key is `item_1`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Fresh allocator whose first key is `item_<first>`
    #[inline]
    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(first)),
        }
    }

    /// Process-wide allocator
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<KeyAllocator> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Mint a key never handed out before by this allocator
    #[inline]
    #[must_use]
    pub fn next_key(&self) -> SyntheticKey {
        let sequence = self.next.fetch_add(1, AtomicOrdering::Relaxed);
        SyntheticKey::from_sequence(sequence)
    }

    /// Advance past a key seen in input so later mints never collide with it
    #[inline]
    pub fn observe(&self, key: &SyntheticKey) {
        if let Some(sequence) = key.sequence() {
            self.next
                .fetch_max(sequence.saturating_add(1), AtomicOrdering::Relaxed);
        }
    }

    /// Sequence number the next mint will use
    #[inline]
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next.load(AtomicOrdering::Relaxed)
    }
}

impl Default for KeyAllocator {
    fn default() -> Self {
        Self::new()
    }
}
