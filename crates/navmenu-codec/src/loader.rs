//! Async file loading with supersession
//!
//! Every load takes a ticket. When a load finishes after a newer one has
//! started, its result is discarded and [`LoadOutcome::Superseded`] is
//! returned. Nothing is kept for abandoned loads.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use navmenu_hierarchy::IntegrityReport;
use navmenu_model::{Document, KeyAllocator};
use tracing::{debug, info};

use crate::error::{CodecError, CodecResult};
use crate::ingress::decode_yaml_with;

/// Position of one load in the sequence of loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Result of a load that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The newest load; its document is ready
    Loaded {
        /// Decoded document
        document: Document,
        /// Findings for the decoded entries
        report: IntegrityReport,
    },
    /// A newer load started first; the result was dropped
    Superseded,
}

impl LoadOutcome {
    /// Document, unless superseded
    #[must_use]
    pub fn into_document(self) -> Option<Document> {
        match self {
            Self::Loaded { document, .. } => Some(document),
            Self::Superseded => None,
        }
    }
}

/// Loads menu documents, newest wins
///
/// Clones share the ticket counter and key allocator.
#[derive(Debug, Clone)]
pub struct Loader {
    keys: KeyAllocator,
    latest: Arc<AtomicU64>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// Loader over the process-wide allocator
    #[must_use]
    pub fn new() -> Self {
        Self::with_allocator(KeyAllocator::global().clone())
    }

    /// Loader over a given allocator
    #[must_use]
    pub fn with_allocator(keys: KeyAllocator) -> Self {
        Self {
            keys,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start a load
    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Check if no load started after `ticket`
    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Decode `text` for `ticket`, unless a newer load started
    ///
    /// # Errors
    ///
    /// Returns parse and shape errors from decoding. A superseded load is
    /// not decoded and never errors.
    pub fn finish(&self, ticket: LoadTicket, text: &str) -> CodecResult<LoadOutcome> {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, "load superseded");
            return Ok(LoadOutcome::Superseded);
        }
        let document = decode_yaml_with(text, &self.keys)?;
        let report = IntegrityReport::analyze(&document.entries);
        report.warn_if_unclean();
        info!(ticket = ticket.0, entries = document.len(), "menu loaded");
        Ok(LoadOutcome::Loaded { document, report })
    }

    /// Read and decode the file at `path`
    ///
    /// # Errors
    ///
    /// - [`CodecError::Io`] if the file cannot be read
    /// - parse and shape errors from decoding
    pub async fn load_path(&self, path: impl AsRef<Path>) -> CodecResult<LoadOutcome> {
        let path = path.as_ref();
        let ticket = self.begin();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CodecError::io_error(path, e))?;
        self.finish(ticket, &text)
    }

    /// Decode in-memory text as a load
    ///
    /// # Errors
    ///
    /// See [`Loader::finish`].
    pub fn load_str(&self, text: &str) -> CodecResult<LoadOutcome> {
        let ticket = self.begin();
        self.finish(ticket, text)
    }
}
