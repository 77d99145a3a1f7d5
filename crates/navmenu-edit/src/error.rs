//! Error types for edits

use navmenu_model::SyntheticKey;

/// Errors from the mutation engine
///
/// Every failed operation leaves the input list untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Input rejected before touching the list
    #[error("validation failed: {0}")]
    Validation(String),

    /// No entry carries the key
    #[error("entry not found: {0}")]
    NotFound(SyntheticKey),

    /// Operation not applicable to its argument
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl EditError {
    /// Create validation error
    #[inline]
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create invalid operation error
    #[inline]
    #[must_use]
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }
}

/// Result alias for edit operations
pub type EditResult<T> = Result<T, EditError>;
