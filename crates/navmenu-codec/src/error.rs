//! Error types for the codec boundary
//!
//! - [`ParseError`]: the text is not YAML (or JSON) at all
//! - [`ShapeError`]: the text parses but is not a menu document
//! - [`SerializeError`]: egress failed
//! - [`CodecError`]: any of the above, or an I/O failure while loading

use std::path::PathBuf;

/// Input text could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Not valid YAML
    #[error("invalid yaml: {0}")]
    Yaml(String),

    /// Not valid JSON
    #[error("invalid json: {0}")]
    Json(String),
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Parsed value is not a menu document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// Document root is not a mapping
    #[error("document root must be a mapping")]
    RootNotMapping,

    /// `menu` is absent or not a mapping
    #[error("'menu' must be a mapping")]
    MenuNotMapping,

    /// `menu.main` is absent
    #[error("'menu.main' is missing")]
    MainMissing,

    /// `menu.main` is not a sequence
    #[error("'menu.main' must be a sequence")]
    MainNotSequence,
}

/// Egress failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("serialization failed: {0}")]
pub struct SerializeError(pub String);

impl From<serde_yaml::Error> for SerializeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self(err.to_string())
    }
}

impl From<serde_json::Error> for SerializeError {
    fn from(err: serde_json::Error) -> Self {
        Self(err.to_string())
    }
}

/// Combined codec error
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Input is not parseable
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Input has the wrong shape
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    /// Output could not be produced
    #[error(transparent)]
    Serialize(#[from] SerializeError),

    /// Reading the file failed
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl CodecError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_conversions() {
        let err: CodecError = ShapeError::MainMissing.into();
        assert!(matches!(err, CodecError::Shape(ShapeError::MainMissing)));
        assert_eq!(err.to_string(), "shape error: 'menu.main' is missing");
    }

    #[test]
    fn io_error_display() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = CodecError::io_error("menu.yaml", source);
        assert_eq!(err.to_string(), "io error reading menu.yaml: gone");
    }
}
