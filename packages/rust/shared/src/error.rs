//! Error types for Profiler.
//!
//! Library crates use [`ProfilerError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Profiler operations.
#[derive(Debug, thiserror::Error)]
pub enum ProfilerError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Markup that cannot be parsed into elements. The batch skips the document.
    #[error("malformed document: {message}")]
    MalformedDocument { message: String },

    /// Vocabulary file unreadable or unwritable. Fatal for the batch.
    #[error("vocabulary error at {path:?}: {source}")]
    Vocabulary {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Batch row or result (de)serialization error.
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// Data validation error (empty batch, bad row, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ProfilerError>;

impl ProfilerError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a malformed-document error from any displayable message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: msg.into(),
        }
    }

    /// Create a serialization error from any displayable message.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a vocabulary file `std::io::Error` with its path.
    pub fn vocabulary(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Vocabulary {
            path: path.into(),
            source,
        }
    }

    /// Whether this error must abort the whole batch rather than one document.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MalformedDocument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ProfilerError::config("unknown content scope");
        assert_eq!(err.to_string(), "config error: unknown content scope");

        let err = ProfilerError::malformed("no elements in payload");
        assert!(err.to_string().contains("no elements"));
    }

    #[test]
    fn only_malformed_documents_are_recoverable() {
        assert!(!ProfilerError::malformed("x").is_fatal());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(ProfilerError::vocabulary("keywords.txt", io).is_fatal());
        assert!(ProfilerError::validation("empty batch").is_fatal());
    }
}
