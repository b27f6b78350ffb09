//! Error types for kotlin-tags
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for tagging operations
#[derive(Debug, Error)]
pub enum TagsError {
    /// IO error without file context (output streams)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO error while reading a source file
    #[error("Failed to read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Parser setup or tree construction failure
    #[error("Parse error: {0}")]
    Parse(String),

    /// Syntax issues found while `strict` is enabled
    #[error("Syntax error in {path} at line {line}: {message} ({count} issue(s))")]
    Syntax {
        path: String,
        line: u32,
        message: String,
        count: usize,
    },

    /// No plugin registered for the file
    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Output serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TagsError {
    pub fn parse(msg: impl Into<String>) -> Self {
        TagsError::Parse(msg.into())
    }

    pub fn file(path: impl Into<String>, source: std::io::Error) -> Self {
        TagsError::File {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for tagging operations
pub type Result<T> = std::result::Result<T, TagsError>;
