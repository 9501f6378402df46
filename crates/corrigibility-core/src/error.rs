//! Error types for the validator
//!
//! Hard failures only. Rule violations are ordinary results and never travel
//! through these types.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema::SchemaError;

/// Main error type for loading and dispatch operations
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// Path does not resolve to a readable file
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Content is not well-formed JSON
    #[error("Invalid JSON: {detail}")]
    ParseError { path: PathBuf, detail: String },

    /// Batch target is missing or is not a directory
    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// Unrecognized document type requested
    #[error("Unknown schema type: {0}")]
    UnknownSchemaType(String),

    /// Directory walk failed part way through
    #[error("Traversal error: {0}")]
    Traversal(String),

    /// Any other I/O failure while reading a document
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Published schema could not be resolved
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ValidatorError {
    /// Create a not-found error
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        ValidatorError::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a parse error from a serde_json failure, keeping its position
    pub fn parse_error(path: impl AsRef<Path>, err: &serde_json::Error) -> Self {
        ValidatorError::ParseError {
            path: path.as_ref().to_path_buf(),
            detail: describe_json_error(err),
        }
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ValidatorError::NotFound { .. }
                | ValidatorError::ParseError { .. }
                | ValidatorError::NotADirectory { .. }
                | ValidatorError::UnknownSchemaType(_)
        )
    }
}

/// Render a serde_json error as `<message> at line L, column C`.
///
/// serde_json already appends the position to its Display output for syntax
/// errors; EOF errors on empty input report line 1 column 0, which is kept.
pub(crate) fn describe_json_error(err: &serde_json::Error) -> String {
    let text = err.to_string();
    if text.contains(" at line ") {
        text
    } else {
        format!("{} at line {}, column {}", text, err.line(), err.column())
    }
}

/// Result type alias for validator operations
pub type Result<T> = std::result::Result<T, ValidatorError>;
