//! Document loading
//!
//! Reads a JSON document from disk. Missing paths and directories map to
//! `NotFound`; malformed content maps to `ParseError` with its position.

use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Result, ValidatorError};

/// Load and parse the JSON document at `path`
pub fn load_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(ValidatorError::not_found(path));
    }

    let content = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ValidatorError::not_found(path),
        _ => ValidatorError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Loaded document");

    // Bytes, so invalid UTF-8 surfaces as a positioned syntax error
    serde_json::from_slice(&content).map_err(|e| ValidatorError::parse_error(path, &e))
}

/// Parse an in-memory JSON document. `origin` only labels the error.
pub fn parse_document(content: &str, origin: impl AsRef<Path>) -> Result<Value> {
    serde_json::from_str(content).map_err(|e| ValidatorError::parse_error(origin, &e))
}
