//! Published schema sources
//!
//! The rule sets are hand-coded and never consult these schemas. Sources exist
//! so the published documents can be fetched and inspected: a local cache
//! directory, the remote publisher, and a chain that prefers the local copy.
//!
//! # Example
//!
//! ```rust,no_run
//! use corrigibility_core::schema::{SchemaKind, SchemaSource, SchemaSourceChain};
//! use corrigibility_core::ValidatorConfig;
//!
//! let chain = SchemaSourceChain::from_config(&ValidatorConfig::from_env()).unwrap();
//! let schema = chain.fetch(SchemaKind::Assessment).unwrap();
//! println!("{} from {}", schema.kind, schema.origin);
//! ```

pub mod chain;
pub mod local;
pub mod remote;

pub use chain::SchemaSourceChain;
pub use local::LocalSchemaSource;
pub use remote::RemoteSchemaSource;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Published schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Infrastructure,
    Assessment,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 2] = [SchemaKind::Infrastructure, SchemaKind::Assessment];

    /// File name used both in the cache directory and on the publisher.
    /// Assessments are published as `corrigibility.json`.
    pub fn file_name(&self) -> &'static str {
        match self {
            SchemaKind::Infrastructure => "infrastructure.json",
            SchemaKind::Assessment => "corrigibility.json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Infrastructure => "infrastructure",
            SchemaKind::Assessment => "assessment",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SchemaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "infrastructure" => Ok(SchemaKind::Infrastructure),
            "assessment" => Ok(SchemaKind::Assessment),
            _ => Err(format!("Unknown schema type: {}", s)),
        }
    }
}

/// Errors from schema sources
#[derive(Error, Debug)]
pub enum SchemaError {
    /// This source does not have the schema; a chain may try the next one
    #[error("Schema not found: {kind} in {source_name}")]
    NotFound { kind: SchemaKind, source_name: String },

    /// The remote publisher could not be reached or answered with an error
    #[error("Error fetching schema: {0}")]
    Http(String),

    /// The schema document is not valid JSON
    #[error("Invalid schema document from {origin}: {detail}")]
    Parse { origin: String, detail: String },

    /// Local cache read failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No source was able to provide the schema
    #[error("Schema source unavailable: {0}")]
    Unavailable(String),
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// A schema document together with where it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedSchema {
    pub kind: SchemaKind,
    /// File path or URL the document was read from
    pub origin: String,
    pub document: Value,
}

/// Something that can produce a published schema.
///
/// Return `SchemaError::NotFound` when the schema is simply absent so that a
/// `SchemaSourceChain` moves on to the next source.
pub trait SchemaSource: Send + Sync + fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn fetch(&self, kind: SchemaKind) -> SchemaResult<ResolvedSchema>;
}
