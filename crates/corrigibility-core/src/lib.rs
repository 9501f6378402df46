//! Corrigibility Framework validation core
//!
//! Structural validation of two JSON document types:
//!
//! - **Infrastructure manifests** describe a piece of digital infrastructure:
//!   its identifier, lifecycle stage and whether an offline equivalent exists.
//! - **Corrigibility assessments** record five named tests (`exit`, `code`,
//!   `audit`, `govern`, `fork`) and an optional verdict on whether the system
//!   is corrigible.
//!
//! ## Architecture
//!
//! 1. **Loader** (`loader`): reads a document from disk with typed failures.
//! 2. **Rules** (`rules`): pure, ordered rule sets returning every violation.
//! 3. **Batch** (`batch`): directory discovery and content-based dispatch.
//! 4. **Schema** (`schema`): fetches the published schemas, local copy first.
//!
//! ## Example
//!
//! ```rust
//! use corrigibility_core::{validate_infrastructure, Violation};
//! use serde_json::json;
//!
//! let manifest = json!({"meta": {"lifecycle": "zombie"}});
//! let violations: Vec<Violation> = validate_infrastructure(&manifest);
//!
//! assert_eq!(violations[0].to_string(), "Missing required field: access");
//! ```

pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod rules;
pub mod schema;

pub use batch::{validate_directory, BatchReport, FileReport};
pub use config::ValidatorConfig;
pub use document::{classify, DocumentKind, Lifecycle, TestName};
pub use error::{Result, ValidatorError};
pub use loader::{load_document, parse_document};
pub use rules::{
    rules_for, validate_assessment, validate_infrastructure, RuleSet, Violation, ViolationCode,
};
pub use schema::{SchemaError, SchemaKind, SchemaSource, SchemaSourceChain};
