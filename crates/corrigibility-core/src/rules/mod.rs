//! Rule framework for manifest and assessment validation
//!
//! Rules are pure: they read a parsed document and return every violation
//! they find, in a fixed order. Nothing here stops at the first failure.

pub mod assessment;
pub mod infrastructure;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::document::{child, has_key, DocumentKind};

pub use assessment::{validate_assessment, AssessmentRules};
pub use infrastructure::{validate_infrastructure, InfrastructureRules};

/// Categories of violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// A required key is absent
    MissingField,
    /// `meta.lifecycle` is outside the accepted set
    InvalidLifecycle,
    /// A value has the wrong JSON type
    InvalidType,
    /// `verdict.corrigible` disagrees with the test results
    InconsistentVerdict,
    /// Batch mode could not tell what kind of document this is
    UnknownSchema,
    /// Batch mode could not parse the file
    InvalidJson,
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationCode::MissingField => write!(f, "missing_field"),
            ViolationCode::InvalidLifecycle => write!(f, "invalid_lifecycle"),
            ViolationCode::InvalidType => write!(f, "invalid_type"),
            ViolationCode::InconsistentVerdict => write!(f, "inconsistent_verdict"),
            ViolationCode::UnknownSchema => write!(f, "unknown_schema"),
            ViolationCode::InvalidJson => write!(f, "invalid_json"),
        }
    }
}

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// What kind of rule failed
    pub code: ViolationCode,
    /// Dotted path of the offending field (empty for whole-document findings)
    pub path: String,
    /// Human-readable description
    pub message: String,
}

impl Violation {
    pub fn new(code: ViolationCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn missing_field(path: impl Into<String>) -> Self {
        let path = path.into();
        let message = format!("Missing required field: {}", path);
        Self::new(ViolationCode::MissingField, path, message)
    }

    pub fn must_be_boolean(path: impl Into<String>) -> Self {
        let path = path.into();
        let message = format!("{} must be boolean", path);
        Self::new(ViolationCode::InvalidType, path, message)
    }

    pub fn unknown_schema() -> Self {
        Self::new(ViolationCode::UnknownSchema, "", "Unknown schema type")
    }

    pub fn invalid_json(detail: impl fmt::Display) -> Self {
        Self::new(ViolationCode::InvalidJson, "", format!("Invalid JSON: {}", detail))
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A set of rules for one document kind
pub trait RuleSet: Send + Sync {
    /// Document kind this rule set validates
    fn kind(&self) -> DocumentKind;

    /// Evaluate every rule, returning violations in declared order
    fn validate(&self, document: &Value) -> Vec<Violation>;
}

/// Rules that always report the document as unclassifiable
pub struct UnknownDocumentRules;

impl RuleSet for UnknownDocumentRules {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Unknown
    }

    fn validate(&self, _document: &Value) -> Vec<Violation> {
        vec![Violation::unknown_schema()]
    }
}

/// Rule set for a document kind
pub fn rules_for(kind: DocumentKind) -> &'static dyn RuleSet {
    match kind {
        DocumentKind::Infrastructure => &InfrastructureRules,
        DocumentKind::Assessment => &AssessmentRules,
        DocumentKind::Unknown => &UnknownDocumentRules,
    }
}

/// Push one missing-field violation per absent key, in `keys` order.
///
/// `prefix` is prepended to the reported path (e.g. `"meta."`).
pub(crate) fn require_fields(
    value: &Value,
    keys: &[&str],
    prefix: &str,
    violations: &mut Vec<Violation>,
) {
    for key in keys {
        if !has_key(value, key) {
            violations.push(Violation::missing_field(format!("{}{}", prefix, key)));
        }
    }
}

/// Look up a dotted child path, e.g. `["verdict", "corrigible"]`
pub(crate) fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| child(current, key))
}
