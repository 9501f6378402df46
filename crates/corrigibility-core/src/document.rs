//! Document vocabulary: lifecycle states, the five corrigibility tests, and
//! content-based classification of documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Lifecycle stage of a piece of digital infrastructure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Active,
    Deprecated,
    Sunset,
    Archived,
}

impl Lifecycle {
    /// Every accepted lifecycle, in the order used by error messages
    pub const ALL: [Lifecycle; 4] = [
        Lifecycle::Active,
        Lifecycle::Deprecated,
        Lifecycle::Sunset,
        Lifecycle::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Active => "active",
            Lifecycle::Deprecated => "deprecated",
            Lifecycle::Sunset => "sunset",
            Lifecycle::Archived => "archived",
        }
    }

    /// Comma-separated list of accepted values
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(Lifecycle::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Lifecycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("Unknown lifecycle: {}", s))
    }
}

/// The five tests every corrigibility assessment must record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestName {
    /// Can users leave the system
    Exit,
    /// Is the source available
    Code,
    /// Can the system be independently audited
    Audit,
    /// Do users have a say in its governance
    Govern,
    /// Can the system be forked
    Fork,
}

impl TestName {
    /// Declared order; rule checks iterate this, never map order
    pub const ALL: [TestName; 5] = [
        TestName::Exit,
        TestName::Code,
        TestName::Audit,
        TestName::Govern,
        TestName::Fork,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestName::Exit => "exit",
            TestName::Code => "code",
            TestName::Audit => "audit",
            TestName::Govern => "govern",
            TestName::Fork => "fork",
        }
    }
}

impl fmt::Display for TestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of document shapes the validator knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Infrastructure,
    Assessment,
    Unknown,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Infrastructure => "infrastructure",
            DocumentKind::Assessment => "assessment",
            DocumentKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a parsed document by sniffing its top-level keys.
///
/// A `tests` key wins over `meta`: a document carrying both is treated as an
/// assessment.
pub fn classify(document: &Value) -> DocumentKind {
    let kind = if has_key(document, "tests") {
        DocumentKind::Assessment
    } else if has_key(document, "meta") {
        DocumentKind::Infrastructure
    } else {
        DocumentKind::Unknown
    };
    tracing::debug!(kind = %kind, "Classified document");
    kind
}

/// Key presence on a mapping. Non-mapping values have no keys.
pub(crate) fn has_key(value: &Value, key: &str) -> bool {
    value.as_object().is_some_and(|map| map.contains_key(key))
}

/// Child lookup on a mapping. Non-mapping values have no children.
pub(crate) fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_object().and_then(|map| map.get(key))
}
