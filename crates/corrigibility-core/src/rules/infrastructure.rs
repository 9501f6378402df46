//! Infrastructure manifest rules
//!
//! Checks, in order:
//! 1. `meta` and `access` are present
//! 2. `meta.system_id` and `meta.lifecycle` are present
//! 3. `meta.lifecycle` is an accepted lifecycle
//! 4. `access.offline_equivalent` is present
//! 5. `access.offline_equivalent` is a boolean
//!
//! Sub-field checks only run when their parent key exists.

use serde_json::Value;

use super::{require_fields, RuleSet, Violation, ViolationCode};
use crate::document::{child, DocumentKind, Lifecycle};

const TOP_LEVEL_FIELDS: [&str; 2] = ["meta", "access"];
const META_FIELDS: [&str; 2] = ["system_id", "lifecycle"];
const ACCESS_FIELDS: [&str; 1] = ["offline_equivalent"];

/// Rule set for infrastructure manifests
pub struct InfrastructureRules;

impl RuleSet for InfrastructureRules {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Infrastructure
    }

    fn validate(&self, document: &Value) -> Vec<Violation> {
        validate_infrastructure(document)
    }
}

/// Validate an infrastructure manifest
pub fn validate_infrastructure(document: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();

    require_fields(document, &TOP_LEVEL_FIELDS, "", &mut violations);

    if let Some(meta) = child(document, "meta") {
        require_fields(meta, &META_FIELDS, "meta.", &mut violations);

        if let Some(lifecycle) = child(meta, "lifecycle") {
            check_lifecycle(lifecycle, &mut violations);
        }
    }

    if let Some(access) = child(document, "access") {
        require_fields(access, &ACCESS_FIELDS, "access.", &mut violations);

        if let Some(offline) = child(access, "offline_equivalent") {
            if !offline.is_boolean() {
                violations.push(Violation::must_be_boolean("access.offline_equivalent"));
            }
        }
    }

    violations
}

fn check_lifecycle(lifecycle: &Value, violations: &mut Vec<Violation>) {
    let accepted = lifecycle
        .as_str()
        .is_some_and(|s| s.parse::<Lifecycle>().is_ok());

    if !accepted {
        violations.push(Violation::new(
            ViolationCode::InvalidLifecycle,
            "meta.lifecycle",
            format!(
                "Invalid lifecycle value. Must be one of: {}",
                Lifecycle::allowed_values()
            ),
        ));
    }
}
