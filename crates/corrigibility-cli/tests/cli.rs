//! End-to-end tests for the `validate` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const VALID_MANIFEST: &str = r#"{
  "meta": {"system_id": "aadhaar", "lifecycle": "active"},
  "access": {"offline_equivalent": true}
}"#;

const ZOMBIE_MANIFEST: &str = r#"{"meta": {"lifecycle": "zombie"}}"#;

const PARTIAL_ASSESSMENT: &str = r#"{
  "target": "upi",
  "assessed_by": "civic-audit",
  "tests": {"exit": {"pass": true}, "code": {"pass": true}},
  "verdict": {"corrigible": true}
}"#;

const CORRIGIBLE_ASSESSMENT: &str = r#"{
  "target": "upi",
  "assessed_by": "civic-audit",
  "tests": {
    "exit": {"pass": true},
    "code": {"pass": true},
    "audit": {"pass": true},
    "govern": {"pass": true},
    "fork": {"pass": true}
  },
  "verdict": {"corrigible": true}
}"#;

fn validate() -> Command {
    let mut cmd = Command::cargo_bin("validate").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("VALIDATE_FORMAT")
        .env_remove("VALIDATE_SCHEMA_DIR")
        .env_remove("VALIDATE_SCHEMA_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn valid_manifest_passes() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "aadhaar.json", VALID_MANIFEST);

    validate()
        .arg("infrastructure")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Valid infrastructure:"));
}

#[test]
fn zombie_lifecycle_reports_all_violations() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "zombie.json", ZOMBIE_MANIFEST);

    validate()
        .arg("infrastructure")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Validation errors in"))
        .stdout(predicate::str::contains("  - Missing required field: access"))
        .stdout(predicate::str::contains(
            "  - Missing required field: meta.system_id",
        ))
        .stdout(predicate::str::contains(
            "  - Invalid lifecycle value. Must be one of: active, deprecated, sunset, archived",
        ));
}

#[test]
fn partial_assessment_reports_missing_tests_and_inconsistency() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "upi.json", PARTIAL_ASSESSMENT);

    validate()
        .arg("assessment")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Missing required field: tests.audit"))
        .stdout(predicate::str::contains("Missing required field: tests.govern"))
        .stdout(predicate::str::contains("Missing required field: tests.fork"))
        .stdout(predicate::str::contains(
            "verdict.corrigible inconsistent with test results. Corrigible requires all five tests to pass.",
        ));
}

#[test]
fn corrigible_assessment_passes() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "upi.json", CORRIGIBLE_ASSESSMENT);

    validate()
        .arg("assessment")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Valid assessment:"));
}

#[test]
fn mixed_directory_lists_only_failing_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "good/aadhaar.json", VALID_MANIFEST);
    write(dir.path(), "good/upi.json", CORRIGIBLE_ASSESSMENT);
    write(dir.path(), "notes.txt", "not json at all");
    write(dir.path(), "bad.json", r#"{"random": 1}"#);

    validate()
        .arg("all")
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("bad.json:"))
        .stdout(predicate::str::contains("  - Unknown schema type"))
        .stdout(predicate::str::contains("aadhaar.json").not())
        .stdout(predicate::str::contains("upi.json").not());
}

#[test]
fn clean_directory_passes() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "aadhaar.json", VALID_MANIFEST);

    validate()
        .arg("all")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("All files valid in"));
}

#[test]
fn broken_json_in_directory_does_not_stop_the_walk() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a_broken.json", "{ nope");
    write(dir.path(), "b_unknown.json", "{}");

    validate()
        .arg("all")
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("a_broken.json:"))
        .stdout(predicate::str::contains("  - Invalid JSON:"))
        .stdout(predicate::str::contains("b_unknown.json:"));
}

#[test]
fn no_arguments_prints_usage_and_fails() {
    validate()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn subcommand_without_path_fails() {
    validate()
        .arg("assessment")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unknown_type_is_rejected() {
    validate()
        .args(["widget", "x.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown schema type: widget"))
        .stderr(predicate::str::contains(
            "Use: infrastructure, assessment, or all",
        ));
}

#[test]
fn missing_file_is_a_hard_failure() {
    let dir = TempDir::new().unwrap();

    validate()
        .arg("infrastructure")
        .arg(dir.path().join("absent.json"))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("File not found: "));
}

#[test]
fn malformed_single_file_is_a_hard_failure() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "broken.json", "{ \"meta\": ");

    validate()
        .arg("infrastructure")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Invalid JSON: "));
}

#[test]
fn json_format_emits_a_report() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "zombie.json", ZOMBIE_MANIFEST);

    let output = validate()
        .args(["--format", "json", "infrastructure"])
        .arg(&path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["mode"], "infrastructure");
    assert_eq!(report["files"][0]["violations"][0]["code"], "missing_field");
    assert_eq!(report["files"][0]["violations"][2]["code"], "invalid_lifecycle");
}

#[test]
fn format_can_come_from_the_environment() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "aadhaar.json", VALID_MANIFEST);

    validate()
        .env("VALIDATE_FORMAT", "yaml")
        .arg("infrastructure")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid: true"));
}

#[test]
fn quiet_suppresses_success_line() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "aadhaar.json", VALID_MANIFEST);

    validate()
        .args(["-q", "infrastructure"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn fetch_schema_reads_the_cache_directory() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "infrastructure.json", r#"{"title": "Infrastructure"}"#);

    validate()
        .arg("--schema-dir")
        .arg(dir.path())
        .args(["fetch-schema", "infrastructure"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Infrastructure\""));
}
