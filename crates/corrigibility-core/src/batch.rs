//! Batch validation over a directory tree
//!
//! Every `.json` file below the root is parsed, classified by content and run
//! through the matching rule set. Files that fail to parse are recorded with
//! an `Invalid JSON` violation and the walk continues; only a root that cannot
//! be walked aborts the run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::document::{classify, DocumentKind};
use crate::error::{Result, ValidatorError};
use crate::loader::load_document;
use crate::rules::{rules_for, Violation};

/// Outcome for a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// `None` when the file could not be parsed
    pub kind: Option<DocumentKind>,
    pub violations: Vec<Violation>,
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Outcome for a whole directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of JSON files examined
    pub files_checked: usize,
    /// Files with at least one violation, in traversal order
    pub failures: Vec<FileReport>,
}

impl BatchReport {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn violation_count(&self) -> usize {
        self.failures.iter().map(|f| f.violations.len()).sum()
    }
}

/// Whether a path has a `json` extension (ASCII case-insensitive)
pub fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Recursively list JSON files under `root`, sorted by name within each directory
pub fn discover_json_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(ValidatorError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ValidatorError::Traversal(e.to_string()))?;
        // `Path::is_file` follows symlinks; the walk itself does not
        if entry.path().is_file() && is_json_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(root = %root.display(), count = files.len(), "Discovered JSON files");
    Ok(files)
}

/// Validate one file in batch mode, classifying it by content
pub fn validate_file(path: &Path) -> Result<FileReport> {
    match load_document(path) {
        Ok(document) => {
            let kind = classify(&document);
            let violations = rules_for(kind).validate(&document);
            Ok(FileReport {
                path: path.to_path_buf(),
                kind: Some(kind),
                violations,
            })
        }
        Err(ValidatorError::ParseError { detail, .. }) => {
            tracing::warn!(path = %path.display(), %detail, "Skipping unparsable file");
            Ok(FileReport {
                path: path.to_path_buf(),
                kind: None,
                violations: vec![Violation::invalid_json(detail)],
            })
        }
        Err(e) => Err(e),
    }
}

/// Validate every JSON file under `root`
pub fn validate_directory(root: impl AsRef<Path>) -> Result<BatchReport> {
    let root = root.as_ref();
    let files = discover_json_files(root)?;

    let mut report = BatchReport {
        files_checked: files.len(),
        failures: Vec::new(),
    };

    for path in &files {
        let file_report = validate_file(path)?;
        if !file_report.is_valid() {
            report.failures.push(file_report);
        }
    }

    tracing::info!(
        root = %root.display(),
        files = report.files_checked,
        failing = report.failures.len(),
        violations = report.violation_count(),
        "Batch validation finished"
    );

    Ok(report)
}
