//! Output formatting for the validator CLI
//!
//! Text output keeps the plain line shapes CI logs grep for; JSON and YAML
//! serialize the same `Report`.

use clap::ValueEnum;
use colored::Colorize;
use corrigibility_core::{BatchReport, DocumentKind, FileReport, Violation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Which command produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    Infrastructure,
    Assessment,
    All,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Infrastructure => write!(f, "infrastructure"),
            ValidationMode::Assessment => write!(f, "assessment"),
            ValidationMode::All => write!(f, "all"),
        }
    }
}

impl From<DocumentKind> for ValidationMode {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Assessment => ValidationMode::Assessment,
            // Single-file mode is never dispatched as unknown
            DocumentKind::Infrastructure | DocumentKind::Unknown => {
                ValidationMode::Infrastructure
            }
        }
    }
}

/// Result of one CLI run, ready for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub valid: bool,
    pub mode: ValidationMode,
    /// File or directory named on the command line
    pub target: PathBuf,
    /// Files examined; 1 in single-file mode
    pub files_checked: usize,
    /// Single-file mode: the file itself. Batch mode: failing files only.
    pub files: Vec<FileReport>,
}

impl Report {
    pub fn single(kind: DocumentKind, path: &Path, violations: Vec<Violation>) -> Self {
        Self {
            valid: violations.is_empty(),
            mode: kind.into(),
            target: path.to_path_buf(),
            files_checked: 1,
            files: vec![FileReport {
                path: path.to_path_buf(),
                kind: Some(kind),
                violations,
            }],
        }
    }

    pub fn batch(directory: &Path, report: BatchReport) -> Self {
        Self {
            valid: report.is_valid(),
            mode: ValidationMode::All,
            target: directory.to_path_buf(),
            files_checked: report.files_checked,
            files: report.failures,
        }
    }

    /// Render to stdout
    pub fn render(&self, format: OutputFormat, quiet: bool) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_to(&mut out, format, quiet)
    }

    /// Render into any writer
    pub fn write_to<W: Write>(
        &self,
        out: &mut W,
        format: OutputFormat,
        quiet: bool,
    ) -> anyhow::Result<()> {
        match format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(self)?)?;
            }
            OutputFormat::Yaml => {
                write!(out, "{}", serde_yaml::to_string(self)?)?;
            }
            OutputFormat::Text => self.write_text(out, quiet)?,
        }
        Ok(())
    }

    fn write_text<W: Write>(&self, out: &mut W, quiet: bool) -> io::Result<()> {
        if self.valid {
            if !quiet {
                writeln!(out, "{}", self.success_line().green())?;
            }
            return Ok(());
        }

        match self.mode {
            ValidationMode::All => {
                for file in &self.files {
                    writeln!(out)?;
                    writeln!(out, "{}", format!("{}:", file.path.display()).red().bold())?;
                    write_violations(out, &file.violations)?;
                }
            }
            ValidationMode::Infrastructure | ValidationMode::Assessment => {
                let header = format!("Validation errors in {}:", self.target.display());
                writeln!(out, "{}", header.red().bold())?;
                for file in &self.files {
                    write_violations(out, &file.violations)?;
                }
            }
        }
        Ok(())
    }

    fn success_line(&self) -> String {
        match self.mode {
            ValidationMode::All => format!("All files valid in {}", self.target.display()),
            mode => format!("Valid {}: {}", mode, self.target.display()),
        }
    }
}

fn write_violations<W: Write>(out: &mut W, violations: &[Violation]) -> io::Result<()> {
    for violation in violations {
        writeln!(out, "  - {}", violation)?;
    }
    Ok(())
}
