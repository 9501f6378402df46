//! CLI command definitions for the validator
//!
//! Clap-based definitions for validating single documents, whole directories,
//! and fetching the published schemas.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use corrigibility_core::{
    load_document, rules_for, validate_directory, DocumentKind, SchemaKind, SchemaSource,
    SchemaSourceChain, ValidatorConfig,
};
use std::path::{Path, PathBuf};

use super::output::{OutputFormat, Report};
use super::ExitCode;

/// Corrigibility Framework validator
///
/// Validate infrastructure manifests and corrigibility assessments, one file
/// at a time or a whole directory at once.
#[derive(Parser, Debug)]
#[command(name = "validate")]
#[command(about = "Validate Corrigibility Framework manifests and assessments", long_about = None)]
#[command(version)]
#[command(subcommand_required = true, arg_required_else_help = true)]
pub struct ValidateCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress success lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format for validation results
    #[arg(long, value_enum, global = true, env = "VALIDATE_FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Directory holding cached schema files
    #[arg(long, global = true, env = "VALIDATE_SCHEMA_DIR")]
    pub schema_dir: Option<PathBuf>,

    /// Base URL the schemas are published under
    #[arg(long, global = true, env = "VALIDATE_SCHEMA_BASE_URL")]
    pub schema_base_url: Option<String>,

    /// Timeout for remote schema fetches in milliseconds
    #[arg(long, global = true, env = "VALIDATE_HTTP_TIMEOUT_MS")]
    pub http_timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: ValidateCommands,
}

/// Available validation commands
#[derive(Subcommand, Debug)]
pub enum ValidateCommands {
    /// Validate an infrastructure manifest
    Infrastructure {
        /// Path to the manifest
        path: PathBuf,
    },

    /// Validate a corrigibility assessment
    Assessment {
        /// Path to the assessment
        path: PathBuf,
    },

    /// Validate every JSON file under a directory
    ///
    /// Each file is classified by its content: a top-level `tests` key marks
    /// an assessment, otherwise a top-level `meta` key marks a manifest.
    All {
        /// Directory to walk recursively
        directory: PathBuf,
    },

    /// Print a published schema, from the cache directory if present
    FetchSchema {
        /// Schema to fetch: infrastructure or assessment
        kind: SchemaKind,
    },
}

/// Rendering options shared by the validation commands
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Validate one file against the rule set the user selected
pub fn execute_single(
    kind: DocumentKind,
    path: &Path,
    options: &RenderOptions,
) -> anyhow::Result<ExitCode> {
    let document = load_document(path)?;
    let violations = rules_for(kind).validate(&document);

    tracing::info!(
        path = %path.display(),
        kind = %kind,
        violations = violations.len(),
        "Validated document"
    );

    let report = Report::single(kind, path, violations);
    report.render(options.format, options.quiet)?;
    Ok(ExitCode::from_violations(!report.valid))
}

/// Validate every JSON file under `directory`
pub fn execute_all(directory: &Path, options: &RenderOptions) -> anyhow::Result<ExitCode> {
    let batch = validate_directory(directory)?;
    let report = Report::batch(directory, batch);
    report.render(options.format, options.quiet)?;
    Ok(ExitCode::from_violations(!report.valid))
}

/// Resolve a published schema and print it as pretty JSON
pub fn execute_fetch_schema(kind: SchemaKind, config: &ValidatorConfig) -> anyhow::Result<ExitCode> {
    let chain = SchemaSourceChain::from_config(config)?;
    tracing::debug!(?chain, kind = %kind, "Resolving schema");

    let schema = chain
        .fetch(kind)
        .with_context(|| format!("Could not fetch the {} schema", kind))?;
    tracing::info!(origin = %schema.origin, "Fetched schema");

    println!("{}", serde_json::to_string_pretty(&schema.document)?);
    Ok(ExitCode::Success)
}
