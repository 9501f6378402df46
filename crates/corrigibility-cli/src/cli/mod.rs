//! CLI module for the validator
//!
//! Argument parsing, mode dispatch and exit-code mapping. Rendering lives in
//! `output`.

pub mod commands;
pub mod output;

pub use commands::{ValidateCli, ValidateCommands};
pub use output::{OutputFormat, Report, ValidationMode};

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use corrigibility_core::{DocumentKind, ValidatorConfig, ValidatorError};
use std::ffi::OsString;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// No violations and no hard failure
    Success = 0,
    /// Violations found, or a hard failure such as a bad path
    Failure = 1,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from whether any violation was reported
    pub fn from_violations(has_violations: bool) -> Self {
        if has_violations {
            ExitCode::Failure
        } else {
            ExitCode::Success
        }
    }
}

/// Document types accepted as the first argument, for error messages
pub const DOCUMENT_TYPES: &str = "infrastructure, assessment, or all";

/// Parse arguments, printing usage or an unknown-type error on failure.
///
/// Help and version requests are reported as `Err(ExitCode::Success)` once
/// printed.
pub fn parse_args<I, T>(args: I) -> Result<ValidateCli, ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    ValidateCli::try_parse_from(args).map_err(report_parse_error)
}

fn report_parse_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::Success
        }
        ErrorKind::InvalidSubcommand => {
            let name = match err.get(ContextKind::InvalidSubcommand) {
                Some(ContextValue::String(name)) => name.clone(),
                _ => String::new(),
            };
            eprintln!("{}", ValidatorError::UnknownSchemaType(name));
            eprintln!("Use: {}", DOCUMENT_TYPES);
            ExitCode::Failure
        }
        _ => {
            // Missing subcommand or path: clap's message carries the usage text
            let _ = err.print();
            ExitCode::Failure
        }
    }
}

/// Run the parsed command and return the exit code
pub fn run(cli: ValidateCli) -> anyhow::Result<ExitCode> {
    let config = cli.config();
    let options = commands::RenderOptions {
        format: cli.format,
        quiet: cli.quiet,
    };

    match cli.command {
        ValidateCommands::Infrastructure { path } => {
            commands::execute_single(DocumentKind::Infrastructure, &path, &options)
        }
        ValidateCommands::Assessment { path } => {
            commands::execute_single(DocumentKind::Assessment, &path, &options)
        }
        ValidateCommands::All { directory } => commands::execute_all(&directory, &options),
        ValidateCommands::FetchSchema { kind } => commands::execute_fetch_schema(kind, &config),
    }
}

impl ValidateCli {
    /// Resolve schema settings: flags and their env vars first, defaults after
    pub fn config(&self) -> ValidatorConfig {
        let mut builder = ValidatorConfig::builder();
        if let Some(dir) = &self.schema_dir {
            builder = builder.schema_dir(dir.clone());
        }
        if let Some(url) = &self.schema_base_url {
            builder = builder.schema_base_url(url.clone());
        }
        if let Some(timeout) = self.http_timeout_ms {
            builder = builder.http_timeout_ms(timeout);
        }
        builder.build()
    }
}
