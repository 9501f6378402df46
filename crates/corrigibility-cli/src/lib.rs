//! Command-line front end for the Corrigibility Framework validator
//!
//! Wraps `corrigibility-core` with argument parsing, report rendering and
//! process exit codes. The binary is `validate`.

pub mod cli;

pub use cli::{parse_args, ExitCode, OutputFormat, Report, ValidateCli, ValidateCommands};

use corrigibility_core::ValidatorError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Run the CLI with the given arguments and return the exit code.
///
/// Hard failures are printed to stderr and reported as `ExitCode::Failure`.
pub fn run_cli(cli: ValidateCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            let internal = e
                .downcast_ref::<ValidatorError>()
                .is_some_and(|err| !err.is_user_error());
            if internal {
                tracing::error!(error = ?e, "Validation aborted");
            }
            ExitCode::Failure
        }
    }
}

/// Default log level for a `-v` count
pub fn verbosity_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize logging to stderr. `RUST_LOG` directives are honored on top of
/// the verbosity default.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::from_default_env().add_directive(verbosity_level(verbose).into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
