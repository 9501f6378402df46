//! Corrigibility Framework validator CLI
//!
//! # Usage
//!
//! ```bash
//! # Validate a single infrastructure manifest
//! validate infrastructure infrastructure/aadhaar.json
//!
//! # Validate a corrigibility assessment
//! validate assessment assessments/upi.json
//!
//! # Validate every JSON file under a directory
//! validate all infrastructure/
//!
//! # Print the published assessment schema
//! validate fetch-schema assessment
//! ```
//!
//! # Exit Codes
//!
//! - 0: No violations
//! - 1: Violations found, bad arguments, or a file that could not be read

use corrigibility_cli::{init_tracing, parse_args, run_cli};

fn main() {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(code) => std::process::exit(code.into()),
    };

    init_tracing(cli.verbose);

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
