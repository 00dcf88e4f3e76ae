//! Command-line interface for macrosub
//! Rewrites C-family source files in place, substituting or deleting names.
//!
//! Usage:
//!   macrosub [-D<NAME>[=<VALUE>]]... [--] <file>...
//!
//! Exit status: 0 on success (even if no file changed), 1 when a file could
//! not be processed, 2 on a command-line or configuration error.

use macrosub::batch::run_batch;
use macrosub::config::{Loader, CONFIG_FILE};
use macrosub::invocation::{Invocation, USAGE};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE_ERROR: u8 = 2;

fn main() -> ExitCode {
    let config = match Loader::new()
        .with_optional_file(CONFIG_FILE)
        .with_environment()
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("macrosub: configuration error: {}", e);
            return ExitCode::from(USAGE_ERROR);
        }
    };
    init_logging(&config.logging.filter);

    let invocation = match Invocation::parse(std::env::args_os().skip(1)) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("macrosub: {}", e);
            eprintln!("{}", USAGE);
            return ExitCode::from(USAGE_ERROR);
        }
    };

    tracing::debug!(
        names = ?invocation.mappings.names(),
        files = invocation.files.len(),
        "mappings defined"
    );

    let report = run_batch(
        &invocation.files,
        &invocation.mappings,
        &config.batch_options(),
    );

    for failure in report.failures() {
        eprintln!("macrosub: {}", failure);
    }
    if !report.skipped.is_empty() {
        eprintln!(
            "macrosub: aborted, {} file(s) not processed",
            report.skipped.len()
        );
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Log to stderr. `RUST_LOG` wins over the configured filter.
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
