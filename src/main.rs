//! risr CLI entrypoint.
//!
//! Loads configuration, installs logging, and runs one collection step.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use risr::{CollectError, RisrConfig};
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> ExitCode {
    init_tracing();

    match load_config().and_then(|config| cli::run(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs to stderr, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`CollectError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<RisrConfig, CollectError> {
    RisrConfig::load().map_err(|error| CollectError::Configuration {
        message: error.to_string(),
    })
}
