//! tracing-subscriber setup.
//!
//! While the terminal display owns stdout, logs go to a file; headless runs
//! log to stderr.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Filter from `--verbose`, else `RUST_LOG`, else `info`.
pub fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. With `log_file` set, output is written
/// there without ANSI colors.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<(), AppError> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(verbose));

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| AppError::Logging(e.to_string()))
}
