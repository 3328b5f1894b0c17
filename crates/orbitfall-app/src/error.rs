//! Top-level error for the orbitfall binary.

use thiserror::Error;

use orbitfall_core::error::{ConfigError, InputError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to install logger: {0}")]
    Logging(String),

    #[error("{0} thread panicked")]
    ThreadPanicked(&'static str),
}
