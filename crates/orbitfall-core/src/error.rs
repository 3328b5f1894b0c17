//! Error types for configuration and user input.

use std::path::PathBuf;

use thiserror::Error;

/// A configuration that cannot be loaded or cannot drive a simulation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("world bounds must satisfy left < right and bottom < top (got {left}, {right}, {bottom}, {top})")]
    InvalidBounds {
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
    },

    #[error("display size must be positive (got {width}x{height})")]
    InvalidDisplay { width: u32, height: u32 },

    #[error("time step must be finite and positive (got {0})")]
    InvalidTimeStep(f64),

    #[error("time scale must be finite and positive (got {0})")]
    InvalidTimeScale(f64),

    #[error("tick interval must be positive")]
    InvalidTickInterval,

    #[error("body {name:?} has invalid radius {radius}")]
    InvalidRadius { name: String, radius: f64 },

    #[error("body {name:?} has negative or non-finite mass {mass}")]
    NegativeMass { name: String, mass: f64 },

    #[error("body {name:?} has a non-finite initial state")]
    NonFiniteState { name: String },

    #[error("body name {0:?} is declared more than once")]
    DuplicateBody(String),

    #[error("pair references unknown body {0:?}")]
    UnknownBody(String),

    #[error("body {0:?} cannot be paired with itself")]
    SelfPair(String),

    #[error("invalid debris settings: {0}")]
    InvalidDebris(&'static str),

    #[error("minimum gravity distance must be finite and positive (got {0})")]
    InvalidDistanceGuard(f64),
}

/// Failure reading a number from the user.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{prompt}: {input:?} is not a number")]
    NotANumber { prompt: String, input: String },

    #[error("{prompt}: no valid number after repeated attempts")]
    Exhausted { prompt: String },

    #[error("input closed while reading {prompt}")]
    Closed { prompt: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
