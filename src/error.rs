//! Error types for the harness.
//!
//! The measurement core itself has no failure paths. Errors only come from
//! the edges: loading configuration and writing to an output sink.

use thiserror::Error;

/// Errors raised while configuring a run or reporting its results
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
