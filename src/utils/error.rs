//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading and parsing ops dumps
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No \"ops\" or \"Ops\" array found in {0}")]
    MissingOps(PathBuf),

    #[error("Invalid op record #{index} in {path}: {source}")]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
}

/// Errors that can occur while loading analyzer configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
