//! Error types for runtime configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or validating a `GameConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    Parse { path: PathBuf, details: String },

    /// Start level outside 1..=total.
    #[error("Start level {level} is out of range 1..={total}")]
    StartLevelOutOfRange { level: u32, total: u32 },
}
