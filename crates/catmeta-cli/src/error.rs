//! CLI error types.

use catmeta_core::DecodeError;
use thiserror::Error;

/// Errors reported by the command-line validator.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid log level `{0}`")]
    LogLevel(String),

    #[error("snapshot rejected: {0}")]
    Decode(#[from] DecodeError),
}
