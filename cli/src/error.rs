//! Error types for the CLI

use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Field or schema parsing error
    #[error(transparent)]
    Schema(#[from] lvt_schema::Error),

    /// Seeding error
    #[error(transparent)]
    Seed(#[from] lvt_seed::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Other(format!("failed to encode JSON: {e}"))
    }
}
