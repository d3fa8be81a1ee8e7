//! CLI error types

use forkjoin_kernel::field::UnknownField;
use forkjoin_kernel::{IntegrationError, SortError};
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sort kernel error
    #[error("Sort error: {0}")]
    Sort(#[from] SortError),

    /// Integration kernel error
    #[error("Integration error: {0}")]
    Integration(#[from] IntegrationError),

    /// Unknown scalar field name
    #[error("{0}")]
    Field(#[from] UnknownField),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Result check failed after a run
    #[error("Verification failed: {0}")]
    Verification(String),

    /// JSON output error
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
