//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pipeline setup or input error
    #[error(transparent)]
    Pipeline(#[from] statcheck_pipeline::PipelineError),

    /// Registry file error
    #[error("Registry error: {0}")]
    Registry(#[from] statcheck_registry::RegistryError),

    /// Snapshot file error
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] statcheck_provider::SnapshotError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
