//! Error types for registry loading

use thiserror::Error;

/// Errors that can occur while building a registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Registry file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry file is not valid TOML
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Two entries share an id
    #[error("Duplicate series id: {0}")]
    DuplicateId(String),

    /// An entry failed validation
    #[error("Invalid series '{id}': {reason}")]
    InvalidSeries {
        /// Offending series id
        id: String,
        /// What is wrong with it
        reason: String,
    },
}
