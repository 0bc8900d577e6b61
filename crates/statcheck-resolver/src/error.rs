//! Resolver error types

use thiserror::Error;

/// Errors that can occur while configuring the resolver
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Configuration failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
