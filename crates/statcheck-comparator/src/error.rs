//! Comparator error types

use thiserror::Error;

/// Errors that can occur while configuring the comparator
///
/// Comparisons themselves never fail; provider problems become
/// [`statcheck_domain::Coverage::None`] results.
#[derive(Error, Debug)]
pub enum ComparatorError {
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
