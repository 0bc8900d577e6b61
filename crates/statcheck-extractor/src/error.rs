//! Error types for the Extractor
//!
//! Extraction itself never fails; these cover configuration only.

use thiserror::Error;

/// Errors that can occur while configuring the extractor
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(String),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    TomlSerialize(String),
}

impl From<toml::de::Error> for ExtractorError {
    fn from(e: toml::de::Error) -> Self {
        ExtractorError::TomlParse(e.to_string())
    }
}

impl From<toml::ser::Error> for ExtractorError {
    fn from(e: toml::ser::Error) -> Self {
        ExtractorError::TomlSerialize(e.to_string())
    }
}
