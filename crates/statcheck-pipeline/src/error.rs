//! Error types for the batch pipeline

use statcheck_comparator::ComparatorError;
use statcheck_extractor::ExtractorError;
use statcheck_resolver::ResolverError;
use statcheck_synthesizer::SynthesizerError;
use thiserror::Error;

/// Errors that can occur while setting up or feeding the pipeline
///
/// Claim-level problems (no match, provider failures) never surface here;
/// they become unverifiable verdicts.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Article file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Article file is not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Extractor setup failed
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// Resolver setup failed
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// Comparator setup failed
    #[error(transparent)]
    Comparator(#[from] ComparatorError),

    /// Synthesizer setup failed
    #[error(transparent)]
    Synthesizer(#[from] SynthesizerError),
}
