//! Configuration for the batch pipeline
//!
//! One TOML document configures every stage:
//!
//! ```toml
//! [batch]
//! skip_low_priority = false
//! group_related = true
//! related_title_threshold = 0.6
//! interval_minutes = 1440
//!
//! [extractor]
//! token_window = 6
//!
//! [resolver]
//! min_match_score = 0.15
//! # max_candidates = 3    (unset: every candidate above the cutoff)
//!
//! [comparator]
//! max_concurrency = 4
//! fetch_timeout_secs = 10
//!
//! [synthesizer]
//! magnitude_ratio = 0.5
//!
//! [priority]
//! threshold = 30
//! ```
//!
//! Every section and field is optional.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use statcheck_comparator::ComparatorConfig;
use statcheck_extractor::{ExtractorConfig, PriorityWeights};
use statcheck_resolver::ResolverConfig;
use statcheck_synthesizer::SynthesizerConfig;
use std::path::Path;
use std::time::Duration;

/// Batch-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Report articles below the priority threshold without checking their claims
    pub skip_low_priority: bool,

    /// Fold articles with near-identical titles into the first of the group
    pub group_related: bool,

    /// Title similarity (0.0-1.0) above which articles are related
    pub related_title_threshold: f64,

    /// Minutes between scheduled runs
    pub interval_minutes: u64,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            skip_low_priority: false,
            group_related: true,
            related_title_threshold: 0.6,
            interval_minutes: 24 * 60,
        }
    }
}

/// Configuration for the whole pipeline
///
/// # Examples
///
/// ```
/// use statcheck_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::from_toml("[resolver]\nmax_candidates = 1\n").unwrap();
/// assert_eq!(config.resolver.max_candidates, Some(1));
/// assert_eq!(config.comparator.max_concurrency, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Batch-level settings
    pub batch: BatchSettings,
    /// Claim extraction
    pub extractor: ExtractorConfig,
    /// Series matching
    pub resolver: ResolverConfig,
    /// Data fetching
    pub comparator: ComparatorConfig,
    /// Verdict policy
    pub synthesizer: SynthesizerConfig,
    /// Priority scoring
    pub priority: PriorityWeights,
}

impl PipelineConfig {
    /// Aggressive preset: check only what scores, fetch fast, match strictly
    pub fn aggressive() -> Self {
        Self {
            batch: BatchSettings {
                skip_low_priority: true,
                ..BatchSettings::default()
            },
            extractor: ExtractorConfig::aggressive(),
            resolver: ResolverConfig::strict(),
            comparator: ComparatorConfig::aggressive(),
            synthesizer: SynthesizerConfig::strict(),
            priority: PriorityWeights::default(),
        }
    }

    /// Lenient preset: check everything, wait longer, match broadly
    pub fn lenient() -> Self {
        Self {
            batch: BatchSettings {
                group_related: false,
                ..BatchSettings::default()
            },
            extractor: ExtractorConfig::lenient(),
            resolver: ResolverConfig::permissive(),
            comparator: ComparatorConfig::lenient(),
            synthesizer: SynthesizerConfig::lenient(),
            priority: PriorityWeights::default(),
        }
    }

    /// Interval between scheduled runs
    ///
    /// Saturates for intervals [`PipelineConfig::validate`] would reject.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.batch.interval_minutes.saturating_mul(60))
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(0.0..=1.0).contains(&self.batch.related_title_threshold) {
            return Err(PipelineError::Config(format!(
                "related_title_threshold must be in [0, 1], got {}",
                self.batch.related_title_threshold
            )));
        }
        if self.batch.interval_minutes == 0 {
            return Err(PipelineError::Config(
                "interval_minutes must be greater than 0".to_string(),
            ));
        }
        if self.batch.interval_minutes.checked_mul(60).is_none() {
            return Err(PipelineError::Config(format!(
                "interval_minutes is too large: {}",
                self.batch.interval_minutes
            )));
        }
        self.extractor.validate()?;
        self.resolver.validate()?;
        self.comparator.validate()?;
        self.synthesizer.validate()?;
        self.priority.validate()?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, PipelineError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, PipelineError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load and validate configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let config = Self::from_toml(&std::fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_presets_are_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
        assert!(PipelineConfig::aggressive().validate().is_ok());
        assert!(PipelineConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_default_interval_is_daily() {
        assert_eq!(PipelineConfig::default().interval(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_oversized_interval_rejected() {
        let mut config = PipelineConfig::default();
        config.batch.interval_minutes = u64::MAX;
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
        assert_eq!(config.interval(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(PipelineConfig::from_toml("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig::aggressive();
        let parsed = PipelineConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_section_is_reported() {
        let config = PipelineConfig::from_toml("[comparator]\nmax_concurrency = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(PipelineError::Comparator(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[batch]\nskip_low_priority = true").unwrap();
        let config = PipelineConfig::load(file.path()).unwrap();
        assert!(config.batch.skip_low_priority);
    }
}
