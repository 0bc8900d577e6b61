//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for the keyword extractor
///
/// Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters); longer text is truncated
    pub max_text_length: usize,

    /// How many tokens a direction cue or magnitude may sit from a metric keyword
    pub token_window: usize,

    /// Extra metric terms (surface form → canonical keyword)
    pub extra_metrics: BTreeMap<String, String>,

    /// Extra subject terms (surface form → canonical keyword)
    pub extra_subjects: BTreeMap<String, String>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.max_text_length == 0 {
            return Err(ExtractorError::Config(
                "max_text_length must be greater than 0".to_string(),
            ));
        }
        if self.token_window == 0 {
            return Err(ExtractorError::Config(
                "token_window must be greater than 0".to_string(),
            ));
        }
        if let Some((surface, _)) = self
            .extra_metrics
            .iter()
            .chain(self.extra_subjects.iter())
            .find(|(surface, canonical)| surface.trim().is_empty() || canonical.trim().is_empty())
        {
            return Err(ExtractorError::Config(format!(
                "empty lexicon entry for '{}'",
                surface
            )));
        }
        Ok(())
    }

    /// Aggressive preset: tight window, shorter texts
    pub fn aggressive() -> Self {
        Self {
            max_text_length: 20_000,
            token_window: 4,
            ..Self::default()
        }
    }

    /// Lenient preset: wide window, longer texts
    pub fn lenient() -> Self {
        Self {
            max_text_length: 100_000,
            token_window: 10,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            token_window: 6,
            extra_metrics: BTreeMap::new(),
            extra_subjects: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
        assert!(ExtractorConfig::aggressive().validate().is_ok());
        assert!(ExtractorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = ExtractorConfig::default();
        config.token_window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_extra_term_rejected() {
        let mut config = ExtractorConfig::default();
        config.extra_metrics.insert("전세가율".to_string(), " ".to_string());
        assert!(matches!(config.validate(), Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ExtractorConfig::lenient();
        config
            .extra_metrics
            .insert("전세가율".to_string(), "jeonse-ratio".to_string());

        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(parsed.token_window, 10);
        assert_eq!(parsed.extra_metrics.get("전세가율").unwrap(), "jeonse-ratio");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("token_window = 3\n").unwrap();
        assert_eq!(parsed.token_window, 3);
        assert_eq!(parsed.max_text_length, 50_000);
        assert!(parsed.extra_metrics.is_empty());
    }
}
