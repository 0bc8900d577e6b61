//! Resolver configuration

use crate::error::ResolverError;
use serde::{Deserialize, Serialize};

/// Configuration for series matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Candidates scoring below this are dropped (0.0-1.0, exclusive of 0)
    pub min_match_score: f64,

    /// Optional cap on candidates returned per claim; unset returns all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_candidates: Option<usize>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_match_score: 0.15,
            max_candidates: None,
        }
    }
}

impl ResolverConfig {
    /// Strict matching: higher cutoff, only the best candidate
    pub fn strict() -> Self {
        Self {
            min_match_score: 0.3,
            max_candidates: Some(1),
        }
    }

    /// Permissive matching: low cutoff, every candidate
    pub fn permissive() -> Self {
        Self {
            min_match_score: 0.05,
            max_candidates: None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ResolverError> {
        if !(self.min_match_score > 0.0 && self.min_match_score <= 1.0) {
            return Err(ResolverError::Config(format!(
                "min_match_score must be in (0, 1], got {}",
                self.min_match_score
            )));
        }
        if self.max_candidates == Some(0) {
            return Err(ResolverError::Config(
                "max_candidates must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ResolverError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ResolverError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.min_match_score, 0.15);
        assert_eq!(config.max_candidates, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ResolverConfig::strict().validate().is_ok());
        assert!(ResolverConfig::permissive().validate().is_ok());
    }

    #[test]
    fn test_zero_cutoff_rejected() {
        let config = ResolverConfig {
            min_match_score: 0.0,
            ..ResolverConfig::default()
        };
        assert!(matches!(config.validate(), Err(ResolverError::Config(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = ResolverConfig::strict().to_toml().unwrap();
        let parsed = ResolverConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, ResolverConfig::strict());

        let partial = ResolverConfig::from_toml("max_candidates = 2").unwrap();
        assert_eq!(partial.max_candidates, Some(2));
        assert_eq!(partial.min_match_score, 0.15);
    }
}
