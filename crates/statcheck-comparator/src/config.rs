//! Comparator configuration

use crate::error::ComparatorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for data fetching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorConfig {
    /// Maximum provider calls in flight at once
    pub max_concurrency: usize,

    /// Timeout for a single provider call (seconds)
    pub fetch_timeout_secs: u64,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            fetch_timeout_secs: 10,
        }
    }
}

impl ComparatorConfig {
    /// Get the fetch timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ComparatorError> {
        if self.max_concurrency == 0 {
            return Err(ComparatorError::Config(
                "max_concurrency must be greater than 0".to_string(),
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ComparatorError::Config(
                "fetch_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Aggressive preset: more parallel calls, short timeout
    pub fn aggressive() -> Self {
        Self {
            max_concurrency: 16,
            fetch_timeout_secs: 3,
        }
    }

    /// Lenient preset: few parallel calls, long timeout
    pub fn lenient() -> Self {
        Self {
            max_concurrency: 2,
            fetch_timeout_secs: 30,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ComparatorError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ComparatorError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ComparatorConfig::default();
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ComparatorConfig::aggressive().validate().is_ok());
        assert!(ComparatorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = ComparatorConfig {
            max_concurrency: 0,
            ..ComparatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ComparatorConfig::lenient();
        let parsed = ComparatorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
