//! Synthesizer configuration

use crate::error::SynthesizerError;
use serde::{Deserialize, Serialize};
use statcheck_domain::Coverage;

/// Verdict policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    /// Share of the asserted magnitude the observed change must reach
    pub magnitude_ratio: f64,

    /// Confidence weight for full coverage
    pub full_weight: f64,

    /// Confidence weight for partial coverage
    pub partial_weight: f64,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            magnitude_ratio: 0.5,
            full_weight: 1.0,
            partial_weight: 0.6,
        }
    }
}

impl SynthesizerConfig {
    /// Strict preset: the observed change must match the asserted one
    pub fn strict() -> Self {
        Self {
            magnitude_ratio: 0.9,
            full_weight: 1.0,
            partial_weight: 0.4,
        }
    }

    /// Lenient preset: a quarter of the asserted change is enough
    pub fn lenient() -> Self {
        Self {
            magnitude_ratio: 0.25,
            full_weight: 1.0,
            partial_weight: 0.8,
        }
    }

    /// Confidence weight for a coverage level
    pub fn coverage_weight(&self, coverage: Coverage) -> f64 {
        match coverage {
            Coverage::Full => self.full_weight,
            Coverage::Partial => self.partial_weight,
            Coverage::None => 0.0,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SynthesizerError> {
        if !(self.magnitude_ratio > 0.0 && self.magnitude_ratio <= 1.0) {
            return Err(SynthesizerError::Config(format!(
                "magnitude_ratio must be in (0, 1], got {}",
                self.magnitude_ratio
            )));
        }
        for (name, weight) in [("full_weight", self.full_weight), ("partial_weight", self.partial_weight)] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(SynthesizerError::Config(format!(
                    "{} must be in [0, 1], got {}",
                    name, weight
                )));
            }
        }
        if self.partial_weight > self.full_weight {
            return Err(SynthesizerError::Config(
                "partial_weight must not exceed full_weight".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, SynthesizerError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, SynthesizerError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
