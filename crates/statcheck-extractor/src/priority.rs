//! Fact-check priority scoring

use crate::error::ExtractorError;
use crate::signals::ArticleSignals;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Points per signal and the thresholds applied to the total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    /// Article contains a checkable statistical claim
    pub statistical_claim: u32,
    /// Causal phrasing
    pub causal_claim: u32,
    /// Extreme wording
    pub extreme_language: u32,
    /// Unattributed source phrasing
    pub vague_source: u32,
    /// Political or economic topic
    pub political_economic: u32,
    /// Strong wording in the title
    pub title_keyword: u32,
    /// Minimum total for an article to be checked
    pub threshold: u32,
    /// Minimum total for high priority
    pub high: u32,
    /// Minimum total for medium priority
    pub medium: u32,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            statistical_claim: 30,
            causal_claim: 20,
            extreme_language: 15,
            vague_source: 25,
            political_economic: 10,
            title_keyword: 20,
            threshold: 30,
            high: 85,
            medium: 70,
        }
    }
}

impl PriorityWeights {
    /// Validate the thresholds
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.medium > self.high {
            return Err(ExtractorError::Config(format!(
                "medium threshold {} above high threshold {}",
                self.medium, self.high
            )));
        }
        Ok(())
    }
}

/// Priority band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Below the medium threshold
    Low,
    /// At or above the medium threshold
    Medium,
    /// At or above the high threshold
    High,
}

impl Priority {
    /// Get the priority name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score of one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityScore {
    /// Sum of awarded points
    pub total: u32,
    /// Points per signal name; only awarded signals appear
    pub breakdown: BTreeMap<String, u32>,
    /// Total reaches the threshold
    pub should_factcheck: bool,
    /// Priority band
    pub priority: Priority,
}

/// Scores articles from their signals
#[derive(Debug, Clone, Default)]
pub struct PriorityScorer {
    weights: PriorityWeights,
}

impl PriorityScorer {
    /// Create a scorer with the given weights
    pub fn new(weights: PriorityWeights) -> Self {
        Self { weights }
    }

    /// The active weights
    pub fn weights(&self) -> &PriorityWeights {
        &self.weights
    }

    /// Score an article
    ///
    /// `claim_count` is the number of claims extracted from it; any claim or
    /// any number with a unit counts as statistical content.
    pub fn score(&self, signals: &ArticleSignals, claim_count: usize) -> PriorityScore {
        let w = &self.weights;
        let awarded = [
            (
                "statistical_claim",
                claim_count > 0 || signals.statistic_mentions > 0,
                w.statistical_claim,
            ),
            ("causal_claim", signals.causal, w.causal_claim),
            ("extreme_language", signals.extreme(), w.extreme_language),
            ("vague_source", signals.vague_source, w.vague_source),
            ("political_economic", signals.political_economic, w.political_economic),
            ("title_keyword", signals.title_keyword, w.title_keyword),
        ];

        let breakdown: BTreeMap<String, u32> = awarded
            .into_iter()
            .filter(|(_, hit, _)| *hit)
            .map(|(name, _, points)| (name.to_string(), points))
            .collect();
        let total = breakdown.values().sum();

        let priority = if total >= w.high {
            Priority::High
        } else if total >= w.medium {
            Priority::Medium
        } else {
            Priority::Low
        };

        PriorityScore {
            total,
            breakdown,
            should_factcheck: total >= w.threshold,
            priority,
        }
    }
}
