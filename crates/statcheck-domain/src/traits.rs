//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Implementations live in other crates.

use crate::{Claim, Observation, ProviderError, SeriesMeta};
use chrono::NaiveDate;

/// Source of observations for a series
///
/// Implemented by the infrastructure layer (statcheck-provider). Calls may
/// block; the comparator runs them off the async executor.
pub trait DataProvider {
    /// Fetch observations for `series_id` between `start` and `end` inclusive,
    /// ascending by timestamp
    fn fetch_observations(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Observation>, ProviderError>;
}

/// Static catalogue of known series
///
/// Implemented by statcheck-registry. Loaded once per process.
pub trait SeriesRegistry {
    /// All known series
    fn list_series(&self) -> Vec<SeriesMeta>;
}

/// Strategy for turning article text into claims
///
/// Implemented by statcheck-extractor. Extraction is pure and infallible:
/// a text without checkable claims yields an empty vector.
pub trait ClaimExtractor {
    /// Extract claims from article text
    fn extract(&self, article_text: &str, source_url: &str) -> Vec<Claim>;
}
