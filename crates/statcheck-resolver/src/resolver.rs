//! Claim-to-series matching

use crate::config::ResolverConfig;
use crate::error::ResolverError;
use statcheck_domain::traits::SeriesRegistry;
use statcheck_domain::{Claim, MatchCandidate, SeriesMeta, WindowFit};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Time-compatibility factor of a window fit
pub fn time_factor(fit: WindowFit) -> f64 {
    match fit {
        WindowFit::Inside => 1.0,
        WindowFit::Overlapping => 0.5,
        WindowFit::Disjoint => 0.0,
    }
}

/// Jaccard similarity of two keyword sets; 0 when both are empty
pub fn keyword_overlap(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Ranks registry series against claims
///
/// The catalogue is read once from the registry and shared by every lookup.
#[derive(Debug, Clone)]
pub struct Resolver {
    catalogue: Arc<[Arc<SeriesMeta>]>,
    config: ResolverConfig,
}

impl Resolver {
    /// Create a resolver over a registry's catalogue
    pub fn new<R: SeriesRegistry>(registry: &R, config: ResolverConfig) -> Result<Self, ResolverError> {
        config.validate()?;
        let catalogue = registry.list_series().into_iter().map(Arc::new).collect();
        Ok(Self { catalogue, config })
    }

    /// The catalogue being matched against
    pub fn catalogue(&self) -> &[Arc<SeriesMeta>] {
        &self.catalogue
    }

    /// The active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Candidate series for a claim, best first
    ///
    /// Series whose valid range cannot contain the claimed window are never
    /// returned. An empty result means the claim cannot be checked.
    pub fn resolve(&self, claim: &Arc<Claim>) -> Vec<MatchCandidate> {
        let claim_keywords = claim.keywords();

        let mut candidates: Vec<MatchCandidate> = self
            .catalogue
            .iter()
            .filter_map(|series| {
                let time_factor = time_factor(claim.time_window.fit_within(&series.valid_range));
                if time_factor == 0.0 {
                    return None;
                }
                let series_keywords = series.keywords.iter().map(String::as_str).collect();
                let overlap = keyword_overlap(&claim_keywords, &series_keywords);
                let match_score = overlap * time_factor;
                if match_score < self.config.min_match_score {
                    return None;
                }
                Some(MatchCandidate {
                    claim: Arc::clone(claim),
                    series: Arc::clone(series),
                    match_score,
                    keyword_overlap: overlap,
                    time_factor,
                })
            })
            .collect();

        candidates.sort_by(MatchCandidate::rank_cmp);
        if let Some(max) = self.config.max_candidates {
            candidates.truncate(max);
        }

        for candidate in &candidates {
            debug!(
                "Claim {} -> {} (score {:.3}, overlap {:.3}, time {:.1})",
                claim.id,
                candidate.series.id,
                candidate.match_score,
                candidate.keyword_overlap,
                candidate.time_factor
            );
        }
        if candidates.is_empty() {
            debug!("Claim {} matched no series", claim.id);
        }
        candidates
    }
}
