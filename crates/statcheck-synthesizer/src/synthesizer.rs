//! Verdict synthesis

use crate::config::SynthesizerConfig;
use crate::error::SynthesizerError;
use crate::narrative::narrate;
use statcheck_domain::{
    Claim, ComparisonResult, Coverage, Direction, Magnitude, MagnitudeCheck, MagnitudeUnit,
    RebuttalReport, Verdict, VerdictLabel,
};
use std::sync::Arc;
use tracing::debug;

/// Turns comparison results into verdicts and reports
///
/// Synthesis is a pure function of the claim and its results.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    config: SynthesizerConfig,
}

impl Synthesizer {
    /// Create a synthesizer, validating the configuration
    pub fn new(config: SynthesizerConfig) -> Result<Self, SynthesizerError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &SynthesizerConfig {
        &self.config
    }

    /// Check an asserted magnitude against a comparison
    pub fn check_magnitude(
        &self,
        asserted: Option<&Magnitude>,
        comparison: &ComparisonResult,
    ) -> MagnitudeCheck {
        let Some(asserted) = asserted else {
            return MagnitudeCheck::NotAsserted;
        };
        let ratio = self.config.magnitude_ratio;
        let series_unit = comparison.candidate.series.unit.as_str();

        let (observed, required) = match &asserted.unit {
            MagnitudeUnit::Percent => (comparison.percent_change, ratio * asserted.value / 100.0),
            MagnitudeUnit::Times => (comparison.percent_change, ratio * (asserted.value - 1.0)),
            MagnitudeUnit::PercentPoint if series_unit == "%" => {
                (comparison.actual_delta, ratio * asserted.value)
            }
            MagnitudeUnit::Absolute(unit) if unit == series_unit => {
                (comparison.actual_delta, ratio * asserted.value)
            }
            _ => return MagnitudeCheck::IncompatibleUnits,
        };

        match observed {
            Some(observed) if observed.abs() >= required => MagnitudeCheck::Passed,
            Some(_) => MagnitudeCheck::Failed,
            None => MagnitudeCheck::IncompatibleUnits,
        }
    }

    /// Decide a verdict for a claim from its comparison results
    ///
    /// The best result is the highest-ranked candidate with some coverage.
    /// Without one the claim is unverifiable.
    pub fn synthesize(&self, claim: &Arc<Claim>, results: &[ComparisonResult]) -> Verdict {
        let best = results
            .iter()
            .filter(|r| r.data_coverage != Coverage::None)
            .min_by(|a, b| a.candidate.rank_cmp(&b.candidate));

        let Some(best) = best else {
            debug!("Claim {} unverifiable: no usable comparison", claim.id);
            return Verdict {
                claim: Arc::clone(claim),
                label: VerdictLabel::Unverifiable,
                confidence: 0.0,
                best_comparison: None,
                magnitude_check: MagnitudeCheck::NotAsserted,
            };
        };

        let magnitude_check = self.check_magnitude(claim.asserted_magnitude.as_ref(), best);
        let asserted = claim.asserted_direction;
        let observed = best.observed_direction;

        let label = if asserted == Direction::Unspecified || observed == Direction::Unspecified {
            VerdictLabel::Inconclusive
        } else if asserted.opposes(observed) {
            VerdictLabel::Refuted
        } else if magnitude_check == MagnitudeCheck::Failed {
            VerdictLabel::Inconclusive
        } else {
            VerdictLabel::Supported
        };

        let confidence = (best.candidate.match_score
            * self.config.coverage_weight(best.data_coverage))
        .clamp(0.0, 1.0);

        debug!(
            "Claim {} -> {} ({:.3}) via {}",
            claim.id, label, confidence, best.candidate.series.id
        );

        Verdict {
            claim: Arc::clone(claim),
            label,
            confidence,
            best_comparison: Some(best.clone()),
            magnitude_check,
        }
    }

    /// Build the report for a verdict
    pub fn report(&self, verdict: Verdict) -> RebuttalReport {
        let evidence_series = verdict
            .best_comparison
            .as_ref()
            .map(|c| c.evidence.clone())
            .unwrap_or_default();
        let narrative = narrate(&verdict);
        RebuttalReport {
            claim: Arc::clone(&verdict.claim),
            verdict,
            evidence_series,
            narrative,
        }
    }
}
