//! Plain-English explanation of a verdict

use statcheck_domain::{ComparisonResult, Direction, MagnitudeCheck, Verdict, VerdictLabel};
use std::fmt::Write;

fn movement(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "rose",
        Direction::Down => "fell",
        Direction::Unspecified => "was flat",
    }
}

fn assertion(verdict: &Verdict) -> String {
    let claim = &verdict.claim;
    let mut text = format!("The article says {} went {}", claim.label(), claim.asserted_direction);
    if let Some(magnitude) = &claim.asserted_magnitude {
        let _ = write!(text, " by {}", magnitude);
    }
    if !claim.time_window.is_open() {
        let _ = write!(text, " over {}", claim.time_window);
    }
    text.push('.');
    text
}

fn observation(comparison: &ComparisonResult) -> String {
    let series = &comparison.candidate.series;
    let mut text = format!("{} ({}, {})", series.name, series.id, series.source);

    match (comparison.evidence.first(), comparison.evidence.last()) {
        (Some(first), Some(last)) => {
            let _ = write!(
                text,
                " {} from {} on {} to {} on {}",
                movement(comparison.observed_direction),
                first.value,
                first.timestamp,
                last.value,
                last.timestamp
            );
        }
        _ => text.push_str(" has no observations for the period"),
    }
    if let Some(pc) = comparison.percent_change {
        let _ = write!(text, ", a change of {:+.1}%", pc * 100.0);
    }
    let _ = write!(text, " (coverage: {}).", comparison.data_coverage);
    text
}

fn reason(verdict: &Verdict) -> &'static str {
    match (verdict.label, verdict.magnitude_check) {
        (VerdictLabel::Unverifiable, _) => "No official series with usable data matched this claim.",
        (VerdictLabel::Refuted, _) => "The data moved in the opposite direction.",
        (VerdictLabel::Inconclusive, MagnitudeCheck::Failed) => {
            "The direction matches, but the change is far smaller than claimed."
        }
        (VerdictLabel::Inconclusive, _) => "The data shows no clear direction to compare against.",
        (VerdictLabel::Supported, MagnitudeCheck::IncompatibleUnits) => {
            "The direction matches; the claimed size could not be compared in the series' unit."
        }
        (VerdictLabel::Supported, _) => "The data moved as claimed.",
    }
}

/// Deterministic narrative for a verdict
pub fn narrate(verdict: &Verdict) -> String {
    let mut parts = vec![assertion(verdict)];
    if let Some(comparison) = &verdict.best_comparison {
        parts.push(observation(comparison));
    }
    parts.push(reason(verdict).to_string());
    parts.push(format!(
        "Verdict: {} (confidence {:.2}).",
        verdict.label.as_str().to_uppercase(),
        verdict.confidence
    ));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use statcheck_domain::{Claim, ClaimId, Magnitude, TimeWindow};
    use std::collections::BTreeSet;
    use std::sync::Arc;

    #[test]
    fn test_unverifiable_narrative() {
        let claim = Arc::new(Claim {
            id: ClaimId::from_value(1),
            raw_text: "실업률이 급등했다".to_string(),
            subject_keywords: BTreeSet::new(),
            metric_keywords: ["unemployment".to_string()].into_iter().collect(),
            asserted_direction: Direction::Up,
            asserted_magnitude: Some(Magnitude::percent(20.0)),
            time_window: TimeWindow::open(),
            source_url: String::new(),
            surface_terms: BTreeSet::new(),
            emphatic: true,
        });
        let verdict = Verdict {
            claim,
            label: VerdictLabel::Unverifiable,
            confidence: 0.0,
            best_comparison: None,
            magnitude_check: MagnitudeCheck::NotAsserted,
        };

        assert_eq!(
            narrate(&verdict),
            "The article says unemployment went up by 20%. \
             No official series with usable data matched this claim. \
             Verdict: UNVERIFIABLE (confidence 0.00)."
        );
    }
}
