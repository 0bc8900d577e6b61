//! Match candidates, comparisons, verdicts and reports

use crate::claim::Claim;
use crate::magnitude::{Direction, Magnitude};
use crate::observation::Observation;
use crate::series::SeriesMeta;
use crate::window::DateRange;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A series that might be able to check a claim
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    /// Claim being checked
    pub claim: Arc<Claim>,
    /// Candidate series
    pub series: Arc<SeriesMeta>,
    /// Overall score in [0, 1]
    pub match_score: f64,
    /// Jaccard keyword overlap in [0, 1]
    pub keyword_overlap: f64,
    /// Time-compatibility factor (1.0 or 0.5)
    pub time_factor: f64,
}

impl MatchCandidate {
    /// Ranking order: higher score first, then finer granularity, then series id
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .match_score
            .total_cmp(&self.match_score)
            .then_with(|| self.series.granularity.cmp(&other.series.granularity))
            .then_with(|| self.series.id.cmp(&other.series.id))
    }
}

/// How completely observations span the resolved window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coverage {
    /// Entire window covered with no gap wider than one period
    Full,
    /// At least two observations, but with gaps
    Partial,
    /// Fewer than two usable observations
    None,
}

impl Coverage {
    /// Get the coverage name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Coverage::Full => "full",
            Coverage::Partial => "partial",
            Coverage::None => "none",
        }
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asserted trend vs. observed data for one candidate
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    /// Candidate that was compared
    pub candidate: MatchCandidate,
    /// Sign of last − first
    pub observed_direction: Direction,
    /// Observed relative change, in percent
    pub observed_magnitude: Option<Magnitude>,
    /// last − first, in the series unit
    pub actual_delta: Option<f64>,
    /// actual_delta / |first|, as a fraction
    pub percent_change: Option<f64>,
    /// Coverage of the resolved window
    pub data_coverage: Coverage,
    /// Window after open-bound resolution and period expansion
    pub resolved_window: Option<DateRange>,
    /// Observations the comparison was computed from
    pub evidence: Vec<Observation>,
    /// Why coverage was downgraded, if it was
    pub note: Option<String>,
}

impl ComparisonResult {
    /// A result with no usable data
    pub fn no_coverage(candidate: MatchCandidate, note: impl Into<String>) -> Self {
        Self {
            candidate,
            observed_direction: Direction::Unspecified,
            observed_magnitude: None,
            actual_delta: None,
            percent_change: None,
            data_coverage: Coverage::None,
            resolved_window: None,
            evidence: Vec::new(),
            note: Some(note.into()),
        }
    }
}

/// Final judgement on a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictLabel {
    /// Observed data agrees with the claim
    Supported,
    /// Observed data moved the other way
    Refuted,
    /// Data exists but does not settle the claim
    Inconclusive,
    /// No series or no data could check the claim
    Unverifiable,
}

impl VerdictLabel {
    /// Get the label name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::Supported => "supported",
            VerdictLabel::Refuted => "refuted",
            VerdictLabel::Inconclusive => "inconclusive",
            VerdictLabel::Unverifiable => "unverifiable",
        }
    }

    /// All labels, in display order
    pub fn all() -> [VerdictLabel; 4] {
        [
            VerdictLabel::Supported,
            VerdictLabel::Refuted,
            VerdictLabel::Inconclusive,
            VerdictLabel::Unverifiable,
        ]
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing the asserted magnitude with the observed one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeCheck {
    /// The claim stated no magnitude, or the check did not apply
    NotAsserted,
    /// Observed change is large enough
    Passed,
    /// Observed change is far smaller than claimed
    Failed,
    /// Asserted and series units cannot be compared
    IncompatibleUnits,
}

/// Verdict for one claim
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Claim the verdict is about
    pub claim: Arc<Claim>,
    /// Final label
    pub label: VerdictLabel,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Comparison the label was derived from
    pub best_comparison: Option<ComparisonResult>,
    /// Result of the magnitude check
    pub magnitude_check: MagnitudeCheck,
}

/// Terminal artifact handed to rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RebuttalReport {
    /// Claim being rebutted or confirmed
    pub claim: Arc<Claim>,
    /// Verdict on the claim
    pub verdict: Verdict,
    /// Observations backing the verdict, ascending by timestamp
    pub evidence_series: Vec<Observation>,
    /// Human-readable explanation
    pub narrative: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimId;
    use crate::series::Granularity;
    use crate::window::TimeWindow;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn claim() -> Arc<Claim> {
        Arc::new(Claim {
            id: ClaimId::from_value(7),
            raw_text: String::new(),
            subject_keywords: BTreeSet::new(),
            metric_keywords: BTreeSet::new(),
            asserted_direction: Direction::Up,
            asserted_magnitude: None,
            time_window: TimeWindow::open(),
            source_url: String::new(),
            surface_terms: BTreeSet::new(),
            emphatic: false,
        })
    }

    fn candidate(id: &str, granularity: Granularity, score: f64) -> MatchCandidate {
        let d = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        MatchCandidate {
            claim: claim(),
            series: Arc::new(SeriesMeta {
                id: id.to_string(),
                name: id.to_string(),
                keywords: BTreeSet::new(),
                unit: "%".to_string(),
                granularity,
                valid_range: DateRange::new(d, d).unwrap(),
                source: "test".to_string(),
            }),
            match_score: score,
            keyword_overlap: score,
            time_factor: 1.0,
        }
    }

    #[test]
    fn test_rank_cmp_score_then_granularity_then_id() {
        let mut candidates = vec![
            candidate("b", Granularity::Yearly, 0.5),
            candidate("c", Granularity::Monthly, 0.5),
            candidate("a", Granularity::Monthly, 0.5),
            candidate("z", Granularity::Yearly, 0.9),
        ];
        candidates.sort_by(MatchCandidate::rank_cmp);
        let ids: Vec<&str> = candidates.iter().map(|c| c.series.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "c", "b"]);
    }

    #[test]
    fn test_no_coverage() {
        let result = ComparisonResult::no_coverage(candidate("a", Granularity::Daily, 1.0), "x");
        assert_eq!(result.data_coverage, Coverage::None);
        assert_eq!(result.observed_direction, Direction::Unspecified);
        assert!(result.percent_change.is_none());
    }
}
