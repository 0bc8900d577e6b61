//! Aligning observations with a claimed window

use statcheck_domain::observation::check_ordering;
use statcheck_domain::{
    ComparisonResult, Coverage, DateRange, Direction, Granularity, Magnitude, MatchCandidate,
    Observation,
};

/// The range to fetch for a candidate
///
/// Open bounds take the series' valid range; the result is widened to whole
/// periods of the series granularity. `None` when the claimed window is empty.
pub fn fetch_range(candidate: &MatchCandidate) -> Option<DateRange> {
    let series = &candidate.series;
    let window = candidate.claim.time_window;
    let start = window.start.unwrap_or(series.valid_range.start);
    let end = window.end.unwrap_or(series.valid_range.end);
    DateRange::new(start, end).map(|range| series.granularity.expand(range))
}

fn coverage(granularity: Granularity, window: &DateRange, evidence: &[Observation]) -> Coverage {
    let (Some(first), Some(last)) = (evidence.first(), evidence.last()) else {
        return Coverage::None;
    };
    if evidence.len() < 2 {
        return Coverage::None;
    }

    let index = |date| granularity.period_index(date);
    let starts_on_time = index(first.timestamp) == index(window.start);
    let ends_on_time = index(last.timestamp) == index(window.end);
    let contiguous = evidence
        .windows(2)
        .all(|pair| index(pair[1].timestamp) - index(pair[0].timestamp) <= 1);

    if starts_on_time && ends_on_time && contiguous {
        Coverage::Full
    } else {
        Coverage::Partial
    }
}

/// Compare a candidate against the observations fetched for `range`
///
/// With an open claimed end the window ends at the latest observation.
pub fn align(
    candidate: MatchCandidate,
    range: DateRange,
    observations: &[Observation],
) -> ComparisonResult {
    let series = &candidate.series;
    let granularity = series.granularity;

    let evidence: Vec<Observation> = observations
        .iter()
        .filter(|o| o.series_id == series.id && range.contains(o.timestamp))
        .cloned()
        .collect();

    if let Err(e) = check_ordering(&evidence) {
        return ComparisonResult::no_coverage(candidate, e.to_string());
    }

    let resolved = match (candidate.claim.time_window.end, evidence.last()) {
        (None, Some(last)) => DateRange {
            start: range.start,
            end: granularity.period_end(last.timestamp),
        },
        _ => range,
    };

    let (first, last) = match (evidence.first(), evidence.last()) {
        (Some(first), Some(last)) if evidence.len() >= 2 => (first.value, last.value),
        _ => {
            let note = format!(
                "{} observation(s) for {} in {}",
                evidence.len(),
                series.id,
                resolved
            );
            return ComparisonResult {
                resolved_window: Some(resolved),
                evidence,
                ..ComparisonResult::no_coverage(candidate, note)
            };
        }
    };

    if first == 0.0 {
        return ComparisonResult {
            resolved_window: Some(resolved),
            evidence,
            ..ComparisonResult::no_coverage(candidate, "baseline value is zero")
        };
    }

    let delta = last - first;
    let percent_change = delta / first.abs();
    let data_coverage = coverage(granularity, &resolved, &evidence);
    let note = (data_coverage == Coverage::Partial)
        .then(|| format!("observations do not span {} contiguously", resolved));

    ComparisonResult {
        candidate,
        observed_direction: Direction::from_delta(delta),
        observed_magnitude: Some(Magnitude::percent(percent_change * 100.0)),
        actual_delta: Some(delta),
        percent_change: Some(percent_change),
        data_coverage,
        resolved_window: Some(resolved),
        evidence,
        note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use statcheck_domain::{Claim, ClaimId, SeriesMeta, TimeWindow};
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn candidate(window: TimeWindow, granularity: Granularity) -> MatchCandidate {
        let claim = Claim {
            id: ClaimId::from_value(7),
            raw_text: String::new(),
            subject_keywords: BTreeSet::new(),
            metric_keywords: ["rent".to_string()].into_iter().collect(),
            asserted_direction: Direction::Up,
            asserted_magnitude: None,
            time_window: window,
            source_url: String::new(),
            surface_terms: BTreeSet::new(),
            emphatic: false,
        };
        let series = SeriesMeta {
            id: "rent".to_string(),
            name: "Rent index".to_string(),
            keywords: ["rent".to_string()].into_iter().collect(),
            unit: "index".to_string(),
            granularity,
            valid_range: DateRange::new(d(2020, 1, 1), d(2024, 12, 31)).unwrap(),
            source: "test".to_string(),
        };
        MatchCandidate {
            claim: Arc::new(claim),
            series: Arc::new(series),
            match_score: 1.0,
            keyword_overlap: 1.0,
            time_factor: 1.0,
        }
    }

    fn monthly(from: (i32, u32), values: &[f64]) -> Vec<Observation> {
        let start = d(from.0, from.1, 1);
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let date = start.checked_add_months(chrono::Months::new(i as u32)).unwrap();
                Observation::new("rent", date, *v)
            })
            .collect()
    }

    #[test]
    fn test_fetch_range_expands_and_fills_open_bounds() {
        let c = candidate(TimeWindow::bounded(d(2023, 1, 15), d(2024, 1, 10)), Granularity::Monthly);
        assert_eq!(fetch_range(&c), DateRange::new(d(2023, 1, 1), d(2024, 1, 31)));

        let c = candidate(TimeWindow::from(d(2023, 3, 3)), Granularity::Yearly);
        assert_eq!(fetch_range(&c), DateRange::new(d(2023, 1, 1), d(2024, 12, 31)));

        let c = candidate(TimeWindow::bounded(d(2024, 1, 1), d(2023, 1, 1)), Granularity::Monthly);
        assert_eq!(fetch_range(&c), None);
    }

    #[test]
    fn test_full_coverage_rising() {
        let c = candidate(TimeWindow::bounded(d(2023, 1, 1), d(2024, 1, 31)), Granularity::Monthly);
        let range = fetch_range(&c).unwrap();
        let mut values = vec![100.0; 13];
        values[12] = 106.0;

        let result = align(c, range, &monthly((2023, 1), &values));
        assert_eq!(result.data_coverage, Coverage::Full);
        assert_eq!(result.observed_direction, Direction::Up);
        assert!((result.percent_change.unwrap() - 0.06).abs() < 1e-12);
        assert!((result.actual_delta.unwrap() - 6.0).abs() < 1e-12);
        assert_eq!(result.evidence.len(), 13);
        assert!(result.note.is_none());
    }

    #[test]
    fn test_gap_is_partial() {
        let c = candidate(TimeWindow::bounded(d(2023, 1, 1), d(2023, 6, 30)), Granularity::Monthly);
        let range = fetch_range(&c).unwrap();
        let mut obs = monthly((2023, 1), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        obs.remove(2);

        let result = align(c, range, &obs);
        assert_eq!(result.data_coverage, Coverage::Partial);
        assert!(result.note.is_some());
    }

    #[test]
    fn test_late_start_is_partial() {
        let c = candidate(TimeWindow::bounded(d(2023, 1, 1), d(2023, 6, 30)), Granularity::Monthly);
        let range = fetch_range(&c).unwrap();
        let result = align(c, range, &monthly((2023, 3), &[1.0, 2.0, 3.0, 4.0]));
        assert_eq!(result.data_coverage, Coverage::Partial);
    }

    #[test]
    fn test_zero_baseline_has_no_coverage() {
        let c = candidate(TimeWindow::bounded(d(2023, 1, 1), d(2023, 3, 31)), Granularity::Monthly);
        let range = fetch_range(&c).unwrap();
        let result = align(c, range, &monthly((2023, 1), &[0.0, 5.0, 10.0]));
        assert_eq!(result.data_coverage, Coverage::None);
        assert_eq!(result.percent_change, None);
    }

    #[test]
    fn test_single_observation_has_no_coverage() {
        let c = candidate(TimeWindow::bounded(d(2023, 1, 1), d(2023, 3, 31)), Granularity::Monthly);
        let range = fetch_range(&c).unwrap();
        let result = align(c, range, &monthly((2023, 2), &[5.0]));
        assert_eq!(result.data_coverage, Coverage::None);
        assert_eq!(result.evidence.len(), 1);
    }

    #[test]
    fn test_unsorted_observations_have_no_coverage() {
        let c = candidate(TimeWindow::bounded(d(2023, 1, 1), d(2023, 3, 31)), Granularity::Monthly);
        let range = fetch_range(&c).unwrap();
        let mut obs = monthly((2023, 1), &[1.0, 2.0, 3.0]);
        obs.swap(0, 2);

        let result = align(c, range, &obs);
        assert_eq!(result.data_coverage, Coverage::None);
        assert!(result.note.unwrap().contains("ascending"));
    }

    #[test]
    fn test_open_end_resolves_to_latest_observation() {
        let c = candidate(TimeWindow::from(d(2021, 1, 1)), Granularity::Yearly);
        let range = fetch_range(&c).unwrap();
        let obs = vec![
            Observation::new("rent", d(2021, 1, 1), 10.0),
            Observation::new("rent", d(2022, 1, 1), 8.0),
        ];

        let result = align(c, range, &obs);
        assert_eq!(result.resolved_window, DateRange::new(d(2021, 1, 1), d(2022, 12, 31)));
        assert_eq!(result.data_coverage, Coverage::Full);
        assert_eq!(result.observed_direction, Direction::Down);
    }

    #[test]
    fn test_flat_series_has_no_direction() {
        let c = candidate(TimeWindow::bounded(d(2023, 1, 1), d(2023, 2, 28)), Granularity::Monthly);
        let range = fetch_range(&c).unwrap();
        let result = align(c, range, &monthly((2023, 1), &[3.0, 3.0]));
        assert_eq!(result.observed_direction, Direction::Unspecified);
        assert_eq!(result.data_coverage, Coverage::Full);
    }

    #[test]
    fn test_foreign_series_ignored() {
        let c = candidate(TimeWindow::bounded(d(2023, 1, 1), d(2023, 2, 28)), Granularity::Monthly);
        let range = fetch_range(&c).unwrap();
        let mut obs = monthly((2023, 1), &[1.0, 2.0]);
        obs.push(Observation::new("other", d(2023, 2, 15), 99.0));

        let result = align(c, range, &obs);
        assert_eq!(result.evidence.len(), 2);
        assert_eq!(result.data_coverage, Coverage::Full);
    }
}
