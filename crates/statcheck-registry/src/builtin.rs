//! Built-in series catalogue
//!
//! Housing and household-finance series published by KOSIS (Statistics
//! Korea), ECOS (Bank of Korea) and the National Tax Service. These are the
//! series the fact-check reports have been written against so far.

use chrono::NaiveDate;
use statcheck_domain::{DateRange, Granularity, SeriesMeta};

fn year_range(from: i32, to: i32) -> DateRange {
    DateRange {
        start: NaiveDate::from_ymd_opt(from, 1, 1).unwrap_or_default(),
        end: NaiveDate::from_ymd_opt(to, 12, 31).unwrap_or_default(),
    }
}

fn series(
    id: &str,
    name: &str,
    keywords: &[&str],
    unit: &str,
    granularity: Granularity,
    valid_range: DateRange,
    source: &str,
) -> SeriesMeta {
    SeriesMeta {
        id: id.to_string(),
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        unit: unit.to_string(),
        granularity,
        valid_range,
        source: source.to_string(),
    }
}

pub(crate) fn builtin_entries() -> Vec<SeriesMeta> {
    vec![
        series(
            "kosis.rent.monthly-share",
            "Monthly-rent share of rental transactions",
            &["rent", "rental", "housing"],
            "%",
            Granularity::Yearly,
            year_range(2020, 2024),
            "KOSIS",
        ),
        series(
            "kosis.rent.jeonse-share",
            "Jeonse share of rental transactions",
            &["jeonse", "rental", "housing"],
            "%",
            Granularity::Yearly,
            year_range(2020, 2024),
            "KOSIS",
        ),
        series(
            "ecos.mortgage-rate",
            "Mortgage lending rate (new loans, year end)",
            &["interest-rate", "mortgage", "loan", "housing"],
            "%",
            Granularity::Yearly,
            year_range(2020, 2024),
            "ECOS",
        ),
        series(
            "ecos.household-debt",
            "Household debt outstanding",
            &["household-debt", "debt", "household"],
            "조원",
            Granularity::Yearly,
            year_range(2020, 2024),
            "ECOS",
        ),
        series(
            "nts.property-tax",
            "Comprehensive real estate holding tax collected",
            &["property-tax", "tax", "housing"],
            "십억원",
            Granularity::Yearly,
            year_range(2020, 2024),
            "NTS",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_are_well_formed() {
        for meta in builtin_entries() {
            assert!(meta.valid_range.start < meta.valid_range.end, "{}", meta.id);
            assert!(!meta.keywords.is_empty(), "{}", meta.id);
        }
    }
}
