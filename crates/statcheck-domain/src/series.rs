//! Series metadata and granularity period arithmetic

use crate::window::DateRange;
use chrono::{Datelike, Months, NaiveDate};
use std::collections::BTreeSet;

/// Sampling granularity of a series
///
/// Ordered finest first, so `Daily < Monthly < Quarterly < Yearly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
    /// One observation per day
    Daily,
    /// One observation per month
    Monthly,
    /// One observation per quarter
    Quarterly,
    /// One observation per year
    Yearly,
}

impl Granularity {
    /// Get the granularity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
            Granularity::Quarterly => "quarterly",
            Granularity::Yearly => "yearly",
        }
    }

    /// Parse a granularity from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "daily" | "day" | "d" => Some(Granularity::Daily),
            "monthly" | "month" | "m" => Some(Granularity::Monthly),
            "quarterly" | "quarter" | "q" => Some(Granularity::Quarterly),
            "yearly" | "annual" | "year" | "y" => Some(Granularity::Yearly),
            _ => None,
        }
    }

    fn months_per_period(&self) -> u32 {
        match self {
            Granularity::Daily => 0,
            Granularity::Monthly => 1,
            Granularity::Quarterly => 3,
            Granularity::Yearly => 12,
        }
    }

    /// First day of the period containing `date`
    pub fn period_start(&self, date: NaiveDate) -> NaiveDate {
        let month = match self {
            Granularity::Daily => return date,
            Granularity::Monthly => date.month(),
            Granularity::Quarterly => (date.month0() / 3) * 3 + 1,
            Granularity::Yearly => 1,
        };
        NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
    }

    /// Last day of the period containing `date`
    pub fn period_end(&self, date: NaiveDate) -> NaiveDate {
        if *self == Granularity::Daily {
            return date;
        }
        self.period_start(date)
            .checked_add_months(Months::new(self.months_per_period()))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Monotone integer index of the period containing `date`
    ///
    /// Consecutive periods have consecutive indices.
    pub fn period_index(&self, date: NaiveDate) -> i64 {
        let year = i64::from(date.year());
        let month0 = i64::from(date.month0());
        match self {
            Granularity::Daily => i64::from(date.num_days_from_ce()),
            Granularity::Monthly => year * 12 + month0,
            Granularity::Quarterly => year * 4 + month0 / 3,
            Granularity::Yearly => year,
        }
    }

    /// Expand a range outward to whole periods
    pub fn expand(&self, range: DateRange) -> DateRange {
        DateRange {
            start: self.period_start(range.start),
            end: self.period_end(range.end),
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid granularity: {}", s))
    }
}

/// Metadata for one official statistical series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesMeta {
    /// Registry identifier (e.g. "kosis.rent.monthly-share")
    pub id: String,

    /// Human-readable series name
    pub name: String,

    /// Canonical keywords the series answers for
    pub keywords: BTreeSet<String>,

    /// Unit of the values (e.g. "%", "조원", "index")
    pub unit: String,

    /// Sampling granularity
    pub granularity: Granularity,

    /// Dates for which the series is published
    pub valid_range: DateRange,

    /// Publishing agency
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_granularity_ordering() {
        assert!(Granularity::Daily < Granularity::Monthly);
        assert!(Granularity::Monthly < Granularity::Quarterly);
        assert!(Granularity::Quarterly < Granularity::Yearly);
    }

    #[test]
    fn test_period_bounds() {
        let date = d(2024, 2, 15);
        assert_eq!(Granularity::Daily.period_start(date), date);
        assert_eq!(Granularity::Monthly.period_start(date), d(2024, 2, 1));
        assert_eq!(Granularity::Monthly.period_end(date), d(2024, 2, 29));
        assert_eq!(Granularity::Quarterly.period_start(date), d(2024, 1, 1));
        assert_eq!(Granularity::Quarterly.period_end(date), d(2024, 3, 31));
        assert_eq!(Granularity::Yearly.period_start(date), d(2024, 1, 1));
        assert_eq!(Granularity::Yearly.period_end(date), d(2024, 12, 31));
    }

    #[test]
    fn test_expand() {
        let range = DateRange::new(d(2023, 1, 10), d(2024, 1, 5)).unwrap();
        let expanded = Granularity::Monthly.expand(range);
        assert_eq!(expanded.start, d(2023, 1, 1));
        assert_eq!(expanded.end, d(2024, 1, 31));
    }

    #[test]
    fn test_period_index_steps() {
        assert_eq!(
            Granularity::Monthly.period_index(d(2024, 1, 1))
                - Granularity::Monthly.period_index(d(2023, 12, 31)),
            1
        );
        assert_eq!(
            Granularity::Quarterly.period_index(d(2024, 4, 1))
                - Granularity::Quarterly.period_index(d(2024, 3, 31)),
            1
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(Granularity::parse("Monthly"), Some(Granularity::Monthly));
        assert_eq!("annual".parse::<Granularity>(), Ok(Granularity::Yearly));
        assert!(Granularity::parse("hourly").is_none());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn granularity() -> impl Strategy<Value = Granularity> {
        prop_oneof![
            Just(Granularity::Daily),
            Just(Granularity::Monthly),
            Just(Granularity::Quarterly),
            Just(Granularity::Yearly),
        ]
    }

    proptest! {
        /// Property: a date lies within its own period
        #[test]
        fn test_date_within_period(days in 700_000i32..760_000, g in granularity()) {
            let date = NaiveDate::from_num_days_from_ce_opt(days).unwrap();
            prop_assert!(g.period_start(date) <= date);
            prop_assert!(g.period_end(date) >= date);
        }

        /// Property: start and end of a period share its index
        #[test]
        fn test_period_bounds_share_index(days in 700_000i32..760_000, g in granularity()) {
            let date = NaiveDate::from_num_days_from_ce_opt(days).unwrap();
            let idx = g.period_index(date);
            prop_assert_eq!(g.period_index(g.period_start(date)), idx);
            prop_assert_eq!(g.period_index(g.period_end(date)), idx);
        }

        /// Property: the day after a period end starts the next period
        #[test]
        fn test_next_period_is_adjacent(days in 700_000i32..760_000, g in granularity()) {
            let date = NaiveDate::from_num_days_from_ce_opt(days).unwrap();
            let next = g.period_end(date).succ_opt().unwrap();
            prop_assert_eq!(g.period_index(next), g.period_index(date) + 1);
            prop_assert_eq!(g.period_start(next), next);
        }
    }
}
