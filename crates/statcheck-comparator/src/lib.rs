//! Statcheck Comparator
//!
//! Aligns each match candidate's claimed window with observed data and
//! measures the observed change.
//!
//! # Behaviour
//!
//! - The claimed window is widened to whole periods of the series
//!   granularity; open bounds take the series' valid range, and an open end
//!   resolves to the latest observation returned
//! - Coverage is `Full` when the observations start in the window's first
//!   period, end in its last and skip no period; `Partial` with two or more
//!   observations otherwise; `None` below that, on a zero baseline, or on any
//!   provider error
//! - Provider calls run concurrently, bounded by `max_concurrency`, each under
//!   `fetch_timeout_secs`; one slow series never holds up the others
//! - Responses and failures are cached per `(series, start, end)` for the
//!   comparator's lifetime
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use statcheck_comparator::{fetch_range, ComparatorConfig};
//! # use statcheck_domain::*;
//! # use std::sync::Arc;
//! # let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
//! # let claim = Claim {
//! #     id: ClaimId::from_value(1), raw_text: String::new(),
//! #     subject_keywords: Default::default(), metric_keywords: Default::default(),
//! #     asserted_direction: Direction::Up, asserted_magnitude: None,
//! #     time_window: TimeWindow::bounded(d(2023, 1, 15), d(2024, 1, 10)),
//! #     source_url: String::new(), surface_terms: Default::default(), emphatic: false,
//! # };
//! # let series = SeriesMeta {
//! #     id: "rent".into(), name: "Rent index".into(), keywords: Default::default(),
//! #     unit: "index".into(), granularity: Granularity::Monthly,
//! #     valid_range: DateRange::new(d(2020, 1, 1), d(2024, 12, 31)).unwrap(),
//! #     source: "test".into(),
//! # };
//! # let candidate = MatchCandidate {
//! #     claim: Arc::new(claim), series: Arc::new(series),
//! #     match_score: 1.0, keyword_overlap: 1.0, time_factor: 1.0,
//! # };
//! // A mid-month window on a monthly series covers whole months
//! let range = fetch_range(&candidate).unwrap();
//! assert_eq!(range.start, d(2023, 1, 1));
//! assert_eq!(range.end, d(2024, 1, 31));
//! assert_eq!(ComparatorConfig::default().max_concurrency, 4);
//! ```

#![warn(missing_docs)]

mod alignment;
mod comparator;
mod config;
mod error;

pub use alignment::{align, fetch_range};
pub use comparator::{Comparator, ComparatorStats};
pub use config::ComparatorConfig;
pub use error::ComparatorError;
