//! Snapshot provider - observations from a JSON file
//!
//! A snapshot stands in for a live statistics API: the batch run reads one
//! frozen copy of the official data, which keeps runs reproducible.
//!
//! ```json
//! {
//!   "series": {
//!     "nts.property-tax": [
//!       { "date": "2020-01-01", "value": 3300 },
//!       { "date": "2021-01-01", "value": 6100 }
//!     ]
//!   }
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statcheck_domain::observation::check_ordering;
use statcheck_domain::traits::DataProvider;
use statcheck_domain::{Observation, ProviderError};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading a snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Snapshot file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot is not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A series has two points on the same date
    #[error("Series '{series_id}' has duplicate date {date}")]
    DuplicateDate {
        /// Offending series
        series_id: String,
        /// Repeated date
        date: NaiveDate,
    },
}

/// One point in a snapshot file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPoint {
    /// Period the value is reported for
    pub date: NaiveDate,
    /// Reported value
    pub value: f64,
}

/// Snapshot file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Points per series id
    #[serde(default)]
    pub series: BTreeMap<String, Vec<SnapshotPoint>>,
}

/// Data provider serving a frozen snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotProvider {
    data: HashMap<String, Vec<Observation>>,
}

impl SnapshotProvider {
    /// Build a provider from a parsed snapshot
    ///
    /// Points are sorted by date; duplicate dates are rejected.
    pub fn from_snapshot(file: SnapshotFile) -> Result<Self, SnapshotError> {
        let mut data = HashMap::new();
        for (series_id, mut points) in file.series {
            points.sort_by_key(|p| p.date);
            let observations: Vec<Observation> = points
                .into_iter()
                .map(|p| Observation::new(series_id.clone(), p.date, p.value))
                .collect();
            if let Err(ProviderError::Parse(_)) = check_ordering(&observations) {
                let date = observations
                    .windows(2)
                    .find(|pair| pair[0].timestamp == pair[1].timestamp)
                    .map(|pair| pair[0].timestamp)
                    .unwrap_or_default();
                return Err(SnapshotError::DuplicateDate { series_id, date });
            }
            data.insert(series_id, observations);
        }
        Ok(Self { data })
    }

    /// Parse a snapshot from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Self::from_snapshot(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let provider = Self::from_json(&contents)?;
        info!(
            "Loaded snapshot with {} series from {}",
            provider.series_count(),
            path.display()
        );
        Ok(provider)
    }

    /// The built-in sample snapshot for the built-in registry
    ///
    /// Yearly figures for 2020-2024, dated at the start of each year.
    pub fn builtin() -> Self {
        let yearly = |id: &str, values: [f64; 5]| -> (String, Vec<Observation>) {
            let observations = (2020..)
                .zip(values)
                .filter_map(|(year, value)| {
                    NaiveDate::from_ymd_opt(year, 1, 1).map(|d| Observation::new(id, d, value))
                })
                .collect();
            (id.to_string(), observations)
        };

        let data = HashMap::from([
            yearly("kosis.rent.monthly-share", [44.8, 47.9, 51.7, 56.6, 60.0]),
            yearly("kosis.rent.jeonse-share", [55.2, 52.1, 48.3, 43.4, 40.0]),
            yearly("ecos.mortgage-rate", [2.75, 3.10, 4.85, 4.50, 4.52]),
            yearly("ecos.household-debt", [1630.0, 1765.0, 1860.0, 1886.0, 1927.0]),
            yearly("nts.property-tax", [3300.0, 6100.0, 4200.0, 2800.0, 2500.0]),
        ]);
        Self { data }
    }

    /// Number of series in the snapshot
    pub fn series_count(&self) -> usize {
        self.data.len()
    }
}

impl DataProvider for SnapshotProvider {
    fn fetch_observations(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Observation>, ProviderError> {
        let Some(observations) = self.data.get(series_id) else {
            debug!("Series '{}' not in snapshot", series_id);
            return Ok(Vec::new());
        };
        Ok(observations
            .iter()
            .filter(|o| o.timestamp >= start && o.timestamp <= end)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn d(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    #[test]
    fn test_builtin_property_tax_declines_after_2021() {
        let provider = SnapshotProvider::builtin();
        let obs = provider
            .fetch_observations("nts.property-tax", d(2022), d(2024))
            .unwrap();
        assert_eq!(obs.len(), 3);
        assert!(obs.last().unwrap().value < obs.first().unwrap().value);
    }

    #[test]
    fn test_unsorted_points_are_sorted() {
        let json = r#"{"series": {"s": [
            {"date": "2021-01-01", "value": 2.0},
            {"date": "2020-01-01", "value": 1.0}
        ]}}"#;
        let provider = SnapshotProvider::from_json(json).unwrap();
        let obs = provider.fetch_observations("s", d(2019), d(2022)).unwrap();
        assert_eq!(obs[0].value, 1.0);
        assert_eq!(obs[1].value, 2.0);
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let json = r#"{"series": {"s": [
            {"date": "2020-01-01", "value": 1.0},
            {"date": "2020-01-01", "value": 2.0}
        ]}}"#;
        assert!(matches!(
            SnapshotProvider::from_json(json),
            Err(SnapshotError::DuplicateDate { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"series": {{"a": [{{"date": "2023-01-01", "value": 100.0}}]}}}}"#
        )
        .unwrap();
        let provider = SnapshotProvider::load(file.path()).unwrap();
        assert_eq!(provider.series_count(), 1);
    }

    #[test]
    fn test_unknown_series_is_empty() {
        let provider = SnapshotProvider::builtin();
        assert!(provider
            .fetch_observations("nope", d(2020), d(2024))
            .unwrap()
            .is_empty());
    }
}
