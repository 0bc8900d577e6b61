//! Statcheck Data Provider Layer
//!
//! Implementations of the `DataProvider` trait from `statcheck-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: scripted observations, failures and delays for testing
//! - `SnapshotProvider`: observations loaded from a JSON snapshot file, or the
//!   built-in sample snapshot
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use statcheck_domain::traits::DataProvider;
//! use statcheck_domain::Observation;
//! use statcheck_provider::MockProvider;
//!
//! let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
//! let provider = MockProvider::new()
//!     .with_series("rent", vec![Observation::new("rent", d(2023), 100.0)]);
//!
//! let obs = provider.fetch_observations("rent", d(2020), d(2024)).unwrap();
//! assert_eq!(obs.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod snapshot;

use chrono::NaiveDate;
use statcheck_domain::traits::DataProvider;
use statcheck_domain::{Observation, ProviderError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

pub use snapshot::{SnapshotError, SnapshotProvider};

#[derive(Debug, Clone)]
enum Scripted {
    Observations(Vec<Observation>),
    Failure(ProviderError),
}

/// Mock data provider for deterministic testing
///
/// Returns pre-configured observations without any I/O. Observations are
/// filtered to the requested date range. A per-series delay blocks the calling
/// thread, which is how timeouts are exercised.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use statcheck_domain::traits::DataProvider;
/// use statcheck_domain::ProviderError;
/// use statcheck_provider::MockProvider;
///
/// let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
/// let mut provider = MockProvider::new();
/// provider.add_error("broken", ProviderError::RateLimit);
///
/// assert!(provider.fetch_observations("broken", d(2020), d(2024)).is_err());
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    responses: Arc<Mutex<HashMap<String, Scripted>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create an empty mock; unknown series return no observations
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MockProvider::add_series`]
    pub fn with_series(mut self, series_id: impl Into<String>, observations: Vec<Observation>) -> Self {
        self.add_series(series_id, observations);
        self
    }

    /// Script the observations for a series
    pub fn add_series(&mut self, series_id: impl Into<String>, observations: Vec<Observation>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(series_id.into(), Scripted::Observations(observations));
    }

    /// Configure a series to fail
    pub fn add_error(&mut self, series_id: impl Into<String>, error: ProviderError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(series_id.into(), Scripted::Failure(error));
    }

    /// Make calls for a series block for `delay` before answering
    pub fn add_delay(&mut self, series_id: impl Into<String>, delay: Duration) {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(series_id.into(), delay);
    }

    /// Total number of fetch calls
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of fetch calls for one series
    pub fn calls_for(&self, series_id: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|id| id.as_str() == series_id)
            .count()
    }

    /// Reset the call log
    pub fn reset_call_count(&self) {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl DataProvider for MockProvider {
    fn fetch_observations(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Observation>, ProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(series_id.to_string());

        let delay = self
            .delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(series_id)
            .copied();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        let scripted = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(series_id)
            .cloned();

        match scripted {
            Some(Scripted::Failure(error)) => Err(error),
            Some(Scripted::Observations(observations)) => Ok(observations
                .into_iter()
                .filter(|o| o.timestamp >= start && o.timestamp <= end)
                .collect()),
            None => Ok(Vec::new()),
        }
    }
}
