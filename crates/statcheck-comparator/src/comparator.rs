//! Concurrent comparison of candidates against provider data

use crate::alignment::{align, fetch_range};
use crate::config::ComparatorConfig;
use crate::error::ComparatorError;
use chrono::NaiveDate;
use dashmap::DashMap;
use futures::future::join_all;
use statcheck_domain::traits::DataProvider;
use statcheck_domain::{ComparisonResult, MatchCandidate, Observation, ProviderError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OnceCell, Semaphore};
use tokio::time::timeout;
use tracing::{debug, warn};

type FetchResult = Result<Arc<Vec<Observation>>, ProviderError>;
type CacheKey = (String, NaiveDate, NaiveDate);

/// Counters for one comparator's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparatorStats {
    /// Provider calls actually made
    pub fetches: usize,
    /// Lookups answered from the cache (including waiters on an in-flight fetch)
    pub cache_hits: usize,
    /// Comparisons that absorbed a provider error
    pub provider_failures: usize,
}

/// Compares match candidates against observed data
///
/// Provider calls run on the blocking pool, bounded by a semaphore. The
/// per-call timeout covers the wait for a permit as well as the call, so
/// hung providers cannot stall lookups queued behind them. Responses and failures are memoised per
/// `(series_id, start, end)` for the comparator's lifetime, so concurrent
/// lookups of the same key hit the provider once. Create one comparator per
/// batch run.
///
/// # Examples
///
/// ```
/// use statcheck_comparator::{Comparator, ComparatorConfig};
/// use statcheck_provider::MockProvider;
///
/// let comparator = Comparator::new(MockProvider::new(), ComparatorConfig::default()).unwrap();
/// assert_eq!(comparator.stats().fetches, 0);
/// ```
pub struct Comparator<P> {
    provider: Arc<P>,
    semaphore: Semaphore,
    cache: DashMap<CacheKey, Arc<OnceCell<FetchResult>>>,
    fetch_timeout: Duration,
    fetches: AtomicUsize,
    cache_hits: AtomicUsize,
    provider_failures: AtomicUsize,
}

impl<P> Comparator<P>
where
    P: DataProvider + Send + Sync + 'static,
{
    /// Create a comparator owning its provider
    pub fn new(provider: P, config: ComparatorConfig) -> Result<Self, ComparatorError> {
        Self::with_shared(Arc::new(provider), config)
    }

    /// Create a comparator over a shared provider
    pub fn with_shared(provider: Arc<P>, config: ComparatorConfig) -> Result<Self, ComparatorError> {
        config.validate()?;
        Ok(Self {
            provider,
            semaphore: Semaphore::new(config.max_concurrency),
            cache: DashMap::new(),
            fetch_timeout: config.fetch_timeout(),
            fetches: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
            provider_failures: AtomicUsize::new(0),
        })
    }

    /// Override the per-call timeout
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> ComparatorStats {
        ComparatorStats {
            fetches: self.fetches.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            provider_failures: self.provider_failures.load(Ordering::Relaxed),
        }
    }

    /// Compare one candidate; never fails
    pub async fn compare(&self, candidate: MatchCandidate) -> ComparisonResult {
        let Some(range) = fetch_range(&candidate) else {
            return ComparisonResult::no_coverage(candidate, "claimed window is empty");
        };
        let series_id = candidate.series.id.clone();

        match self.fetch(&series_id, range.start, range.end).await {
            Ok(observations) => {
                let result = align(candidate, range, &observations);
                debug!(
                    "Compared {} over {}: {} ({} observations)",
                    series_id,
                    range,
                    result.data_coverage,
                    result.evidence.len()
                );
                result
            }
            Err(e) => {
                self.provider_failures.fetch_add(1, Ordering::Relaxed);
                warn!("Provider failed for {} over {}: {}", series_id, range, e);
                ComparisonResult::no_coverage(candidate, format!("provider error: {}", e))
            }
        }
    }

    /// Compare many candidates concurrently; results keep the input order
    pub async fn compare_all(&self, candidates: Vec<MatchCandidate>) -> Vec<ComparisonResult> {
        join_all(candidates.into_iter().map(|c| self.compare(c))).await
    }

    async fn fetch(&self, series_id: &str, start: NaiveDate, end: NaiveDate) -> FetchResult {
        let cell = Arc::clone(
            self.cache
                .entry((series_id.to_string(), start, end))
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .value(),
        );

        let loaded_here = AtomicBool::new(false);
        let result = cell
            .get_or_init(|| async {
                loaded_here.store(true, Ordering::Relaxed);
                self.load(series_id, start, end).await
            })
            .await;

        if !loaded_here.load(Ordering::Relaxed) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit for {} {}..{}", series_id, start, end);
        }
        result.clone()
    }

    async fn load(&self, series_id: &str, start: NaiveDate, end: NaiveDate) -> FetchResult {
        let provider = Arc::clone(&self.provider);
        let id = series_id.to_string();

        // Waiting for a permit counts against the timeout; the permit is
        // released as soon as this lookup gives up.
        let call = async {
            let _permit = self
                .semaphore
                .acquire()
                .await
                .map_err(|e| ProviderError::Network(format!("fetch pool closed: {}", e)))?;
            self.fetches.fetch_add(1, Ordering::Relaxed);

            let observations =
                tokio::task::spawn_blocking(move || provider.fetch_observations(&id, start, end))
                    .await
                    .map_err(|join_error| {
                        ProviderError::Network(format!("provider task failed: {}", join_error))
                    })??;
            Ok::<_, ProviderError>(observations)
        };

        match timeout(self.fetch_timeout, call).await {
            Ok(Ok(observations)) => Ok(Arc::new(observations)),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ProviderError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statcheck_domain::{
        Claim, ClaimId, Coverage, DateRange, Direction, Granularity, SeriesMeta, TimeWindow,
    };
    use statcheck_provider::MockProvider;
    use std::collections::BTreeSet;

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn candidate(series_id: &str) -> MatchCandidate {
        let claim = Claim {
            id: ClaimId::from_value(1),
            raw_text: String::new(),
            subject_keywords: BTreeSet::new(),
            metric_keywords: BTreeSet::new(),
            asserted_direction: Direction::Up,
            asserted_magnitude: None,
            time_window: TimeWindow::bounded(d(2023, 1), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
            source_url: String::new(),
            surface_terms: BTreeSet::new(),
            emphatic: false,
        };
        let series = SeriesMeta {
            id: series_id.to_string(),
            name: series_id.to_string(),
            keywords: BTreeSet::new(),
            unit: "index".to_string(),
            granularity: Granularity::Monthly,
            valid_range: DateRange::new(d(2020, 1), d(2024, 12)).unwrap(),
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

    fn rent_index(id: &str) -> Vec<Observation> {
        (0..13)
            .map(|i| {
                let date = d(2023, 1)
                    .checked_add_months(chrono::Months::new(i))
                    .unwrap();
                let value = if i == 12 { 106.0 } else { 100.0 };
                Observation::new(id, date, value)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_compare_full_coverage() {
        let provider = MockProvider::new().with_series("rent", rent_index("rent"));
        let comparator = Comparator::new(provider, ComparatorConfig::default()).unwrap();

        let result = comparator.compare(candidate("rent")).await;
        assert_eq!(result.data_coverage, Coverage::Full);
        assert!((result.percent_change.unwrap() - 0.06).abs() < 1e-12);
        assert_eq!(comparator.stats().fetches, 1);
    }

    #[tokio::test]
    async fn test_provider_error_is_absorbed() {
        let mut provider = MockProvider::new();
        provider.add_error("rent", ProviderError::RateLimit);
        let comparator = Comparator::new(provider, ComparatorConfig::default()).unwrap();

        let result = comparator.compare(candidate("rent")).await;
        assert_eq!(result.data_coverage, Coverage::None);
        assert!(result.note.unwrap().contains("Rate limit"));
        assert_eq!(comparator.stats().provider_failures, 1);
    }

    #[tokio::test]
    async fn test_timeout_gives_no_coverage_without_blocking_siblings() {
        let mut provider = MockProvider::new()
            .with_series("slow", rent_index("slow"))
            .with_series("fast", rent_index("fast"));
        provider.add_delay("slow", Duration::from_millis(500));
        let comparator = Comparator::new(provider, ComparatorConfig::default())
            .unwrap()
            .with_fetch_timeout(Duration::from_millis(50));

        let results = comparator
            .compare_all(vec![candidate("slow"), candidate("fast")])
            .await;

        assert_eq!(results[0].candidate.series.id, "slow");
        assert_eq!(results[0].data_coverage, Coverage::None);
        assert!(results[0].note.as_deref().unwrap_or_default().contains("timed out"));
        assert_eq!(results[1].data_coverage, Coverage::Full);
    }

    #[tokio::test]
    async fn test_hung_calls_do_not_block_the_batch() {
        let config = ComparatorConfig::default();
        let hung: Vec<String> = (0..config.max_concurrency).map(|i| format!("hung{}", i)).collect();

        let mut provider = MockProvider::new().with_series("fast", rent_index("fast"));
        for id in &hung {
            provider.add_series(id.clone(), rent_index(id));
            provider.add_delay(id.clone(), Duration::from_secs(2));
        }
        let comparator = Comparator::new(provider, config)
            .unwrap()
            .with_fetch_timeout(Duration::from_millis(50));

        let mut candidates: Vec<_> = hung.iter().map(|id| candidate(id)).collect();
        candidates.push(candidate("fast"));

        let started = std::time::Instant::now();
        let results = tokio::time::timeout(Duration::from_secs(1), comparator.compare_all(candidates))
            .await
            .expect("batch blocked behind hung provider calls");

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(results.len(), hung.len() + 1);
        for result in &results[..hung.len()] {
            assert_eq!(result.data_coverage, Coverage::None);
            assert!(result.note.as_deref().unwrap_or_default().contains("timed out"));
        }
        assert_eq!(results[hung.len()].candidate.series.id, "fast");
    }

    #[tokio::test]
    async fn test_cache_deduplicates_concurrent_fetches() {
        let mut provider = MockProvider::new().with_series("rent", rent_index("rent"));
        provider.add_delay("rent", Duration::from_millis(30));
        let calls = provider.clone();
        let comparator = Comparator::new(provider, ComparatorConfig::default()).unwrap();

        let results = comparator
            .compare_all((0..5).map(|_| candidate("rent")).collect())
            .await;

        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.data_coverage == Coverage::Full));
        assert_eq!(calls.calls_for("rent"), 1);
        assert_eq!(comparator.stats().fetches, 1);
        assert_eq!(comparator.stats().cache_hits, 4);
    }

    #[tokio::test]
    async fn test_failures_are_cached_too() {
        let mut provider = MockProvider::new();
        provider.add_error("rent", ProviderError::Network("down".to_string()));
        let calls = provider.clone();
        let comparator = Comparator::new(provider, ComparatorConfig::default()).unwrap();

        comparator.compare(candidate("rent")).await;
        comparator.compare(candidate("rent")).await;

        assert_eq!(calls.call_count(), 1);
        assert_eq!(comparator.stats().provider_failures, 2);
    }

    #[tokio::test]
    async fn test_unknown_series_has_no_coverage() {
        let comparator = Comparator::new(MockProvider::new(), ComparatorConfig::default()).unwrap();
        let result = comparator.compare(candidate("missing")).await;
        assert_eq!(result.data_coverage, Coverage::None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ComparatorConfig {
            fetch_timeout_secs: 0,
            ..ComparatorConfig::default()
        };
        assert!(Comparator::new(MockProvider::new(), config).is_err());
    }
}
