//! Scheduled batch runs

use crate::article::ArticleSource;
use crate::error::PipelineError;
use crate::metrics::PipelineMetrics;
use crate::pipeline::{BatchReport, Pipeline};
use statcheck_domain::traits::{ClaimExtractor, DataProvider};
use std::future::Future;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Runs the pipeline over an article source on a schedule
///
/// The first run starts immediately. Metrics accumulate across runs.
///
/// # Examples
///
/// ```no_run
/// use statcheck_pipeline::{JsonArticleFile, Pipeline, PipelineConfig, PipelineWorker};
/// use statcheck_provider::SnapshotProvider;
/// use statcheck_registry::StaticRegistry;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = PipelineConfig::default();
///     let interval = config.interval();
///     let pipeline = Pipeline::keyword(&StaticRegistry::builtin(), SnapshotProvider::builtin(), config)?;
///     let mut worker = PipelineWorker::new(pipeline, JsonArticleFile::new("articles.json"), interval);
///
///     // Run until Ctrl+C, reporting each batch as it completes
///     worker.run(|batch| println!("{} article(s) checked", batch.articles.len())).await?;
///     Ok(())
/// }
/// ```
pub struct PipelineWorker<E, P, S> {
    pipeline: Pipeline<E, P>,
    source: S,
    interval: Duration,
    metrics: PipelineMetrics,
}

impl<E, P, S> PipelineWorker<E, P, S>
where
    E: ClaimExtractor,
    P: DataProvider + Send + Sync + 'static,
    S: ArticleSource,
{
    /// Create a worker
    pub fn new(pipeline: Pipeline<E, P>, source: S, interval: Duration) -> Self {
        Self {
            pipeline,
            source,
            interval,
            metrics: PipelineMetrics::new(),
        }
    }

    /// Metrics accumulated over every completed run
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Reset the accumulated metrics
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Run until a shutdown signal (Ctrl+C) is received
    ///
    /// Each completed batch is handed to `on_batch` as soon as it finishes.
    /// A cycle whose source or setup fails is logged and skipped.
    pub async fn run<F>(&mut self, on_batch: F) -> Result<(), PipelineError>
    where
        F: FnMut(BatchReport),
    {
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
            }
        };
        self.run_until(shutdown, on_batch).await
    }

    /// Run until `shutdown` completes
    pub async fn run_until<G, F>(&mut self, shutdown: G, mut on_batch: F) -> Result<(), PipelineError>
    where
        G: Future<Output = ()>,
        F: FnMut(BatchReport),
    {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!("Pipeline worker started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tracing::debug!("Starting batch cycle");
                    match self.cycle().await {
                        Ok(report) => on_batch(report),
                        Err(e) => tracing::error!("Batch cycle failed: {}", e),
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping pipeline worker");
                    break;
                }
            }
        }

        tracing::info!("Pipeline worker stopped. Final metrics:\n{}", self.metrics.summary());
        Ok(())
    }

    /// Run a fixed number of cycles and return each batch report
    ///
    /// Unlike [`PipelineWorker::run`], the first failure stops the worker.
    pub async fn run_cycles(&mut self, cycles: usize) -> Result<Vec<BatchReport>, PipelineError> {
        let mut ticker = interval(self.interval);
        let mut reports = Vec::with_capacity(cycles);

        tracing::info!(
            "Pipeline worker started for {} cycles (interval: {:?})",
            cycles,
            self.interval
        );

        for cycle in 0..cycles {
            ticker.tick().await;
            tracing::debug!("Starting batch cycle {}/{}", cycle + 1, cycles);
            match self.cycle().await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    tracing::error!("Batch cycle {}/{} failed: {}", cycle + 1, cycles, e);
                    return Err(e);
                }
            }
        }

        tracing::info!(
            "Pipeline worker finished {} cycles. Final metrics:\n{}",
            cycles,
            self.metrics.summary()
        );
        Ok(reports)
    }

    async fn cycle(&mut self) -> Result<BatchReport, PipelineError> {
        let articles = self.source.fetch_articles()?;
        let report = self.pipeline.run_batch(&articles).await?;
        self.metrics.absorb(&report.metrics);
        tracing::info!(
            "Cycle completed: {} article(s), {} verdict(s)",
            articles.len(),
            report.metrics.total_verdicts()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{Article, JsonArticleFile};
    use crate::config::PipelineConfig;
    use statcheck_domain::{Claim, DateRange, Granularity, SeriesMeta};

    struct NoClaims;

    impl ClaimExtractor for NoClaims {
        fn extract(&self, _article_text: &str, _source_url: &str) -> Vec<Claim> {
            Vec::new()
        }
    }

    struct Registry;

    impl statcheck_domain::traits::SeriesRegistry for Registry {
        fn list_series(&self) -> Vec<SeriesMeta> {
            let d = |y| chrono::NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
            vec![SeriesMeta {
                id: "rent".to_string(),
                name: "Rent".to_string(),
                keywords: ["rent".to_string()].into_iter().collect(),
                unit: "index".to_string(),
                granularity: Granularity::Monthly,
                valid_range: DateRange::new(d(2020), d(2024)).unwrap(),
                source: "test".to_string(),
            }]
        }
    }

    fn worker<S: ArticleSource>(source: S) -> PipelineWorker<NoClaims, statcheck_provider::MockProvider, S> {
        let pipeline = Pipeline::new(
            NoClaims,
            &Registry,
            statcheck_provider::MockProvider::new(),
            PipelineConfig::default(),
        )
        .unwrap();
        PipelineWorker::new(pipeline, source, Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_run_cycles_accumulates_metrics() {
        let source = vec![
            Article::new("a", "월세 급등", "본문"),
            Article::new("b", "종부세 폭탄", "본문"),
        ];
        let mut worker = worker(source);

        let reports = worker.run_cycles(3).await.unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(worker.metrics().runs, 3);
        assert_eq!(worker.metrics().articles_processed, 6);
    }

    #[tokio::test]
    async fn test_failing_source_stops_run_cycles() {
        let mut worker = worker(JsonArticleFile::new("/nonexistent/articles.json"));
        assert!(matches!(worker.run_cycles(2).await, Err(PipelineError::Io(_))));
        assert_eq!(worker.metrics().runs, 0);
    }

    #[tokio::test]
    async fn test_run_until_hands_every_batch_to_the_callback() {
        let mut worker = worker(vec![
            Article::new("a", "월세 급등", "본문"),
            Article::new("b", "종부세 폭탄", "본문"),
        ]);

        let mut batches = Vec::new();
        worker
            .run_until(tokio::time::sleep(Duration::from_millis(60)), |batch| batches.push(batch))
            .await
            .unwrap();

        assert!(!batches.is_empty());
        assert!(batches.iter().all(|batch| batch.articles.len() == 2));
        assert_eq!(worker.metrics().runs, batches.len());
    }

    #[tokio::test]
    async fn test_run_until_skips_failed_cycles() {
        let mut worker = worker(JsonArticleFile::new("/nonexistent/articles.json"));

        let mut delivered = 0;
        worker
            .run_until(tokio::time::sleep(Duration::from_millis(30)), |_| delivered += 1)
            .await
            .unwrap();

        assert_eq!(delivered, 0);
        assert_eq!(worker.metrics().runs, 0);
    }

    #[tokio::test]
    async fn test_reset_metrics() {
        let mut worker = worker(vec![Article::new("a", "", "본문")]);
        worker.run_cycles(1).await.unwrap();
        assert_eq!(worker.metrics().runs, 1);

        worker.reset_metrics();
        assert_eq!(worker.metrics().runs, 0);
    }
}
