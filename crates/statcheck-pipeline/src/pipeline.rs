//! End-to-end checking of article batches

use crate::article::Article;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::metrics::PipelineMetrics;
use crate::related::group_by_title;
use statcheck_comparator::{Comparator, ComparatorStats};
use statcheck_domain::traits::{ClaimExtractor, DataProvider, SeriesRegistry};
use statcheck_domain::{Claim, ComparisonResult, MatchCandidate, RebuttalReport};
use statcheck_extractor::{ArticleSignals, KeywordExtractor, PriorityScore, PriorityScorer};
use statcheck_resolver::Resolver;
use statcheck_synthesizer::Synthesizer;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Everything the pipeline found in one article
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleReport {
    /// Article URL
    pub url: String,
    /// Article title
    pub title: String,
    /// Signals used for the priority score
    pub signals: ArticleSignals,
    /// Priority score
    pub priority: PriorityScore,
    /// Claims were not checked because the score was below the threshold
    pub skipped: bool,
    /// URLs of articles folded into this one
    pub related_urls: Vec<String>,
    /// One report per claim, in extraction order
    pub reports: Vec<RebuttalReport>,
}

/// Result of one batch run
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// One report per group leader, in input order
    pub articles: Vec<ArticleReport>,
    /// Counters for this run
    pub metrics: PipelineMetrics,
}

struct Prepared {
    url: String,
    title: String,
    signals: ArticleSignals,
    priority: PriorityScore,
    skipped: bool,
    claims: Vec<(Arc<Claim>, Vec<MatchCandidate>)>,
}

impl Prepared {
    fn candidate_count(&self) -> usize {
        self.claims.iter().map(|(_, c)| c.len()).sum()
    }
}

/// Extract, resolve, compare and judge
///
/// The registry is read once at construction. Each run gets a fresh
/// comparator, so nothing fetched in one run is reused by the next.
///
/// # Examples
///
/// ```no_run
/// use statcheck_pipeline::{Article, Pipeline, PipelineConfig};
/// use statcheck_provider::SnapshotProvider;
/// use statcheck_registry::StaticRegistry;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pipeline = Pipeline::keyword(
///     &StaticRegistry::builtin(),
///     SnapshotProvider::builtin(),
///     PipelineConfig::default(),
/// )?;
///
/// let article = Article::new("https://news.example/1", "", "2023년 월세 비중이 급증했다.");
/// let report = pipeline.run_article(&article).await?;
/// for rebuttal in &report.reports {
///     println!("{}", rebuttal.narrative);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, P> {
    extractor: E,
    resolver: Resolver,
    synthesizer: Synthesizer,
    scorer: PriorityScorer,
    provider: Arc<P>,
    config: PipelineConfig,
    fetch_timeout: Duration,
}

impl<P> Pipeline<KeywordExtractor, P>
where
    P: DataProvider + Send + Sync + 'static,
{
    /// Create a pipeline with the keyword extractor built from `config.extractor`
    pub fn keyword<R: SeriesRegistry>(
        registry: &R,
        provider: P,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        let extractor = KeywordExtractor::new(config.extractor.clone())?;
        Self::new(extractor, registry, provider, config)
    }
}

impl<E, P> Pipeline<E, P>
where
    E: ClaimExtractor,
    P: DataProvider + Send + Sync + 'static,
{
    /// Create a pipeline
    pub fn new<R: SeriesRegistry>(
        extractor: E,
        registry: &R,
        provider: P,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            extractor,
            resolver: Resolver::new(registry, config.resolver.clone())?,
            synthesizer: Synthesizer::new(config.synthesizer.clone())?,
            scorer: PriorityScorer::new(config.priority.clone()),
            provider: Arc::new(provider),
            fetch_timeout: config.comparator.fetch_timeout(),
            config,
        })
    }

    /// Override the per-call provider timeout
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The resolver, and through it the series catalogue
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Score an article without checking its claims
    pub fn score(&self, title: &str, text: &str) -> (ArticleSignals, PriorityScore) {
        let signals = ArticleSignals::scan(title, text);
        let claims = self.extractor.extract(text, "");
        let priority = self.scorer.score(&signals, claims.len());
        (signals, priority)
    }

    /// Check a single article; grouping does not apply
    pub async fn run_article(&self, article: &Article) -> Result<ArticleReport, PipelineError> {
        let prepared = [self.prepare(article)];
        let (results, _) = self.compare(&prepared).await?;
        let [prepared] = prepared;
        let report = self.assemble(prepared, Vec::new(), &mut results.into_iter(), None);
        info!(
            "Checked {}: {} claim(s), priority {}",
            report.url,
            report.reports.len(),
            report.priority.priority
        );
        Ok(report)
    }

    /// Check a batch of articles
    ///
    /// Comparisons for every claim in the batch run concurrently through one
    /// comparator. Claim-level failures become unverifiable verdicts; only
    /// setup problems return an error.
    pub async fn run_batch(&self, articles: &[Article]) -> Result<BatchReport, PipelineError> {
        let started = Instant::now();
        let mut metrics = PipelineMetrics::new();

        let groups = if self.config.batch.group_related {
            let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
            group_by_title(&titles, self.config.batch.related_title_threshold)
        } else {
            (0..articles.len()).map(|i| vec![i]).collect()
        };

        let mut prepared = Vec::with_capacity(groups.len());
        let mut related = Vec::with_capacity(groups.len());
        for group in &groups {
            let leader = &articles[group[0]];
            let p = self.prepare(leader);
            if p.skipped {
                metrics.articles_skipped += 1;
            } else {
                metrics.articles_processed += 1;
            }
            metrics.articles_grouped += group.len() - 1;
            metrics.claims_extracted += p.claims.len();
            metrics.candidates += p.candidate_count();
            prepared.push(p);
            related.push(
                group[1..]
                    .iter()
                    .map(|&i| articles[i].url.clone())
                    .collect::<Vec<_>>(),
            );
        }

        let (results, stats) = self.compare(&prepared).await?;
        metrics.record_comparator(stats);

        let mut results = results.into_iter();
        let reports: Vec<ArticleReport> = prepared
            .into_iter()
            .zip(related)
            .map(|(p, related_urls)| self.assemble(p, related_urls, &mut results, Some(&mut metrics)))
            .collect();

        metrics.runs = 1;
        metrics.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            "Batch finished: {} article(s), {} claim(s), {} verdict(s) in {}ms",
            articles.len(),
            metrics.claims_extracted,
            metrics.total_verdicts(),
            metrics.elapsed_ms
        );

        Ok(BatchReport {
            articles: reports,
            metrics,
        })
    }

    fn prepare(&self, article: &Article) -> Prepared {
        let signals = ArticleSignals::scan(&article.title, &article.text);
        let claims = self.extractor.extract(&article.text, &article.url);
        let priority = self.scorer.score(&signals, claims.len());
        let skipped = self.config.batch.skip_low_priority && !priority.should_factcheck;

        debug!(
            "Article {}: {} claim(s), score {}{}",
            article.url,
            claims.len(),
            priority.total,
            if skipped { " (skipped)" } else { "" }
        );

        let claims = if skipped {
            Vec::new()
        } else {
            claims
                .into_iter()
                .map(|claim| {
                    let claim = Arc::new(claim);
                    let candidates = self.resolver.resolve(&claim);
                    (claim, candidates)
                })
                .collect()
        };

        Prepared {
            url: article.url.clone(),
            title: article.title.clone(),
            signals,
            priority,
            skipped,
            claims,
        }
    }

    async fn compare(
        &self,
        prepared: &[Prepared],
    ) -> Result<(Vec<ComparisonResult>, ComparatorStats), PipelineError> {
        let comparator = Comparator::with_shared(Arc::clone(&self.provider), self.config.comparator.clone())?
            .with_fetch_timeout(self.fetch_timeout);
        let candidates: Vec<MatchCandidate> = prepared
            .iter()
            .flat_map(|p| p.claims.iter().flat_map(|(_, c)| c.iter().cloned()))
            .collect();
        let results = comparator.compare_all(candidates).await;
        Ok((results, comparator.stats()))
    }

    fn assemble(
        &self,
        prepared: Prepared,
        related_urls: Vec<String>,
        results: &mut impl Iterator<Item = ComparisonResult>,
        mut metrics: Option<&mut PipelineMetrics>,
    ) -> ArticleReport {
        let reports = prepared
            .claims
            .into_iter()
            .map(|(claim, candidates)| {
                let comparisons: Vec<ComparisonResult> = results.by_ref().take(candidates.len()).collect();
                let verdict = self.synthesizer.synthesize(&claim, &comparisons);
                debug!(
                    "Claim {} ({}): {} at {:.2}",
                    claim.id,
                    claim.label(),
                    verdict.label,
                    verdict.confidence
                );
                if let Some(metrics) = metrics.as_deref_mut() {
                    metrics.record_verdict(verdict.label);
                }
                self.synthesizer.report(verdict)
            })
            .collect();

        ArticleReport {
            url: prepared.url,
            title: prepared.title,
            signals: prepared.signals,
            priority: prepared.priority,
            skipped: prepared.skipped,
            related_urls,
            reports,
        }
    }
}
