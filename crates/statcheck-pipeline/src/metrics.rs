//! Metrics collection for pipeline runs

use statcheck_comparator::ComparatorStats;
use statcheck_domain::VerdictLabel;
use std::collections::HashMap;

/// Metrics collected during pipeline runs
///
/// Counts accumulate across runs until [`PipelineMetrics::reset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineMetrics {
    /// Articles whose claims were checked
    pub articles_processed: usize,

    /// Articles reported without checking (below the priority threshold)
    pub articles_skipped: usize,

    /// Articles folded into an earlier article with a similar title
    pub articles_grouped: usize,

    /// Claims extracted from checked articles
    pub claims_extracted: usize,

    /// Match candidates produced by the resolver
    pub candidates: usize,

    /// Provider calls made
    pub fetches: usize,

    /// Lookups answered from the per-run cache
    pub cache_hits: usize,

    /// Comparisons that absorbed a provider error
    pub provider_failures: usize,

    /// Verdicts per label
    pub verdicts: HashMap<VerdictLabel, usize>,

    /// Runs completed
    pub runs: usize,

    /// Total wall-clock time in milliseconds
    pub elapsed_ms: u64,
}

impl PipelineMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a verdict
    pub fn record_verdict(&mut self, label: VerdictLabel) {
        *self.verdicts.entry(label).or_insert(0) += 1;
    }

    /// Fold in a comparator's counters
    pub fn record_comparator(&mut self, stats: ComparatorStats) {
        self.fetches += stats.fetches;
        self.cache_hits += stats.cache_hits;
        self.provider_failures += stats.provider_failures;
    }

    /// Verdicts recorded for one label
    pub fn verdict_count(&self, label: VerdictLabel) -> usize {
        self.verdicts.get(&label).copied().unwrap_or(0)
    }

    /// Total verdicts across all labels
    pub fn total_verdicts(&self) -> usize {
        self.verdicts.values().sum()
    }

    /// Add another run's metrics to these
    pub fn absorb(&mut self, other: &PipelineMetrics) {
        self.articles_processed += other.articles_processed;
        self.articles_skipped += other.articles_skipped;
        self.articles_grouped += other.articles_grouped;
        self.claims_extracted += other.claims_extracted;
        self.candidates += other.candidates;
        self.fetches += other.fetches;
        self.cache_hits += other.cache_hits;
        self.provider_failures += other.provider_failures;
        for (label, count) in &other.verdicts {
            *self.verdicts.entry(*label).or_insert(0) += count;
        }
        self.runs += other.runs;
        self.elapsed_ms += other.elapsed_ms;
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Pipeline Metrics Summary".to_string(),
            "========================".to_string(),
            format!("Runs: {}", self.runs),
            format!("Elapsed: {}ms", self.elapsed_ms),
            String::new(),
            format!(
                "Articles: {} checked, {} skipped, {} grouped",
                self.articles_processed, self.articles_skipped, self.articles_grouped
            ),
            format!("Claims extracted: {}", self.claims_extracted),
            format!("Candidates: {}", self.candidates),
            format!(
                "Provider: {} fetches, {} cache hits, {} failures",
                self.fetches, self.cache_hits, self.provider_failures
            ),
        ];

        if !self.verdicts.is_empty() {
            lines.push(String::new());
            lines.push("Verdicts:".to_string());
            for label in VerdictLabel::all() {
                lines.push(format!("  {}: {}", label, self.verdict_count(label)));
            }
            lines.push(format!("  Total: {}", self.total_verdicts()));
        }

        lines.join("\n")
    }
}
