//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde::Serialize;
use statcheck_domain::{MagnitudeCheck, RebuttalReport, SeriesMeta, VerdictLabel};
use statcheck_extractor::{ArticleSignals, PriorityScore};
use statcheck_pipeline::{ArticleReport, BatchReport, PipelineMetrics};
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

#[derive(Serialize)]
struct ObservationView {
    date: String,
    value: f64,
}

#[derive(Serialize)]
struct ReportView {
    claim_id: String,
    claim: String,
    raw_text: String,
    direction: &'static str,
    magnitude: Option<String>,
    window: String,
    verdict: &'static str,
    confidence: f64,
    magnitude_check: &'static str,
    series: Option<String>,
    coverage: Option<&'static str>,
    percent_change: Option<f64>,
    evidence: Vec<ObservationView>,
    narrative: String,
}

#[derive(Serialize)]
struct ArticleView<'a> {
    url: &'a str,
    title: &'a str,
    priority: &'a PriorityScore,
    signals: &'a ArticleSignals,
    skipped: bool,
    related_urls: &'a [String],
    reports: Vec<ReportView>,
}

#[derive(Serialize)]
struct MetricsView {
    runs: usize,
    articles_processed: usize,
    articles_skipped: usize,
    articles_grouped: usize,
    claims_extracted: usize,
    candidates: usize,
    fetches: usize,
    cache_hits: usize,
    provider_failures: usize,
    verdicts: BTreeMap<&'static str, usize>,
    elapsed_ms: u64,
}

#[derive(Serialize)]
struct BatchView<'a> {
    articles: Vec<ArticleView<'a>>,
    metrics: MetricsView,
}

#[derive(Serialize)]
struct SeriesView<'a> {
    id: &'a str,
    name: &'a str,
    keywords: Vec<&'a str>,
    unit: &'a str,
    granularity: &'static str,
    valid_from: String,
    valid_to: String,
    source: &'a str,
}

#[derive(Serialize)]
struct ScoreView<'a> {
    score: &'a PriorityScore,
    signals: &'a ArticleSignals,
}

fn magnitude_check_str(check: MagnitudeCheck) -> &'static str {
    match check {
        MagnitudeCheck::NotAsserted => "not-asserted",
        MagnitudeCheck::Passed => "passed",
        MagnitudeCheck::Failed => "failed",
        MagnitudeCheck::IncompatibleUnits => "incompatible-units",
    }
}

impl ReportView {
    fn from_report(report: &RebuttalReport) -> Self {
        let claim = &report.claim;
        let verdict = &report.verdict;
        let best = verdict.best_comparison.as_ref();
        Self {
            claim_id: claim.id.to_string(),
            claim: claim.label(),
            raw_text: claim.raw_text.clone(),
            direction: claim.asserted_direction.as_str(),
            magnitude: claim.asserted_magnitude.as_ref().map(ToString::to_string),
            window: claim.time_window.to_string(),
            verdict: verdict.label.as_str(),
            confidence: verdict.confidence,
            magnitude_check: magnitude_check_str(verdict.magnitude_check),
            series: best.map(|c| c.candidate.series.id.clone()),
            coverage: best.map(|c| c.data_coverage.as_str()),
            percent_change: best.and_then(|c| c.percent_change),
            evidence: report
                .evidence_series
                .iter()
                .map(|o| ObservationView {
                    date: o.timestamp.to_string(),
                    value: o.value,
                })
                .collect(),
            narrative: report.narrative.clone(),
        }
    }
}

impl<'a> ArticleView<'a> {
    fn from_report(report: &'a ArticleReport) -> Self {
        Self {
            url: &report.url,
            title: &report.title,
            priority: &report.priority,
            signals: &report.signals,
            skipped: report.skipped,
            related_urls: &report.related_urls,
            reports: report.reports.iter().map(ReportView::from_report).collect(),
        }
    }
}

impl MetricsView {
    fn from_metrics(metrics: &PipelineMetrics) -> Self {
        Self {
            runs: metrics.runs,
            articles_processed: metrics.articles_processed,
            articles_skipped: metrics.articles_skipped,
            articles_grouped: metrics.articles_grouped,
            claims_extracted: metrics.claims_extracted,
            candidates: metrics.candidates,
            fetches: metrics.fetches,
            cache_hits: metrics.cache_hits,
            provider_failures: metrics.provider_failures,
            verdicts: VerdictLabel::all()
                .into_iter()
                .map(|label| (label.as_str(), metrics.verdict_count(label)))
                .collect(),
            elapsed_ms: metrics.elapsed_ms,
        }
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format one article's results.
    pub fn format_article(&self, report: &ArticleReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&ArticleView::from_report(report))?),
            OutputFormat::Table => Ok(self.article_table(report)),
            OutputFormat::Quiet => Ok(self.article_quiet(report)),
        }
    }

    /// Format a batch run.
    pub fn format_batch(&self, batch: &BatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let view = BatchView {
                    articles: batch.articles.iter().map(ArticleView::from_report).collect(),
                    metrics: MetricsView::from_metrics(&batch.metrics),
                };
                Ok(serde_json::to_string_pretty(&view)?)
            }
            OutputFormat::Table => {
                let mut sections: Vec<String> =
                    batch.articles.iter().map(|a| self.article_table(a)).collect();
                sections.push(batch.metrics.summary());
                Ok(sections.join("\n\n"))
            }
            OutputFormat::Quiet => Ok(batch
                .articles
                .iter()
                .map(|a| self.article_quiet(a))
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the series catalogue.
    pub fn format_series(&self, series: &[SeriesMeta]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let views: Vec<SeriesView> = series
                    .iter()
                    .map(|s| SeriesView {
                        id: &s.id,
                        name: &s.name,
                        keywords: s.keywords.iter().map(String::as_str).collect(),
                        unit: &s.unit,
                        granularity: s.granularity.as_str(),
                        valid_from: s.valid_range.start.to_string(),
                        valid_to: s.valid_range.end.to_string(),
                        source: &s.source,
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&views)?)
            }
            OutputFormat::Table => {
                if series.is_empty() {
                    return Ok(self.colorize("No series registered.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Keywords", "Unit", "Granularity", "Range", "Source"]);
                for s in series {
                    let keywords = s.keywords.iter().cloned().collect::<Vec<_>>().join(", ");
                    builder.push_record([
                        s.id.as_str(),
                        s.name.as_str(),
                        keywords.as_str(),
                        s.unit.as_str(),
                        s.granularity.as_str(),
                        s.valid_range.to_string().as_str(),
                        s.source.as_str(),
                    ]);
                }
                Ok(self.styled(builder))
            }
            OutputFormat::Quiet => Ok(series
                .iter()
                .map(|s| s.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a priority score.
    pub fn format_score(&self, signals: &ArticleSignals, score: &PriorityScore) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&ScoreView { score, signals })?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Signal", "Points"]);
                for (signal, points) in &score.breakdown {
                    builder.push_record([signal.clone(), points.to_string()]);
                }
                builder.push_record(["total".to_string(), score.total.to_string()]);

                let mut lines = vec![self.styled(builder)];
                if signals.extreme() {
                    lines.push(format!("Extreme wording: {}", signals.extreme_terms.join(", ")));
                }
                let verdict = format!(
                    "Priority: {} ({})",
                    score.priority,
                    if score.should_factcheck { "check" } else { "below threshold" }
                );
                lines.push(if score.should_factcheck {
                    self.colorize(&verdict, "red")
                } else {
                    self.colorize(&verdict, "green")
                });
                Ok(lines.join("\n"))
            }
            OutputFormat::Quiet => Ok(score.total.to_string()),
        }
    }

    fn article_table(&self, report: &ArticleReport) -> String {
        let mut header = report.url.clone();
        if !report.title.is_empty() {
            header = format!("{} - {}", report.title, report.url);
        }
        let mut lines = vec![self.colorize(&header, "cyan")];
        lines.push(format!(
            "Priority: {} (score {})",
            report.priority.priority, report.priority.total
        ));
        if !report.related_urls.is_empty() {
            lines.push(format!("Related: {}", report.related_urls.join(", ")));
        }

        if report.skipped {
            lines.push(self.warning("Skipped: priority below threshold"));
            return lines.join("\n");
        }
        if report.reports.is_empty() {
            lines.push(self.colorize("No checkable claims found.", "yellow"));
            return lines.join("\n");
        }

        let mut builder = Builder::default();
        builder.push_record(["Claim", "Asserted", "Window", "Series", "Observed", "Verdict", "Confidence"]);
        for r in &report.reports {
            let claim = &r.claim;
            let asserted = match &claim.asserted_magnitude {
                Some(m) => format!("{} {}", claim.asserted_direction, m),
                None => claim.asserted_direction.to_string(),
            };
            let best = r.verdict.best_comparison.as_ref();
            let series = best.map(|c| c.candidate.series.id.clone()).unwrap_or_else(|| "-".into());
            let observed = best
                .and_then(|c| c.percent_change)
                .map(|pc| format!("{:+.1}%", pc * 100.0))
                .unwrap_or_else(|| "-".into());
            builder.push_record([
                claim.label(),
                asserted,
                claim.time_window.to_string(),
                series,
                observed,
                self.label(r.verdict.label),
                format!("{:.2}", r.verdict.confidence),
            ]);
        }
        lines.push(self.styled(builder));
        for r in &report.reports {
            lines.push(format!("  {}", r.narrative));
        }
        lines.join("\n")
    }

    fn article_quiet(&self, report: &ArticleReport) -> String {
        report
            .reports
            .iter()
            .map(|r| format!("{}\t{}\t{:.2}", r.claim.id, r.verdict.label, r.verdict.confidence))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn styled(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize a verdict label.
    pub fn label(&self, label: VerdictLabel) -> String {
        let color = match label {
            VerdictLabel::Supported => "green",
            VerdictLabel::Refuted => "red",
            VerdictLabel::Inconclusive => "yellow",
            VerdictLabel::Unverifiable => "magenta",
        };
        self.colorize(label.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statcheck_pipeline::{Article, Pipeline, PipelineConfig};
    use statcheck_provider::SnapshotProvider;
    use statcheck_registry::StaticRegistry;

    async fn batch() -> BatchReport {
        let pipeline = Pipeline::keyword(
            &StaticRegistry::builtin(),
            SnapshotProvider::builtin(),
            PipelineConfig::default(),
        )
        .unwrap();
        pipeline
            .run_batch(&[
                Article::new("u1", "월세 비중 급증", "2021년부터 2023년까지 월세 비중이 급증했다."),
                Article::new("u2", "", "날씨가 맑다."),
            ])
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_batch() {
        let output = Formatter::new(OutputFormat::Json, false)
            .format_batch(&batch().await)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["articles"].as_array().unwrap().len(), 2);
        assert_eq!(value["metrics"]["claims_extracted"], 1);
        assert!(value["articles"][0]["reports"][0]["narrative"].is_string());
        assert!(value["metrics"]["verdicts"]["unverifiable"].is_number());
    }

    #[tokio::test]
    async fn test_table_batch() {
        let output = Formatter::new(OutputFormat::Table, false)
            .format_batch(&batch().await)
            .unwrap();
        assert!(output.contains("Verdict"));
        assert!(output.contains("No checkable claims found."));
        assert!(output.contains("Pipeline Metrics Summary"));
    }

    #[tokio::test]
    async fn test_quiet_batch_is_one_line_per_claim() {
        let output = Formatter::new(OutputFormat::Quiet, false)
            .format_batch(&batch().await)
            .unwrap();
        assert_eq!(output.lines().count(), 1);
        assert_eq!(output.split('\t').count(), 3);
    }

    #[test]
    fn test_series_formats() {
        let registry = StaticRegistry::builtin();
        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_series(registry.series())
            .unwrap();
        assert_eq!(quiet.lines().count(), registry.len());

        let table = Formatter::new(OutputFormat::Table, false)
            .format_series(registry.series())
            .unwrap();
        assert!(table.contains("nts.property-tax"));
        assert!(table.contains("Granularity"));
    }

    #[test]
    fn test_score_quiet() {
        let signals = ArticleSignals::default();
        let score = statcheck_extractor::PriorityScorer::default().score(&signals, 1);
        let output = Formatter::new(OutputFormat::Quiet, false)
            .format_score(&signals, &score)
            .unwrap();
        assert_eq!(output, "30");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.label(VerdictLabel::Refuted), "refuted");
    }
}
