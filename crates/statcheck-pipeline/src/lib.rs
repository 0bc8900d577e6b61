//! Statcheck Batch Pipeline
//!
//! Wires the extractor, resolver, comparator and synthesizer into one
//! batch run over a set of articles.
//!
//! # Overview
//!
//! For each article the pipeline:
//! 1. Scans priority signals and extracts claims
//! 2. Resolves each claim against the series catalogue
//! 3. Compares every candidate with provider data, concurrently across the
//!    whole batch, through a fresh per-run cache
//! 4. Synthesizes one verdict and one rebuttal report per claim
//!
//! Articles whose titles are near-identical are grouped, and only the
//! first of each group is checked. Articles scoring below the priority
//! threshold can be skipped.
//!
//! # Usage
//!
//! ## Single Batch
//!
//! ```no_run
//! use statcheck_pipeline::{JsonArticleFile, ArticleSource, Pipeline, PipelineConfig};
//! use statcheck_provider::SnapshotProvider;
//! use statcheck_registry::StaticRegistry;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::keyword(
//!     &StaticRegistry::builtin(),
//!     SnapshotProvider::builtin(),
//!     PipelineConfig::default(),
//! )?;
//!
//! let articles = JsonArticleFile::new("articles.json").fetch_articles()?;
//! let batch = pipeline.run_batch(&articles).await?;
//! println!("{}", batch.metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use statcheck_pipeline::PipelineConfig;
//!
//! // Default: check everything, group related titles
//! let config = PipelineConfig::default();
//! assert!(!config.batch.skip_low_priority);
//!
//! // Aggressive: skip low-priority articles, strict matching
//! let config = PipelineConfig::aggressive();
//! assert!(config.batch.skip_low_priority);
//!
//! // Lenient: broad matching, long timeouts, no grouping
//! let config = PipelineConfig::lenient();
//! assert!(!config.batch.group_related);
//! ```

#![warn(missing_docs)]

mod article;
mod config;
mod error;
mod metrics;
mod pipeline;
mod related;
mod worker;

pub use article::{Article, ArticleSource, JsonArticleFile};
pub use config::{BatchSettings, PipelineConfig};
pub use error::PipelineError;
pub use metrics::PipelineMetrics;
pub use pipeline::{ArticleReport, BatchReport, Pipeline};
pub use related::{group_by_title, title_similarity};
pub use worker::PipelineWorker;
