//! Statcheck Synthesizer
//!
//! Turns comparison results into a verdict and a rebuttal report.
//!
//! # Rules
//!
//! - The best comparison is the highest-ranked candidate with some data
//!   coverage; without one the claim is **unverifiable** with confidence 0
//! - Matching directions are **supported**, opposite directions **refuted**,
//!   and a missing or flat direction **inconclusive**
//! - The observed change must reach `magnitude_ratio` (0.5) of an asserted
//!   magnitude in comparable units; a failed check downgrades supported to
//!   inconclusive, incompatible units skip the check
//! - Confidence is the match score weighted by coverage (full 1.0, partial 0.6)
//!
//! # Examples
//!
//! ```
//! use statcheck_domain::{Claim, ClaimId, Direction, TimeWindow, VerdictLabel};
//! use statcheck_synthesizer::Synthesizer;
//! use std::sync::Arc;
//!
//! let claim = Arc::new(Claim {
//!     id: ClaimId::from_value(1),
//!     raw_text: "실업률이 급등했다".to_string(),
//!     subject_keywords: Default::default(),
//!     metric_keywords: ["unemployment".to_string()].into_iter().collect(),
//!     asserted_direction: Direction::Up,
//!     asserted_magnitude: None,
//!     time_window: TimeWindow::open(),
//!     source_url: "https://news.example/1".to_string(),
//!     surface_terms: Default::default(),
//!     emphatic: true,
//! });
//!
//! let synthesizer = Synthesizer::default();
//! let verdict = synthesizer.synthesize(&claim, &[]);
//! assert_eq!(verdict.label, VerdictLabel::Unverifiable);
//!
//! let report = synthesizer.report(verdict);
//! assert!(report.evidence_series.is_empty());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod narrative;
mod synthesizer;

pub use config::SynthesizerConfig;
pub use error::SynthesizerError;
pub use narrative::narrate;
pub use synthesizer::Synthesizer;
