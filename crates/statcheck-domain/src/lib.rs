//! Statcheck Domain Layer
//!
//! Core data model and collaborator interfaces for checking statistical
//! claims in news articles against official time series. This crate holds no
//! I/O and no framework dependencies; it only depends on `uuid` for claim
//! identifiers and `chrono` for calendar dates.
//!
//! ## Key Concepts
//!
//! - **Claim**: a checkable statistical assertion extracted from article text
//! - **Series**: an official time series with a granularity and valid range
//! - **Observation**: one timestamped value within a series
//! - **Comparison**: asserted trend vs. observed trend for one candidate series
//! - **Verdict**: supported / refuted / inconclusive / unverifiable, with confidence
//!
//! ## Architecture
//!
//! ```text
//! text → ClaimExtractor → Claim → resolver → MatchCandidate
//!      → comparator (DataProvider) → ComparisonResult → synthesizer → Verdict
//! ```
//!
//! Infrastructure (registries, data providers, extractors) implements the
//! traits in [`traits`] in other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod error;
pub mod magnitude;
pub mod observation;
pub mod series;
pub mod traits;
pub mod verdict;
pub mod window;

// Re-exports for convenience
pub use claim::{Claim, ClaimId, ClaimKey};
pub use error::ProviderError;
pub use magnitude::{Direction, Magnitude, MagnitudeUnit};
pub use observation::Observation;
pub use series::{Granularity, SeriesMeta};
pub use verdict::{
    ComparisonResult, Coverage, MagnitudeCheck, MatchCandidate, RebuttalReport, Verdict,
    VerdictLabel,
};
pub use window::{DateRange, TimeWindow, WindowFit};
