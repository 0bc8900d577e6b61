//! Statcheck Extractor
//!
//! Turns article text into checkable statistical claims by keyword and
//! pattern matching, and scores how urgently an article needs checking.
//!
//! # Overview
//!
//! Extraction is heuristic dictionary matching over Korean news text. The
//! [`KeywordExtractor`] implements the `ClaimExtractor` trait from
//! `statcheck-domain`, so a different strategy can replace it without
//! touching the resolver, comparator or synthesizer.
//!
//! # Architecture
//!
//! ```text
//! Text → sentences → tokens → metric / cue / number / date matches → Claims
//! Title + Text → ArticleSignals → PriorityScorer → PriorityScore
//! ```
//!
//! # Key Features
//!
//! - **Lexicon matching**: metric and subject terms map to canonical keywords
//!   shared with the series registry; particles attached to words are tolerated
//! - **Direction cues**: a metric only becomes a claim when a rise or fall word
//!   sits within `token_window` tokens
//! - **Magnitudes and windows**: `50%`, `0.25%p`, `3배`, `1.5조원`; `2023년 1월`,
//!   `2023.01부터`, `전년 대비`
//! - **Deterministic ids**: repeated runs over the same article give the same claims
//! - **Priority scoring**: extreme wording, vague sourcing and causal phrasing
//!   raise an article's score
//!
//! # Example Usage
//!
//! ```
//! use statcheck_domain::traits::ClaimExtractor;
//! use statcheck_domain::Direction;
//! use statcheck_extractor::{ArticleSignals, KeywordExtractor, PriorityScorer};
//!
//! let extractor = KeywordExtractor::default();
//! let text = "서울 아파트 월세가 1년 새 50% 폭등했다.";
//! let claims = extractor.extract(text, "https://news.example/1");
//!
//! assert_eq!(claims.len(), 1);
//! assert_eq!(claims[0].asserted_direction, Direction::Up);
//! assert!(claims[0].emphatic);
//!
//! let signals = ArticleSignals::scan("월세 폭등", text);
//! let score = PriorityScorer::default().score(&signals, claims.len());
//! assert!(score.should_factcheck);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod lexicon;
mod parser;
mod priority;
mod signals;
mod tokenize;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::KeywordExtractor;
pub use lexicon::{Cue, Lexicon, Term};
pub use priority::{Priority, PriorityScore, PriorityScorer, PriorityWeights};
pub use signals::ArticleSignals;
