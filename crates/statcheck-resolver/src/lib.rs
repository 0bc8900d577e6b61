//! Statcheck Resolver
//!
//! Matches claims to official series in the registry.
//!
//! A candidate's score is the Jaccard overlap between the claim's keywords
//! and the series' keywords, scaled by how well the claimed window fits the
//! series' valid range (1.0 inside, 0.5 partial, 0 disjoint). Disjoint series
//! are never candidates. Results are ranked by score, then finer
//! granularity, then series id, so resolution is deterministic.
//!
//! # Examples
//!
//! ```
//! use statcheck_domain::traits::ClaimExtractor;
//! use statcheck_extractor::KeywordExtractor;
//! use statcheck_registry::StaticRegistry;
//! use statcheck_resolver::{Resolver, ResolverConfig};
//! use std::sync::Arc;
//!
//! let resolver = Resolver::new(&StaticRegistry::builtin(), ResolverConfig::default()).unwrap();
//! let claims = KeywordExtractor::default().extract("종부세가 폭락했다", "https://news.example/1");
//!
//! let candidates = resolver.resolve(&Arc::new(claims[0].clone()));
//! assert_eq!(candidates[0].series.id, "nts.property-tax");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod resolver;

pub use config::ResolverConfig;
pub use error::ResolverError;
pub use resolver::{keyword_overlap, time_factor, Resolver};
