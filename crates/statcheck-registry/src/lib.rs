//! Statcheck Series Registry
//!
//! Static catalogue mapping canonical keywords to official statistical series.
//!
//! The registry is an immutable value built once at startup, either from the
//! built-in catalogue or from a TOML file, and passed explicitly to the
//! resolver. There is no global lookup.
//!
//! # Examples
//!
//! ```
//! use statcheck_registry::StaticRegistry;
//! use statcheck_domain::traits::SeriesRegistry;
//!
//! let registry = StaticRegistry::builtin();
//! assert!(registry.get("nts.property-tax").is_some());
//! assert!(!registry.list_series().is_empty());
//! ```
//!
//! # File format
//!
//! ```toml
//! [[series]]
//! id = "kosis.rent.monthly-share"
//! name = "Monthly-rent share of rental transactions"
//! keywords = ["rent", "housing"]
//! unit = "%"
//! granularity = "yearly"
//! valid_from = "2020-01-01"
//! valid_to = "2024-12-31"
//! source = "KOSIS"
//! ```

#![warn(missing_docs)]

mod builtin;
mod config;
mod error;
mod registry;

pub use config::{RegistryFile, SeriesEntry};
pub use error::RegistryError;
pub use registry::StaticRegistry;
