//! On-disk registry format

use crate::error::RegistryError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statcheck_domain::{DateRange, Granularity, SeriesMeta};
use std::collections::BTreeSet;

/// A registry file: a list of `[[series]]` tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Series entries
    #[serde(default)]
    pub series: Vec<SeriesEntry>,
}

/// One `[[series]]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesEntry {
    /// Registry identifier
    pub id: String,

    /// Human-readable name (defaults to the id)
    #[serde(default)]
    pub name: Option<String>,

    /// Canonical keywords
    pub keywords: Vec<String>,

    /// Unit of the values
    pub unit: String,

    /// "daily", "monthly", "quarterly" or "yearly"
    pub granularity: String,

    /// First valid date
    pub valid_from: NaiveDate,

    /// Last valid date
    pub valid_to: NaiveDate,

    /// Publishing agency
    #[serde(default)]
    pub source: Option<String>,
}

impl RegistryFile {
    /// Parse a registry from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, RegistryError> {
        Ok(toml::from_str(toml_str)?)
    }
}

impl SeriesEntry {
    /// Validate the entry and convert it to domain metadata
    pub fn into_meta(self) -> Result<SeriesMeta, RegistryError> {
        let invalid = |reason: String| RegistryError::InvalidSeries {
            id: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id is empty".to_string()));
        }

        let granularity = Granularity::parse(&self.granularity)
            .ok_or_else(|| invalid(format!("unknown granularity '{}'", self.granularity)))?;

        let valid_range = DateRange::new(self.valid_from, self.valid_to).ok_or_else(|| {
            invalid(format!(
                "valid_from {} is after valid_to {}",
                self.valid_from, self.valid_to
            ))
        })?;

        let keywords: BTreeSet<String> = self
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(invalid("no keywords".to_string()));
        }

        Ok(SeriesMeta {
            name: self.name.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            keywords,
            unit: self.unit,
            granularity,
            valid_range,
            source: self.source.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[series]]
id = "reb.rent-index"
name = "Monthly rent index"
keywords = ["Rent", "housing", " "]
unit = "index"
granularity = "monthly"
valid_from = "2015-01-01"
valid_to = "2025-12-31"
source = "REB"
"#;

    #[test]
    fn test_parse_and_convert() {
        let file = RegistryFile::from_toml(SAMPLE).unwrap();
        assert_eq!(file.series.len(), 1);

        let meta = file.series.into_iter().next().unwrap().into_meta().unwrap();
        assert_eq!(meta.id, "reb.rent-index");
        assert_eq!(meta.granularity, Granularity::Monthly);
        assert!(meta.keywords.contains("rent"));
        assert_eq!(meta.keywords.len(), 2);
    }

    #[test]
    fn test_unknown_granularity() {
        let toml_str = SAMPLE.replace("monthly", "hourly");
        let file = RegistryFile::from_toml(&toml_str).unwrap();
        let result = file.series.into_iter().next().unwrap().into_meta();
        assert!(matches!(result, Err(RegistryError::InvalidSeries { .. })));
    }

    #[test]
    fn test_inverted_range() {
        let toml_str = SAMPLE.replace("2015-01-01", "2030-01-01");
        let file = RegistryFile::from_toml(&toml_str).unwrap();
        assert!(file.series.into_iter().next().unwrap().into_meta().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            RegistryFile::from_toml("[[series]\nid="),
            Err(RegistryError::Toml(_))
        ));
    }
}
