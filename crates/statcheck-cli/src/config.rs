//! Configuration management for the CLI.
//!
//! The file holds the pipeline sections (`[batch]`, `[extractor]`, ...)
//! alongside CLI-only `[settings]` and `[data]`.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use statcheck_pipeline::PipelineConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Display settings
    #[serde(default)]
    pub settings: Settings,

    /// Default data files
    #[serde(default)]
    pub data: DataSettings,

    /// Pipeline configuration
    #[serde(flatten)]
    pub pipeline: PipelineConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Data files used when no flag overrides them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSettings {
    /// Series registry TOML file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,

    /// Observation snapshot JSON file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".statcheck").join("config.toml"))
    }

    /// Parse a configuration from TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.pipeline.validate()?;
        Ok(config)
    }

    /// Load an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Load `explicit` if given, else the default file if it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert!(config.data.registry.is_none());
    }

    #[test]
    fn test_pipeline_sections_sit_at_top_level() {
        let config = Config::from_toml(
            r#"
            [settings]
            format = "json"

            [data]
            snapshot = "data/snapshot.json"

            [resolver]
            max_candidates = 1

            [batch]
            skip_low_priority = true
            "#,
        )
        .unwrap();

        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.data.snapshot, Some(PathBuf::from("data/snapshot.json")));
        assert_eq!(config.pipeline.resolver.max_candidates, Some(1));
        assert!(config.pipeline.batch.skip_low_priority);
        assert_eq!(config.pipeline.comparator.max_concurrency, 4);
    }

    #[test]
    fn test_invalid_pipeline_section_rejected() {
        let result = Config::from_toml("[synthesizer]\nmagnitude_ratio = -1.0\n");
        assert!(matches!(result, Err(CliError::Pipeline(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[settings]\ncolor = false").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert!(!config.settings.color);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Config::load(Some(Path::new("/nonexistent/statcheck.toml"))).is_err());
    }
}
