//! Command implementations.

pub mod batch;
pub mod check;
pub mod score;
pub mod series;
pub mod watch;

pub use self::batch::execute_batch;
pub use self::check::execute_check;
pub use self::score::execute_score;
pub use self::series::execute_series;
pub use self::watch::execute_watch;

use crate::cli::TextInput;
use crate::config::Config;
use crate::error::{CliError, Result};
use statcheck_extractor::KeywordExtractor;
use statcheck_pipeline::Pipeline;
use statcheck_provider::SnapshotProvider;
use statcheck_registry::StaticRegistry;
use std::io::Read;
use std::path::PathBuf;

/// Pipeline over the snapshot provider, as every command builds it.
pub type CliPipeline = Pipeline<KeywordExtractor, SnapshotProvider>;

/// Data files and settings resolved from flags and the config file.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration
    pub config: Config,
    /// Registry file; built-in catalogue when `None`
    pub registry: Option<PathBuf>,
    /// Snapshot file; built-in sample when `None`
    pub snapshot: Option<PathBuf>,
}

impl Context {
    /// Flags win over the `[data]` section.
    pub fn new(config: Config, registry: Option<PathBuf>, snapshot: Option<PathBuf>) -> Self {
        Self {
            registry: registry.or_else(|| config.data.registry.clone()),
            snapshot: snapshot.or_else(|| config.data.snapshot.clone()),
            config,
        }
    }

    /// Load the series registry.
    pub fn registry(&self) -> Result<StaticRegistry> {
        match &self.registry {
            Some(path) => Ok(StaticRegistry::load(path)?),
            None => Ok(StaticRegistry::builtin()),
        }
    }

    /// Load the observation snapshot.
    pub fn provider(&self) -> Result<SnapshotProvider> {
        match &self.snapshot {
            Some(path) => Ok(SnapshotProvider::load(path)?),
            None => Ok(SnapshotProvider::builtin()),
        }
    }

    /// Build the pipeline.
    pub fn pipeline(&self) -> Result<CliPipeline> {
        Ok(Pipeline::keyword(
            &self.registry()?,
            self.provider()?,
            self.config.pipeline.clone(),
        )?)
    }
}

/// Read article text from `--text`, `--file` or stdin.
pub fn read_text(input: &TextInput) -> Result<String> {
    let text = match (&input.text, &input.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("Article text is empty".to_string()));
    }
    Ok(text)
}
