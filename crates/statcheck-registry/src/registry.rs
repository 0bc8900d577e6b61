//! Immutable in-memory registry

use crate::builtin::builtin_entries;
use crate::config::RegistryFile;
use crate::error::RegistryError;
use statcheck_domain::traits::SeriesRegistry;
use statcheck_domain::SeriesMeta;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Registry backed by a fixed list of series
///
/// Cloning is cheap; all clones share the same catalogue.
#[derive(Debug, Clone)]
pub struct StaticRegistry {
    series: Arc<[SeriesMeta]>,
}

impl StaticRegistry {
    /// Create a registry from metadata, rejecting duplicate ids
    pub fn new(series: Vec<SeriesMeta>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for meta in &series {
            if !seen.insert(meta.id.as_str()) {
                return Err(RegistryError::DuplicateId(meta.id.clone()));
            }
        }
        Ok(Self {
            series: series.into(),
        })
    }

    /// The built-in catalogue of Korean housing and household-finance series
    pub fn builtin() -> Self {
        Self {
            series: builtin_entries().into(),
        }
    }

    /// Build a registry from a parsed registry file
    pub fn from_file_contents(file: RegistryFile) -> Result<Self, RegistryError> {
        let series = file
            .series
            .into_iter()
            .map(|entry| entry.into_meta())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(series)
    }

    /// Parse a registry from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, RegistryError> {
        Self::from_file_contents(RegistryFile::from_toml(toml_str)?)
    }

    /// Load a registry from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let registry = Self::from_toml(&contents)?;
        info!(
            "Loaded {} series from registry file {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Look up a series by id
    pub fn get(&self, id: &str) -> Option<&SeriesMeta> {
        self.series.iter().find(|s| s.id == id)
    }

    /// Borrow all series
    pub fn series(&self) -> &[SeriesMeta] {
        &self.series
    }

    /// Number of series
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True when the registry holds no series
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl SeriesRegistry for StaticRegistry {
    fn list_series(&self) -> Vec<SeriesMeta> {
        self.series.to_vec()
    }
}
