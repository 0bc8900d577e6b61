//! Articles and where they come from

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A news article to check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Canonical URL; also the namespace for claim ids
    pub url: String,
    /// Headline; may be empty
    #[serde(default)]
    pub title: String,
    /// Body text
    pub text: String,
}

impl Article {
    /// Create an article
    pub fn new(url: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Supplies the articles for one batch run
pub trait ArticleSource {
    /// Fetch the current set of articles
    fn fetch_articles(&self) -> Result<Vec<Article>, PipelineError>;
}

impl ArticleSource for Vec<Article> {
    fn fetch_articles(&self) -> Result<Vec<Article>, PipelineError> {
        Ok(self.clone())
    }
}

/// A JSON file holding an array of articles, re-read on every fetch
#[derive(Debug, Clone)]
pub struct JsonArticleFile {
    path: PathBuf,
}

impl JsonArticleFile {
    /// Point at a file; it is not read until the first fetch
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a JSON array of articles
    pub fn parse(json: &str) -> Result<Vec<Article>, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl ArticleSource for JsonArticleFile {
    fn fetch_articles(&self) -> Result<Vec<Article>, PipelineError> {
        Self::parse(&std::fs::read_to_string(&self.path)?)
    }
}
