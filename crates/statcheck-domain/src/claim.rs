//! Claim module - a checkable statistical assertion

use crate::magnitude::{Direction, Magnitude};
use crate::window::TimeWindow;
use std::collections::BTreeSet;
use std::fmt;

/// Unique identifier for a claim based on UUIDv5
///
/// The id is derived from the article URL and the claim's dedupe key, so
/// re-running extraction over the same article yields the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId(u128);

impl ClaimId {
    /// Derive an id from a source URL and a claim key
    ///
    /// # Examples
    ///
    /// ```
    /// use statcheck_domain::ClaimId;
    ///
    /// let a = ClaimId::derive("https://news.example/1", "rent|seoul");
    /// let b = ClaimId::derive("https://news.example/1", "rent|seoul");
    /// assert_eq!(a, b);
    /// ```
    pub fn derive(source_url: &str, key: &str) -> Self {
        let name = format!("{}#{}", source_url, key);
        Self(uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_URL, name.as_bytes()).as_u128())
    }

    /// Create a ClaimId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ClaimId from its hyphenated string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid claim id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Identity of a claim within one article
///
/// Two occurrences with the same key are the same claim and get merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClaimKey {
    /// Canonical subject keywords
    pub subject_keywords: BTreeSet<String>,
    /// Canonical metric keywords
    pub metric_keywords: BTreeSet<String>,
    /// Claimed time window
    pub time_window: TimeWindow,
}

impl ClaimKey {
    /// Stable textual form, used to derive the [`ClaimId`]
    pub fn fingerprint(&self) -> String {
        let join = |set: &BTreeSet<String>| set.iter().cloned().collect::<Vec<_>>().join(",");
        format!(
            "{}|{}|{}",
            join(&self.subject_keywords),
            join(&self.metric_keywords),
            self.time_window
        )
    }
}

/// A statistical claim extracted from one article
///
/// Claims are immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Deterministic identifier
    pub id: ClaimId,

    /// Sentence the claim was extracted from
    pub raw_text: String,

    /// Canonical subject keywords (e.g. "seoul", "apartment")
    pub subject_keywords: BTreeSet<String>,

    /// Canonical metric keywords (e.g. "rent", "property-tax")
    pub metric_keywords: BTreeSet<String>,

    /// Direction the article asserts
    pub asserted_direction: Direction,

    /// Size of the change the article asserts, if any
    pub asserted_magnitude: Option<Magnitude>,

    /// Period the claim talks about; either bound may be open
    pub time_window: TimeWindow,

    /// Article the claim came from
    pub source_url: String,

    /// Matched words as written in the article
    pub surface_terms: BTreeSet<String>,

    /// The direction cue was an intensified word ("폭등", "급증", ...)
    pub emphatic: bool,
}

impl Claim {
    /// The key used for merging duplicates within an article
    pub fn key(&self) -> ClaimKey {
        ClaimKey {
            subject_keywords: self.subject_keywords.clone(),
            metric_keywords: self.metric_keywords.clone(),
            time_window: self.time_window,
        }
    }

    /// Union of subject and metric keywords
    pub fn keywords(&self) -> BTreeSet<&str> {
        self.subject_keywords
            .iter()
            .chain(self.metric_keywords.iter())
            .map(String::as_str)
            .collect()
    }

    /// Short human label, e.g. "rent (seoul)"
    pub fn label(&self) -> String {
        let metric = self
            .metric_keywords
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join("+");
        if self.subject_keywords.is_empty() {
            metric
        } else {
            let subject = self
                .subject_keywords
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(",");
            format!("{} ({})", metric, subject)
        }
    }
}
