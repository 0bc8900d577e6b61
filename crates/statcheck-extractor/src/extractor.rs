//! Keyword extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::lexicon::{Cue, Lexicon};
use crate::parser::{has_year_over_year, scan_dates, scan_magnitudes, window_from};
use crate::tokenize::{sentences, tokens, truncate};
use statcheck_domain::traits::ClaimExtractor;
use statcheck_domain::{Claim, ClaimId, ClaimKey, Magnitude, TimeWindow};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info, warn};

/// Extracts claims by dictionary matching over sentence tokens
///
/// A claim needs a metric keyword and a direction cue within
/// `token_window` tokens of each other in the same sentence. Metric
/// keywords that share one cue ("월세와 전세가 모두 올랐다") become one claim.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    lexicon: Lexicon,
    config: ExtractorConfig,
}

/// Metric occurrences attached to one cue token
struct CueGroup<'a> {
    cue: &'a Cue,
    metric_positions: Vec<usize>,
    metrics: BTreeSet<String>,
    surfaces: BTreeSet<String>,
}

impl KeywordExtractor {
    /// Create an extractor, validating the configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate()?;
        let lexicon = Lexicon::with_extras(&config.extra_metrics, &config.extra_subjects);
        Ok(Self { lexicon, config })
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Nearest cue to `position` within the window; ties prefer the later token
    fn nearest_cue(&self, tokens: &[&str], position: usize) -> Option<(usize, &Cue)> {
        let window = self.config.token_window;
        let lo = position.saturating_sub(window);
        let hi = (position + window).min(tokens.len().saturating_sub(1));

        (lo..=hi)
            .filter_map(|j| self.lexicon.cue_in(tokens[j]).map(|cue| (j, cue)))
            .min_by_key(|(j, _)| (j.abs_diff(position), *j < position))
    }

    fn sentence_claims(&self, sentence: &str, source_url: &str) -> Vec<Claim> {
        let tokens = tokens(sentence);

        let mut groups: BTreeMap<usize, CueGroup<'_>> = BTreeMap::new();
        for (i, token) in tokens.iter().enumerate() {
            let Some(metric) = self.lexicon.metric_in(token) else {
                continue;
            };
            let Some((cue_idx, cue)) = self.nearest_cue(&tokens, i) else {
                debug!("No direction cue near '{}'", metric.surface);
                continue;
            };
            let group = groups.entry(cue_idx).or_insert_with(|| CueGroup {
                cue,
                metric_positions: Vec::new(),
                metrics: BTreeSet::new(),
                surfaces: BTreeSet::from([cue.surface.clone()]),
            });
            group.metric_positions.push(i);
            group.metrics.insert(metric.canonical.clone());
            group.surfaces.insert(metric.surface.clone());
        }
        if groups.is_empty() {
            return Vec::new();
        }

        let mut subjects = BTreeSet::new();
        let mut subject_surfaces = BTreeSet::new();
        for token in &tokens {
            if let Some(subject) = self.lexicon.subject_in(token) {
                subjects.insert(subject.canonical.clone());
                subject_surfaces.insert(subject.surface.clone());
            }
        }

        let window = window_from(&scan_dates(&tokens), has_year_over_year(sentence));
        let magnitudes = scan_magnitudes(&tokens);

        groups
            .into_iter()
            .map(|(cue_idx, group)| {
                let magnitude = self.nearest_magnitude(&magnitudes, &group, cue_idx);
                let mut surface_terms = group.surfaces;
                surface_terms.extend(subject_surfaces.iter().cloned());
                build_claim(
                    sentence,
                    source_url,
                    subjects.clone(),
                    group.metrics,
                    group.cue,
                    magnitude,
                    window,
                    surface_terms,
                )
            })
            .collect()
    }

    /// Magnitude within the window of a grouped metric, closest to the cue
    fn nearest_magnitude(
        &self,
        magnitudes: &[(usize, Magnitude)],
        group: &CueGroup<'_>,
        cue_idx: usize,
    ) -> Option<Magnitude> {
        let window = self.config.token_window;
        magnitudes
            .iter()
            .filter(|(pos, _)| {
                group
                    .metric_positions
                    .iter()
                    .any(|m| pos.abs_diff(*m) <= window)
            })
            .min_by_key(|(pos, _)| (pos.abs_diff(cue_idx), *pos))
            .map(|(_, magnitude)| magnitude.clone())
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self {
            lexicon: Lexicon::default(),
            config: ExtractorConfig::default(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn build_claim(
    sentence: &str,
    source_url: &str,
    subject_keywords: BTreeSet<String>,
    metric_keywords: BTreeSet<String>,
    cue: &Cue,
    asserted_magnitude: Option<Magnitude>,
    time_window: TimeWindow,
    surface_terms: BTreeSet<String>,
) -> Claim {
    let key = ClaimKey {
        subject_keywords,
        metric_keywords,
        time_window,
    };
    Claim {
        id: ClaimId::derive(source_url, &key.fingerprint()),
        raw_text: sentence.to_string(),
        subject_keywords: key.subject_keywords,
        metric_keywords: key.metric_keywords,
        asserted_direction: cue.direction,
        asserted_magnitude,
        time_window,
        source_url: source_url.to_string(),
        surface_terms,
        emphatic: cue.emphatic,
    }
}

/// Merge a claim into the list, folding duplicates into the first occurrence
fn merge(claims: &mut Vec<Claim>, index: &mut HashMap<ClaimKey, usize>, claim: Claim) {
    let key = claim.key();
    match index.get(&key) {
        Some(&at) => {
            let existing = &mut claims[at];
            existing.surface_terms.extend(claim.surface_terms);
            if existing.asserted_magnitude.is_none() {
                existing.asserted_magnitude = claim.asserted_magnitude;
            }
        }
        None => {
            index.insert(key, claims.len());
            claims.push(claim);
        }
    }
}

impl ClaimExtractor for KeywordExtractor {
    fn extract(&self, article_text: &str, source_url: &str) -> Vec<Claim> {
        let (text, truncated) = truncate(article_text, self.config.max_text_length);
        if truncated {
            warn!(
                "Article {} exceeds {} characters, truncating",
                source_url, self.config.max_text_length
            );
        }

        let mut claims = Vec::new();
        let mut index = HashMap::new();
        for sentence in sentences(text) {
            for claim in self.sentence_claims(sentence, source_url) {
                debug!(
                    "Claim {}: {} {} window {}",
                    claim.id,
                    claim.label(),
                    claim.asserted_direction,
                    claim.time_window
                );
                merge(&mut claims, &mut index, claim);
            }
        }

        info!("Extracted {} claims from {}", claims.len(), source_url);
        claims
    }
}
