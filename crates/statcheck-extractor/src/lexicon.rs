//! Keyword vocabulary for claim extraction
//!
//! Korean news text attaches particles and endings to words ("월세가",
//! "상승했다"), so a term matches any token that contains its surface form.
//! When several terms match one token the longest surface form wins.

use statcheck_domain::Direction;
use std::collections::BTreeMap;

/// A surface form and the canonical keyword it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Form as written in articles
    pub surface: String,
    /// Canonical keyword shared with the series registry
    pub canonical: String,
}

/// A direction cue word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Form as written in articles
    pub surface: String,
    /// Direction the word asserts
    pub direction: Direction,
    /// Intensified wording ("폭등", "급감", ...)
    pub emphatic: bool,
}

const METRICS: &[(&str, &str)] = &[
    ("월세", "rent"),
    ("임대료", "rent"),
    ("전세", "jeonse"),
    ("전월세", "rental"),
    ("종부세", "property-tax"),
    ("종합부동산세", "property-tax"),
    ("보유세", "property-tax"),
    ("금리", "interest-rate"),
    ("주택담보대출", "mortgage"),
    ("주담대", "mortgage"),
    ("가계부채", "household-debt"),
    ("가계대출", "household-debt"),
    ("가계빚", "household-debt"),
    ("집값", "house-price"),
    ("주택가격", "house-price"),
    ("아파트값", "house-price"),
    ("매매가", "house-price"),
    ("물가", "consumer-prices"),
    ("소비자물가", "consumer-prices"),
    ("실업률", "unemployment"),
    ("고용률", "employment"),
    ("세수", "tax-revenue"),
];

const SUBJECTS: &[(&str, &str)] = &[
    ("서울", "seoul"),
    ("수도권", "capital-region"),
    ("전국", "nationwide"),
    ("지방", "provinces"),
    ("강남", "gangnam"),
    ("아파트", "apartment"),
    ("주택", "housing"),
    ("가계", "household"),
    ("청년", "youth"),
    ("다주택자", "multi-homeowner"),
];

const UP: &[&str] = &["상승", "증가", "올랐", "오른", "오름", "늘어", "늘었", "인상", "확대"];
const SHARP_UP: &[&str] = &["폭등", "급등", "폭증", "급증", "급상승", "치솟"];
const DOWN: &[&str] = &["하락", "감소", "내렸", "내린", "내림", "줄어", "줄었", "인하", "축소"];
const SHARP_DOWN: &[&str] = &["폭락", "급락", "급감", "급하락", "곤두박질"];

/// The vocabulary the extractor scans for
#[derive(Debug, Clone)]
pub struct Lexicon {
    metrics: Vec<Term>,
    subjects: Vec<Term>,
    cues: Vec<Cue>,
}

fn terms(pairs: impl IntoIterator<Item = (String, String)>) -> Vec<Term> {
    pairs
        .into_iter()
        .map(|(surface, canonical)| Term {
            surface,
            canonical: canonical.trim().to_lowercase(),
        })
        .collect()
}

fn owned<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Iterator<Item = (String, String)> + 'a {
    pairs.iter().map(|(s, c)| (s.to_string(), c.to_string()))
}

fn longest<'a, T>(items: &'a [T], token: &str, surface: impl Fn(&T) -> &str) -> Option<&'a T> {
    items
        .iter()
        .filter(|item| token.contains(surface(item)))
        .max_by_key(|item| surface(item).chars().count())
}

impl Lexicon {
    /// Built-in vocabulary extended with extra terms
    pub fn with_extras(
        extra_metrics: &BTreeMap<String, String>,
        extra_subjects: &BTreeMap<String, String>,
    ) -> Self {
        let metrics = terms(owned(METRICS).chain(extra_metrics.clone()));
        let subjects = terms(owned(SUBJECTS).chain(extra_subjects.clone()));

        let cue = |surface: &&str, direction, emphatic| Cue {
            surface: surface.to_string(),
            direction,
            emphatic,
        };
        let cues = UP
            .iter()
            .map(|s| cue(s, Direction::Up, false))
            .chain(SHARP_UP.iter().map(|s| cue(s, Direction::Up, true)))
            .chain(DOWN.iter().map(|s| cue(s, Direction::Down, false)))
            .chain(SHARP_DOWN.iter().map(|s| cue(s, Direction::Down, true)))
            .collect();

        Self {
            metrics,
            subjects,
            cues,
        }
    }

    /// Metric term contained in a token, if any
    pub fn metric_in(&self, token: &str) -> Option<&Term> {
        longest(&self.metrics, token, |t| &t.surface)
    }

    /// Subject term contained in a token, if any
    pub fn subject_in(&self, token: &str) -> Option<&Term> {
        longest(&self.subjects, token, |t| &t.surface)
    }

    /// Direction cue contained in a token, if any
    pub fn cue_in(&self, token: &str) -> Option<&Cue> {
        longest(&self.cues, token, |c| &c.surface)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::with_extras(&BTreeMap::new(), &BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_with_particle() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.metric_in("월세가").unwrap().canonical, "rent");
        assert_eq!(lexicon.metric_in("종부세는").unwrap().canonical, "property-tax");
        assert!(lexicon.metric_in("사람들").is_none());
    }

    #[test]
    fn test_longest_surface_wins() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.metric_in("전월세").unwrap().canonical, "rental");
        assert_eq!(lexicon.metric_in("소비자물가가").unwrap().surface, "소비자물가");
        assert_eq!(lexicon.subject_in("다주택자의").unwrap().canonical, "multi-homeowner");
    }

    #[test]
    fn test_cues() {
        let lexicon = Lexicon::default();
        let up = lexicon.cue_in("상승했다").unwrap();
        assert_eq!(up.direction, Direction::Up);
        assert!(!up.emphatic);

        let sharp = lexicon.cue_in("급상승한").unwrap();
        assert_eq!(sharp.direction, Direction::Up);
        assert!(sharp.emphatic);

        let down = lexicon.cue_in("폭락했다").unwrap();
        assert_eq!(down.direction, Direction::Down);
        assert!(down.emphatic);

        assert!(lexicon.cue_in("발표했다").is_none());
    }

    #[test]
    fn test_extra_terms() {
        let mut extra = BTreeMap::new();
        extra.insert("전세가율".to_string(), "Jeonse-Ratio".to_string());
        let lexicon = Lexicon::with_extras(&extra, &BTreeMap::new());
        assert_eq!(lexicon.metric_in("전세가율이").unwrap().canonical, "jeonse-ratio");
    }
}
