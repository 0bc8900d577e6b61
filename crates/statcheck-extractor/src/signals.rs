//! Article-level signals used to decide whether an article needs checking

use crate::parser::scan_magnitudes;
use crate::tokenize::tokens;
use serde::{Deserialize, Serialize};

const EXTREME: &[&str] = &[
    "폭증", "급증", "급감", "폭락", "급락", "폭등", "사상최대", "사상최고", "사상최저", "역대최대",
    "역대최고", "역대최저", "기록적", "전례없는", "유례없는",
];

const VAGUE_LEAD: &[&str] = &["것으로", "인", "이"];
const VAGUE_VERB: &[&str] = &["알려졌다", "보인다", "추정된다", "전해졌다"];

const CAUSAL: &[&str] = &["때문에", "탓에", "영향으로", "여파로", "초래", "유발"];

const POLITICAL: &[&str] = &["정부", "정책", "국회", "대통령", "장관", "여당", "야당", "선거", "법안"];
const ECONOMIC: &[&str] = &[
    "경제", "GDP", "성장률", "물가", "금리", "부채", "세금", "월세", "전세", "주택", "실업", "고용",
    "임금", "소득",
];

const TITLE_WORDS: &[&str] = &["증가", "감소", "폭증", "급증", "하락", "최대", "최저", "역대"];

/// What a quick scan of an article turned up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSignals {
    /// Numbers with units in the body ("50%", "1.5조원")
    pub statistic_mentions: usize,
    /// Causal phrasing ("때문에", "여파로")
    pub causal: bool,
    /// Extreme wording found, in lexicon order
    pub extreme_terms: Vec<String>,
    /// Unattributed phrasing ("것으로 알려졌다")
    pub vague_source: bool,
    /// Political or economic topic words
    pub political_economic: bool,
    /// Strong wording in the title
    pub title_keyword: bool,
}

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

impl ArticleSignals {
    /// Scan an article's title and body
    pub fn scan(title: &str, text: &str) -> Self {
        let body = compact(text);
        let full = format!("{} {}", text, title);

        let statistic_mentions = scan_magnitudes(&tokens(text)).len();

        let extreme_terms = EXTREME
            .iter()
            .filter(|term| body.contains(*term))
            .map(|term| term.to_string())
            .collect();

        let vague_source = VAGUE_LEAD.iter().any(|lead| {
            VAGUE_VERB
                .iter()
                .any(|verb| body.contains(&format!("{}{}", lead, verb)))
        });

        Self {
            statistic_mentions,
            causal: CAUSAL.iter().any(|w| body.contains(w)),
            extreme_terms,
            vague_source,
            political_economic: POLITICAL.iter().chain(ECONOMIC).any(|w| full.contains(w)),
            title_keyword: TITLE_WORDS.iter().any(|w| title.contains(w)),
        }
    }

    /// True when any extreme wording was found
    pub fn extreme(&self) -> bool {
        !self.extreme_terms.is_empty()
    }
}
