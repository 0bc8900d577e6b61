//! Number, unit and date recognition over sentence tokens

use chrono::{Months, NaiveDate};
use statcheck_domain::{Granularity, Magnitude, MagnitudeUnit, TimeWindow};

/// How a date mention bounds the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The mention is the whole window (or one end of a pair)
    Exact,
    /// "부터" / "이후": the window starts here and stays open
    From,
    /// "까지": the window ends here
    Until,
}

/// A date found in a sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMention {
    /// Token index where the mention starts
    pub position: usize,
    /// First day of the mentioned period
    pub date: NaiveDate,
    /// Yearly for "2023년", monthly for "2023년 1월" / "2023.01"
    pub granularity: Granularity,
    /// Suffix reading
    pub anchor: Anchor,
}

impl DateMention {
    fn first_day(&self) -> NaiveDate {
        self.granularity.period_start(self.date)
    }

    fn last_day(&self) -> NaiveDate {
        self.granularity.period_end(self.date)
    }
}

/// Split a leading decimal number (commas allowed) off a string
fn leading_number(s: &str) -> Option<(f64, &str)> {
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == ',' || *c == '.'))
        .map_or(s.len(), |(i, _)| i);
    let digits = s[..end].trim_end_matches(['.', ',']);
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let value: f64 = digits.replace(',', "").parse().ok()?;
    Some((value, &s[digits.len()..]))
}

fn unit_prefix(rest: &str) -> Option<MagnitudeUnit> {
    const POINT: &[&str] = &["%p", "％p", "%포인트", "퍼센트포인트"];
    const PERCENT: &[&str] = &["%", "％", "퍼센트", "프로"];
    // Longer forms first so "억원" is not read as "억"
    const ABSOLUTE: &[(&str, &str)] = &[
        ("조원", "조원"),
        ("억원", "억원"),
        ("만원", "만원"),
        ("가구", "가구"),
        ("조", "조원"),
        ("억", "억원"),
        ("원", "원"),
        ("명", "명"),
        ("건", "건"),
    ];

    if POINT.iter().any(|p| rest.starts_with(p)) {
        return Some(MagnitudeUnit::PercentPoint);
    }
    if PERCENT.iter().any(|p| rest.starts_with(p)) {
        return Some(MagnitudeUnit::Percent);
    }
    if rest.starts_with('배') {
        return Some(MagnitudeUnit::Times);
    }
    ABSOLUTE
        .iter()
        .find(|(surface, _)| rest.starts_with(surface))
        .map(|(_, unit)| MagnitudeUnit::Absolute(unit.to_string()))
}

/// Read a magnitude starting at a token
///
/// The unit may be attached ("50%") or the following token ("50 %").
pub fn parse_magnitude(token: &str, next: Option<&str>) -> Option<Magnitude> {
    let token = token.trim_start_matches(['(', '[', '"', '\'', '약', '~']);
    let (value, rest) = leading_number(token)?;
    let unit = if rest.is_empty() {
        unit_prefix(next?)?
    } else {
        unit_prefix(rest)?
    };
    Some(Magnitude::new(value, unit))
}

/// All magnitudes in a token sequence, with their token index
pub fn scan_magnitudes(tokens: &[&str]) -> Vec<(usize, Magnitude)> {
    tokens
        .iter()
        .enumerate()
        .filter_map(|(i, token)| {
            parse_magnitude(token, tokens.get(i + 1).copied()).map(|m| (i, m))
        })
        .collect()
}

fn parse_year(digits: &str) -> Option<i32> {
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: i32 = digits.parse().ok()?;
    (1900..=2100).contains(&year).then_some(year)
}

fn parse_month(s: &str) -> Option<(u32, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 || end > 2 {
        return None;
    }
    let month: u32 = s[..end].parse().ok()?;
    (1..=12).contains(&month).then_some((month, &s[end..]))
}

fn anchor_of(suffix: &str) -> Option<Anchor> {
    if suffix.starts_with("부터") || suffix.starts_with("이후") || suffix.starts_with("이래") {
        Some(Anchor::From)
    } else if suffix.starts_with("까지") {
        Some(Anchor::Until)
    } else {
        None
    }
}

/// All dates in a token sequence
///
/// Recognises `2023년`, `2023년 1월`, `2023년1월`, `2023.01`, `2023-01` and
/// `2023/01`, each optionally followed by `부터`, `이후` or `까지`.
pub fn scan_dates(tokens: &[&str]) -> Vec<DateMention> {
    let mut mentions = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i].trim_start_matches(['(', '[', '"', '\'']);
        let start = i;
        i += 1;

        if token.len() < 4 || !token.is_char_boundary(4) {
            continue;
        }
        let Some(year) = parse_year(&token[..4]) else {
            continue;
        };
        let rest = &token[4..];

        let (month, suffix) = if let Some(after_year) = rest.strip_prefix('년') {
            if let Some((month, after)) = parse_month(after_year)
                .and_then(|(m, after)| after.strip_prefix('월').map(|a| (m, a)))
            {
                (Some(month), after)
            } else if after_year.is_empty() {
                // "2023년 1월" spans two tokens
                match tokens.get(i).and_then(|next| {
                    parse_month(next).and_then(|(m, after)| after.strip_prefix('월').map(|a| (m, a)))
                }) {
                    Some((month, after)) => {
                        i += 1;
                        (Some(month), after)
                    }
                    None => (None, after_year),
                }
            } else {
                (None, after_year)
            }
        } else if let Some(after_sep) = rest.strip_prefix(['.', '-', '/']) {
            match parse_month(after_sep) {
                Some((month, after)) => (Some(month), after.trim_start_matches('.')),
                None => continue,
            }
        } else {
            continue;
        };

        let anchor = anchor_of(suffix)
            .or_else(|| {
                if suffix.is_empty() {
                    tokens.get(i).and_then(|next| anchor_of(next))
                } else {
                    None
                }
            })
            .unwrap_or(Anchor::Exact);

        let (date, granularity) = match month {
            Some(m) => (NaiveDate::from_ymd_opt(year, m, 1), Granularity::Monthly),
            None => (NaiveDate::from_ymd_opt(year, 1, 1), Granularity::Yearly),
        };
        if let Some(date) = date {
            mentions.push(DateMention {
                position: start,
                date,
                granularity,
                anchor,
            });
        }
    }
    mentions
}

/// True when the sentence compares against the previous year ("전년 대비")
pub fn has_year_over_year(sentence: &str) -> bool {
    let compact: String = sentence.chars().filter(|c| !c.is_whitespace()).collect();
    ["전년대비", "작년대비", "전년동기대비", "전년동월대비"]
        .iter()
        .any(|marker| compact.contains(marker))
}

/// Build the claimed window from the dates of a sentence
pub fn window_from(mentions: &[DateMention], year_over_year: bool) -> TimeWindow {
    match mentions {
        [] => TimeWindow::open(),
        [only] => match only.anchor {
            Anchor::From => TimeWindow::from(only.first_day()),
            Anchor::Until => TimeWindow::until(only.last_day()),
            Anchor::Exact if year_over_year => {
                let base = only
                    .first_day()
                    .checked_sub_months(Months::new(12))
                    .unwrap_or(NaiveDate::MIN);
                TimeWindow::bounded(base, only.last_day())
            }
            Anchor::Exact => TimeWindow::bounded(only.first_day(), only.last_day()),
        },
        many => {
            let earliest = many.iter().map(DateMention::first_day).min();
            let latest = many.iter().map(DateMention::last_day).max();
            match (earliest, latest) {
                (Some(start), Some(end)) => TimeWindow::bounded(start, end),
                _ => TimeWindow::open(),
            }
        }
    }
}
