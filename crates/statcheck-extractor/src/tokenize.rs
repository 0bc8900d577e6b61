//! Sentence and token splitting

/// Truncate text to at most `max_chars` characters on a char boundary
///
/// Returns the (possibly shortened) text and whether it was cut.
pub fn truncate(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}

/// Split text into sentences
///
/// Sentences end at `!`, `?`, `。` and newlines. A `.` ends a sentence only
/// when followed by whitespace or the end of text, so decimals ("1.5조원") and
/// dotted dates ("2023.01") stay intact.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let boundary = match c {
            '!' | '?' | '。' | '\n' => true,
            '.' => chars.peek().map_or(true, |(_, next)| next.is_whitespace()),
            _ => false,
        };
        if boundary {
            let end = idx + c.len_utf8();
            push_trimmed(&mut result, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut result, &text[start..]);
    result
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, sentence: &'a str) {
    let trimmed = sentence.trim();
    if !trimmed.is_empty() {
        out.push(trimmed);
    }
}

/// Split a sentence into whitespace-separated tokens
pub fn tokens(sentence: &str) -> Vec<&str> {
    sentence.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_boundaries() {
        let text = "월세가 50% 올랐다. 전세는 줄었다!\n정말일까?";
        assert_eq!(
            sentences(text),
            vec!["월세가 50% 올랐다.", "전세는 줄었다!", "정말일까?"]
        );
    }

    #[test]
    fn test_decimal_and_dotted_date_stay_in_sentence() {
        let text = "2023.01 이후 가계부채는 1.5조원 늘었다.";
        assert_eq!(sentences(text).len(), 1);
    }

    #[test]
    fn test_empty_text() {
        assert!(sentences("").is_empty());
        assert!(sentences("  \n\n ").is_empty());
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        let (cut, truncated) = truncate("월세상승", 2);
        assert_eq!(cut, "월세");
        assert!(truncated);

        let (whole, truncated) = truncate("월세", 10);
        assert_eq!(whole, "월세");
        assert!(!truncated);
    }

    #[test]
    fn test_tokens() {
        assert_eq!(tokens("서울  아파트 월세가\t올랐다"), vec!["서울", "아파트", "월세가", "올랐다"]);
    }
}
