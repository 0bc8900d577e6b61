//! Grouping articles that report the same story

/// Character similarity of two titles in [0, 1]
///
/// `2·M / (|a| + |b|)` where M is the length of the longest common
/// subsequence of characters. Two empty titles score 0.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }

    let mut row = vec![0usize; b.len() + 1];
    for ca in &a {
        let mut diagonal = 0;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }

    2.0 * row[b.len()] as f64 / total as f64
}

/// Group titles by similarity to each group's first member
///
/// Returns groups of indices in input order; each group starts with its
/// leader. A title joins the first earlier leader it is more than
/// `threshold` similar to. Empty titles always stand alone.
pub fn group_by_title<S: AsRef<str>>(titles: &[S], threshold: f64) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (i, title) in titles.iter().enumerate() {
        let title = title.as_ref().trim();
        let joined = !title.is_empty()
            && groups.iter_mut().any(|group| {
                let leader = titles[group[0]].as_ref().trim();
                if !leader.is_empty() && title_similarity(leader, title) > threshold {
                    group.push(i);
                    true
                } else {
                    false
                }
            });
        if !joined {
            groups.push(vec![i]);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_titles() {
        assert_eq!(title_similarity("월세 폭등", "월세 폭등"), 1.0);
    }

    #[test]
    fn test_disjoint_titles() {
        assert_eq!(title_similarity("abc", "xyz"), 0.0);
        assert_eq!(title_similarity("", ""), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // LCS "bcd" = 3, total 8
        assert!((title_similarity("abcd", "bcde") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_grouping_keeps_first_as_leader() {
        let titles = [
            "서울 월세 1년새 폭등",
            "종부세 폭탄 현실화",
            "서울 월세 1년새 또 폭등",
            "",
            "",
        ];
        let groups = group_by_title(&titles, 0.6);
        assert_eq!(groups, vec![vec![0, 2], vec![1], vec![3], vec![4]]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let groups = group_by_title(&["abcd", "bcde"], 0.75);
        assert_eq!(groups.len(), 2);
        let groups = group_by_title(&["abcd", "bcde"], 0.7);
        assert_eq!(groups.len(), 1);
    }
}
