//! Edit-distance-based last-resort matcher.

use crate::normalize::NormalizedName;
use crate::outcome::MatchOutcome;

/// Similarity above which the cascade treats the names as a near-certain
/// duplicate (reject tier).
pub const REJECT_THRESHOLD: f64 = 0.9;

/// Similarity above which the names count as a match at all.
pub const MATCH_THRESHOLD: f64 = 0.7;

/// Normalized edit-distance comparison.
///
/// `similarity = (max_len - levenshtein) / max_len`, with 1.0 when both
/// names are empty. Matches carry the similarity itself as confidence.
pub fn similarity_match(a: &NormalizedName, b: &NormalizedName) -> MatchOutcome {
    let score = similarity(a.as_str(), b.as_str());

    if score > MATCH_THRESHOLD {
        let percent = (score * 100.0).round();
        return MatchOutcome::matched(score, format!("very similar product names ({percent}% similar)"));
    }

    MatchOutcome::no_match()
}

/// Normalized similarity in \[0, 1\].
pub fn similarity(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let max_len = len_a.max(len_b);

    if max_len == 0 {
        return 1.0;
    }

    (max_len - levenshtein(a, b)) as f64 / max_len as f64
}

/// Standard dynamic-programming edit distance over chars: insert, delete and
/// substitute all cost 1; no transposition discount.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        core::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
