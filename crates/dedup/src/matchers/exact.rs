//! Exact string equality with plural folding.

use crate::normalize::NormalizedName;
use crate::outcome::MatchOutcome;

/// Compare two normalized names for (near-)verbatim equality.
///
/// Verbatim equality scores 1.0; equality after plural folding scores 0.95.
pub fn exact_match(a: &NormalizedName, b: &NormalizedName) -> MatchOutcome {
    if a == b {
        return MatchOutcome::matched(1.0, "exact match");
    }

    if fold_plural(a.as_str()) == fold_plural(b.as_str()) {
        return MatchOutcome::matched(0.95, "exact match accounting for plurals");
    }

    MatchOutcome::no_match()
}

/// Heuristic plural folding: trailing "ies" → "y", trailing "s" dropped when
/// not preceded by another "s".
///
/// Brand-style "-os" endings (cheerios, doritos) are not plurals and are left
/// alone. No irregular-plural handling.
fn fold_plural(s: &str) -> String {
    if let Some(stem) = s.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }

    if let Some(stem) = s.strip_suffix('s') {
        if !stem.is_empty() && !stem.ends_with('s') && !stem.ends_with('o') {
            return stem.to_string();
        }
    }

    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn verbatim_equality_scores_one() {
        let outcome = exact_match(&normalize("milk"), &normalize("Milk"));
        assert!(outcome.is_match);
        assert_eq!(outcome.confidence, 1.0);
        assert_eq!(outcome.reason, "exact match");
    }

    #[test]
    fn simple_plural_scores_095() {
        let outcome = exact_match(&normalize("apples"), &normalize("apple"));
        assert!(outcome.is_match);
        assert_eq!(outcome.confidence, 0.95);
        assert_eq!(outcome.reason, "exact match accounting for plurals");
    }

    #[test]
    fn ies_plural_folds_to_y() {
        let outcome = exact_match(&normalize("berries"), &normalize("berry"));
        assert!(outcome.is_match);
        assert_eq!(outcome.confidence, 0.95);
    }

    #[test]
    fn brand_style_os_ending_is_not_a_plural() {
        let outcome = exact_match(&normalize("cheerios"), &normalize("cheerio"));
        assert!(!outcome.is_match);
        assert_eq!(outcome.confidence, 0.0);
    }

    #[test]
    fn double_s_is_not_folded() {
        let outcome = exact_match(&normalize("grass"), &normalize("gras"));
        assert!(!outcome.is_match);
    }

    #[test]
    fn unrelated_names_do_not_match() {
        let outcome = exact_match(&normalize("milk"), &normalize("bread"));
        assert!(!outcome.is_match);
    }

    #[test]
    fn empty_names_are_verbatim_equal() {
        let outcome = exact_match(&normalize(""), &normalize(""));
        assert!(outcome.is_match);
        assert_eq!(outcome.confidence, 1.0);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Exact match is reflexive with confidence 1.0 for any input.
            #[test]
            fn exact_match_is_reflexive(raw in "\\PC{0,60}") {
                let name = normalize(&raw);
                let outcome = exact_match(&name, &name);
                prop_assert!(outcome.is_match);
                prop_assert_eq!(outcome.confidence, 1.0);
            }

            #[test]
            fn exact_match_is_symmetric(a in "\\PC{0,40}", b in "\\PC{0,40}") {
                let (a, b) = (normalize(&a), normalize(&b));
                let ab = exact_match(&a, &b);
                let ba = exact_match(&b, &a);
                prop_assert_eq!(ab.is_match, ba.is_match);
                prop_assert_eq!(ab.confidence, ba.confidence);
            }
        }
    }
}
