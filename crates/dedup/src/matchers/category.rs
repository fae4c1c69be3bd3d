//! Same-category relationship matcher.

use crate::normalize::NormalizedName;
use crate::outcome::MatchOutcome;
use crate::taxonomy::CategoryTaxonomy;

/// Weak signal: both names contain (different) member terms of the same
/// broad category, e.g. "milk" and "yogurt" under "dairy".
pub fn category_match(
    taxonomy: &CategoryTaxonomy,
    a: &NormalizedName,
    b: &NormalizedName,
) -> MatchOutcome {
    for (category, members) in taxonomy.category_entries() {
        let term_a = members.iter().find(|m| a.as_str().contains(m.as_str()));
        let term_b = members.iter().find(|m| b.as_str().contains(m.as_str()));

        if let (Some(term_a), Some(term_b)) = (term_a, term_b) {
            if term_a != term_b {
                return MatchOutcome::matched(
                    0.6,
                    format!("both appear to be {category} items ({term_a} vs {term_b})"),
                );
            }
        }
    }

    MatchOutcome::no_match()
}
