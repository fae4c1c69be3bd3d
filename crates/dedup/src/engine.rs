//! Decision orchestration: the duplicate-check cascade.

use std::sync::Arc;

use crate::classify::{BrandClassifier, PatternDetector};
use crate::matchers::brand::{BrandMatcher, ClassifierBrandMatcher, StaticBrandMatcher};
use crate::matchers::{category, exact, fuzzy};
use crate::normalize::normalize;
use crate::outcome::{DuplicateDecision, MatchOutcome, ProductNamed, SuggestedAction};
use crate::taxonomy::CategoryTaxonomy;

/// The duplicate product detection engine.
///
/// Stateless per call: the only shared state is the read-only taxonomy, so
/// concurrent `check_for_duplicate` calls need no locking. The brand strategy
/// is chosen at construction and hidden behind [`BrandMatcher`].
pub struct DuplicateChecker {
    taxonomy: Arc<CategoryTaxonomy>,
    brand: Box<dyn BrandMatcher>,
}

impl DuplicateChecker {
    /// Engine with the static brand-lookup strategy.
    pub fn new(taxonomy: CategoryTaxonomy) -> Self {
        let taxonomy = Arc::new(taxonomy);
        let brand = Box::new(StaticBrandMatcher::new(Arc::clone(&taxonomy)));
        Self { taxonomy, brand }
    }

    /// Engine with the seeded grocery taxonomy and the static strategy.
    pub fn builtin() -> Self {
        Self::new(CategoryTaxonomy::builtin())
    }

    /// Engine with the classifier-assisted brand strategy.
    ///
    /// Classifier failures degrade silently to a pattern table derived from
    /// the same taxonomy, so both strategies agree on the seeded categories.
    pub fn with_classifier(
        taxonomy: CategoryTaxonomy,
        classifier: Arc<dyn BrandClassifier>,
    ) -> Self {
        let taxonomy = Arc::new(taxonomy);
        let fallback = PatternDetector::from_taxonomy(&taxonomy);
        let brand = Box::new(ClassifierBrandMatcher::new(classifier, fallback));
        Self { taxonomy, brand }
    }

    pub fn taxonomy(&self) -> &CategoryTaxonomy {
        &self.taxonomy
    }

    /// Decide whether `new_name` duplicates one of `existing_items`.
    ///
    /// Normalizes the candidate once, then runs the fixed cascade per
    /// existing item in caller order: exact → brand → category → fuzzy. The
    /// first positive signal wins (not the strongest one) — caller item order
    /// deliberately affects the outcome. If nothing fires, the decision is
    /// the safe "no duplicates found" default.
    pub async fn check_for_duplicate<I: ProductNamed>(
        &self,
        new_name: &str,
        existing_items: &[I],
    ) -> DuplicateDecision<I> {
        let candidate = normalize(new_name);

        for item in existing_items {
            let existing = normalize(item.product_name());

            let outcome = exact::exact_match(&candidate, &existing);
            if outcome.is_match {
                return Self::decision(outcome, SuggestedAction::Reject, item);
            }

            let outcome = self.brand.brand_match(&candidate, &existing).await;
            if outcome.is_match {
                let action = if outcome.confidence > 0.8 {
                    SuggestedAction::Reject
                } else {
                    SuggestedAction::Merge
                };
                return Self::decision(outcome, action, item);
            }

            let outcome = category::category_match(&self.taxonomy, &candidate, &existing);
            if outcome.is_match {
                return Self::decision(outcome, SuggestedAction::Merge, item);
            }

            let outcome = fuzzy::similarity_match(&candidate, &existing);
            if outcome.is_match {
                let action = if outcome.confidence > fuzzy::REJECT_THRESHOLD {
                    SuggestedAction::Reject
                } else {
                    SuggestedAction::Allow
                };
                return Self::decision(outcome, action, item);
            }
        }

        tracing::debug!(candidate = %candidate, "no duplicate signal");
        DuplicateDecision::not_duplicate()
    }

    fn decision<I: ProductNamed>(
        outcome: MatchOutcome,
        action: SuggestedAction,
        item: &I,
    ) -> DuplicateDecision<I> {
        tracing::debug!(
            confidence = outcome.confidence,
            reason = %outcome.reason,
            action = ?action,
            "duplicate signal"
        );
        DuplicateDecision {
            is_duplicate: true,
            confidence: outcome.confidence,
            reason: outcome.reason,
            existing_item: Some(item.clone()),
            suggested_action: action,
        }
    }
}

/// Fixed human-readable guidance for a decision.
///
/// Pure: keyed only on the suggested action and whether the confidence
/// clears 0.5.
pub fn suggestions<I>(decision: &DuplicateDecision<I>) -> Vec<String> {
    match decision.suggested_action {
        SuggestedAction::Reject => vec![
            "This item already appears to be on your list.".to_string(),
            "Consider updating the quantity of the existing item instead.".to_string(),
        ],
        SuggestedAction::Merge => {
            let mut lines = vec!["A closely related item is already on your list.".to_string()];
            if decision.confidence > 0.5 {
                lines.push("Consider merging it with the existing item.".to_string());
            } else {
                lines.push("Double-check the existing item before adding.".to_string());
            }
            lines
        }
        SuggestedAction::Allow => {
            if decision.confidence > 0.5 {
                vec!["A loosely similar item is on your list; adding both is probably fine.".to_string()]
            } else {
                vec!["No similar items found; safe to add.".to_string()]
            }
        }
    }
}
