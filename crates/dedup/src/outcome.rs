//! Matcher outcomes and engine decisions.

use serde::{Deserialize, Serialize};

use listwise_core::ListItem;

/// Result of a single matcher stage.
///
/// Constructed fresh on every matcher call, never shared between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub is_match: bool,
    /// Strength of the duplicate signal in \[0, 1\]; 0 when no match.
    pub confidence: f64,
    /// Human-readable explanation of the signal.
    pub reason: String,
}

impl MatchOutcome {
    pub fn matched(confidence: f64, reason: impl Into<String>) -> Self {
        Self {
            is_match: true,
            confidence,
            reason: reason.into(),
        }
    }

    pub fn no_match() -> Self {
        Self {
            is_match: false,
            confidence: 0.0,
            reason: String::new(),
        }
    }
}

/// What the caller should do with the candidate item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestedAction {
    /// Treat as the same item; do not add.
    Reject,
    /// Likely related; offer consolidation.
    Merge,
    /// Keep both; low-confidence signal.
    Allow,
}

/// Read access to the product name of a caller-supplied item record.
///
/// The engine only ever reads the name; the rest of the record passes through
/// opaquely and is returned unchanged in the decision.
pub trait ProductNamed: Clone {
    fn product_name(&self) -> &str;
}

impl ProductNamed for ListItem {
    fn product_name(&self) -> &str {
        &self.product_name
    }
}

impl ProductNamed for String {
    fn product_name(&self) -> &str {
        self
    }
}

/// The engine's sole output type. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateDecision<I> {
    pub is_duplicate: bool,
    pub confidence: f64,
    pub reason: String,
    /// The matched existing item, passed through unchanged.
    pub existing_item: Option<I>,
    pub suggested_action: SuggestedAction,
}

impl<I> DuplicateDecision<I> {
    /// The safe default: nothing matched, the caller may add the item.
    pub fn not_duplicate() -> Self {
        Self {
            is_duplicate: false,
            confidence: 0.0,
            reason: "no duplicates found".to_string(),
            existing_item: None,
            suggested_action: SuggestedAction::Allow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_has_zero_confidence() {
        let outcome = MatchOutcome::no_match();
        assert!(!outcome.is_match);
        assert_eq!(outcome.confidence, 0.0);
    }

    #[test]
    fn not_duplicate_is_the_safe_default() {
        let decision: DuplicateDecision<ListItem> = DuplicateDecision::not_duplicate();
        assert!(!decision.is_duplicate);
        assert_eq!(decision.suggested_action, SuggestedAction::Allow);
        assert_eq!(decision.reason, "no duplicates found");
        assert!(decision.existing_item.is_none());
    }

    #[test]
    fn suggested_action_serializes_lowercase() {
        let json = serde_json::to_string(&SuggestedAction::Reject).unwrap();
        assert_eq!(json, "\"reject\"");
    }
}
