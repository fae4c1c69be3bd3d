//! The shopping-list item record.
//!
//! This is the caller-side record handed to the duplicate-detection engine:
//! the engine only ever reads `product_name`; every other field passes
//! through opaquely and comes back unchanged in the decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ItemId;

/// A single entry on a shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: ItemId,
    /// Raw product name as the user entered it (never normalized in place).
    pub product_name: String,
    pub quantity: u32,
    pub note: Option<String>,
    pub checked: bool,
    pub added_at: DateTime<Utc>,
}

impl ListItem {
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            product_name: product_name.into(),
            quantity: 1,
            note: None,
            checked: false,
            added_at: Utc::now(),
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_defaults() {
        let item = ListItem::new("Milk");
        assert_eq!(item.product_name, "Milk");
        assert_eq!(item.quantity, 1);
        assert!(item.note.is_none());
        assert!(!item.checked);
    }

    #[test]
    fn builder_helpers() {
        let item = ListItem::new("Eggs").with_quantity(2).with_note("free range if possible");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.note.as_deref(), Some("free range if possible"));
    }
}
