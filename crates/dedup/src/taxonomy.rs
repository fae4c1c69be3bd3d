//! Category taxonomy tables.
//!
//! Two read-only tables drive the brand and category matchers: generic term →
//! known brand names ("cereal" → "cheerios", "frosted flakes", …) and broad
//! category → member generic terms ("dairy" → "milk", "cheese", …). A
//! taxonomy is built once at engine construction and never mutated; separate
//! engine instances can hold independently configured taxonomies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Generic-term and category lookup tables.
///
/// `BTreeMap` keeps iteration deterministic, which in turn keeps match
/// reasons and first-signal selection deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTaxonomy {
    brands_by_generic: BTreeMap<String, Vec<String>>,
    generics_by_category: BTreeMap<String, Vec<String>>,
}

impl CategoryTaxonomy {
    /// An empty taxonomy. Construction is total: any static table is valid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register brands for a generic term. Entries are lowercased; repeated
    /// calls extend the brand list in insertion order.
    pub fn with_brands(mut self, generic: &str, brands: &[&str]) -> Self {
        let entry = self
            .brands_by_generic
            .entry(generic.to_lowercase())
            .or_default();
        for brand in brands {
            let brand = brand.to_lowercase();
            if !entry.contains(&brand) {
                entry.push(brand);
            }
        }
        self
    }

    /// Register member generic terms for a broad category.
    pub fn with_category(mut self, category: &str, generics: &[&str]) -> Self {
        let entry = self
            .generics_by_category
            .entry(category.to_lowercase())
            .or_default();
        for generic in generics {
            let generic = generic.to_lowercase();
            if !entry.contains(&generic) {
                entry.push(generic);
            }
        }
        self
    }

    /// (generic term, brand list) entries in deterministic order.
    pub fn brand_entries(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.brands_by_generic.iter()
    }

    /// (category, member generic terms) entries in deterministic order.
    pub fn category_entries(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.generics_by_category.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.brands_by_generic.is_empty() && self.generics_by_category.is_empty()
    }

    /// The seeded grocery taxonomy used by default.
    ///
    /// Covers the eight categories the local classifier fallback must handle
    /// (cookies, cereal, soda, chips, cheese, detergent, dish soap, soap)
    /// plus common store-aisle groupings.
    pub fn builtin() -> Self {
        Self::new()
            .with_brands(
                "cereal",
                &[
                    "cheerios",
                    "frosted flakes",
                    "lucky charms",
                    "froot loops",
                    "raisin bran",
                    "special k",
                ],
            )
            .with_brands(
                "cookies",
                &["oreo", "chips ahoy", "milano", "nutter butter", "fig newtons"],
            )
            .with_brands(
                "soda",
                &["coke", "coca-cola", "pepsi", "sprite", "dr pepper", "mountain dew"],
            )
            .with_brands(
                "chips",
                &["lays", "doritos", "pringles", "ruffles", "tostitos", "fritos"],
            )
            .with_brands(
                "cheese",
                &["kraft", "cracker barrel", "tillamook", "babybel", "velveeta"],
            )
            .with_brands("detergent", &["tide", "gain", "persil", "purex", "arm & hammer"])
            .with_brands("dish soap", &["dawn", "palmolive", "ajax"])
            .with_brands("soap", &["dove", "irish spring", "dial", "ivory"])
            .with_category("dairy", &["milk", "cheese", "yogurt", "butter", "cream"])
            .with_category(
                "produce",
                &["apple", "banana", "lettuce", "tomato", "onion", "carrot"],
            )
            .with_category("bakery", &["bread", "bagel", "muffin", "croissant"])
            .with_category("beverages", &["soda", "juice", "coffee", "tea", "water"])
            .with_category(
                "snacks",
                &["chips", "cookies", "crackers", "popcorn", "pretzels"],
            )
            .with_category(
                "cleaning",
                &["detergent", "dish soap", "soap", "bleach", "sponges"],
            )
    }
}
