//! `listwise-dedup` — duplicate product detection engine.
//!
//! Given a newly entered product name and the items already on a shopping
//! list, decide whether the new item is the same real-world product as an
//! existing one, a brand/generic variant of it, a loosely related category
//! item, or genuinely distinct — and recommend an action (reject, merge,
//! allow).
//!
//! The engine runs a fixed cascade per existing item, first positive signal
//! wins: exact match → brand relationship → category relationship → fuzzy
//! similarity. It has no fatal error class: the worst-case output is a
//! low-confidence "no duplicates found", which defers to the user.

pub mod classify;
pub mod engine;
pub mod matchers;
pub mod normalize;
pub mod outcome;
pub mod taxonomy;

pub use classify::{
    BrandClassifier, BrandDetection, ClassifierError, ClassifyRequest, HttpBrandClassifier,
    PatternDetector,
};
pub use engine::{suggestions, DuplicateChecker};
pub use matchers::brand::{BrandMatcher, ClassifierBrandMatcher, StaticBrandMatcher};
pub use normalize::{normalize, NormalizedName};
pub use outcome::{DuplicateDecision, MatchOutcome, ProductNamed, SuggestedAction};
pub use taxonomy::CategoryTaxonomy;
