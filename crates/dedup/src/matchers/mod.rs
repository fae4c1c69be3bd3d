//! Matcher stages of the duplicate-detection cascade.
//!
//! Every matcher is total: for any two (possibly empty) normalized names it
//! returns a valid [`MatchOutcome`](crate::outcome::MatchOutcome) and never
//! panics.

pub mod brand;
pub mod category;
pub mod exact;
pub mod fuzzy;
