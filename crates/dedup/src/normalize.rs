//! Product-name normalization.
//!
//! Canonicalizes raw user input before any matcher runs: lowercase, strip
//! descriptive modifiers, size/quantity tokens and store-brand prefixes,
//! collapse whitespace. Normalization never fails and is idempotent:
//! `normalize(normalize(x)) == normalize(x)` for any input.

use serde::{Deserialize, Serialize};

use listwise_core::ValueObject;

/// Descriptive modifiers removed as whole words.
const MODIFIER_WORDS: &[&str] = &[
    "organic",
    "fresh",
    "premium",
    "select",
    "choice",
    "natural",
    "free-range",
    "cage-free",
];

/// Size/quantity unit vocabulary. A number immediately followed by one of
/// these (same token or the next token) is stripped.
const UNIT_WORDS: &[&str] = &[
    "oz", "lb", "g", "kg", "ml", "l", "count", "ct", "pk", "pack", "gallon", "quart", "pint",
];

/// Store-brand prefixes removed wherever they appear as whole phrases.
const STORE_BRAND_PREFIXES: &[&str] = &[
    "great value",
    "market pantry",
    "good & gather",
    "kroger brand",
    "simple truth",
];

/// Canonical form of a product name.
///
/// Only [`normalize`] constructs these, so holding a `NormalizedName` means
/// the cleanup pipeline has already run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedName(String);

impl NormalizedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl ValueObject for NormalizedName {}

/// Canonicalize a raw product-name string.
///
/// The raw value is never mutated; an empty input yields an empty name.
pub fn normalize(raw: &str) -> NormalizedName {
    let mut current = raw.trim().to_lowercase();

    // Run the removal passes to a fixpoint: prefix removal can make a number
    // and a unit adjacent again (e.g. "1 great value oz"), and idempotence
    // must hold for any input.
    loop {
        let next = removal_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }

    NormalizedName(current)
}

/// One pass of modifier, size and store-brand removal plus whitespace
/// collapse. Order matters: later steps assume earlier cleanup.
fn removal_pass(s: &str) -> String {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let mut kept: Vec<&str> = Vec::with_capacity(tokens.len());

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];

        if MODIFIER_WORDS.contains(&token) {
            i += 1;
            continue;
        }

        // "1 gallon" / "2 ct" — number token followed by a unit token.
        if is_number(token) {
            if let Some(next) = tokens.get(i + 1) {
                if is_unit(next) {
                    i += 2;
                    continue;
                }
            }
        }

        // "12oz" / "1.5l" / "2%" — number and unit fused into one token.
        if is_fused_size(token) {
            i += 1;
            continue;
        }

        kept.push(token);
        i += 1;
    }

    let joined = kept.join(" ");
    let stripped = strip_store_prefixes(&joined);

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_number(token: &str) -> bool {
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in token.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

fn is_unit(token: &str) -> bool {
    if UNIT_WORDS.contains(&token) {
        return true;
    }
    // Tolerate pluralized units ("lbs", "gallons").
    match token.strip_suffix('s') {
        Some(stem) if stem.len() >= 2 => UNIT_WORDS.contains(&stem),
        _ => false,
    }
}

/// A numeric prefix fused with a unit or a percent sign ("12oz", "2%").
/// Percentages ("2% milk") count as quantity qualifiers.
fn is_fused_size(token: &str) -> bool {
    let split = token
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit() && *c != '.')
        .map(|(idx, _)| idx);

    let Some(idx) = split else { return false };
    if idx == 0 {
        return false;
    }

    let (number, rest) = token.split_at(idx);
    is_number(number) && (rest == "%" || is_unit(rest))
}

fn strip_store_prefixes(s: &str) -> String {
    let mut current = format!(" {s} ");
    loop {
        let mut next = current.clone();
        for prefix in STORE_BRAND_PREFIXES {
            next = next.replace(&format!(" {prefix} "), " ");
        }
        if next == current {
            break;
        }
        current = next;
    }
    current.trim().to_string()
}
