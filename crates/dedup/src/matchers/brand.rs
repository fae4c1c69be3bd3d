//! Brand-relationship matcher.
//!
//! The most intricate stage of the cascade: detects generic-vs-brand and
//! brand-vs-brand relationships within the same product category. Two
//! interchangeable strategies sit behind one trait, selected at engine
//! construction — the orchestrator is agnostic to which is active.

use std::sync::Arc;

use async_trait::async_trait;

use crate::classify::{BrandClassifier, BrandDetection, PatternDetector, GENERIC_CATEGORY};
use crate::normalize::NormalizedName;
use crate::outcome::MatchOutcome;
use crate::taxonomy::CategoryTaxonomy;

/// Generic-in-one / brand-in-other confidence.
const GENERIC_BRAND_CONFIDENCE: f64 = 0.85;

/// Different brands under the same generic category.
const BRAND_BRAND_CONFIDENCE: f64 = 0.75;

/// Brand-relationship detection behind one interface.
///
/// Implementations must be total: any failure of an external collaborator is
/// absorbed internally and never reaches the caller.
#[async_trait]
pub trait BrandMatcher: Send + Sync {
    async fn brand_match(&self, a: &NormalizedName, b: &NormalizedName) -> MatchOutcome;
}

/// Static lookup-table strategy: scans the taxonomy's generic → brands
/// entries for substring signals.
pub struct StaticBrandMatcher {
    taxonomy: Arc<CategoryTaxonomy>,
}

impl StaticBrandMatcher {
    pub fn new(taxonomy: Arc<CategoryTaxonomy>) -> Self {
        Self { taxonomy }
    }
}

#[async_trait]
impl BrandMatcher for StaticBrandMatcher {
    async fn brand_match(&self, a: &NormalizedName, b: &NormalizedName) -> MatchOutcome {
        for (generic, brands) in self.taxonomy.brand_entries() {
            let a_has_generic = a.as_str().contains(generic.as_str());
            let b_has_generic = b.as_str().contains(generic.as_str());
            let a_brand = brands.iter().find(|brand| a.as_str().contains(brand.as_str()));
            let b_brand = brands.iter().find(|brand| b.as_str().contains(brand.as_str()));

            if a_has_generic {
                if let Some(brand) = b_brand {
                    return MatchOutcome::matched(
                        GENERIC_BRAND_CONFIDENCE,
                        format!("'{brand}' is a brand of {generic}"),
                    );
                }
            }

            if b_has_generic {
                if let Some(brand) = a_brand {
                    return MatchOutcome::matched(
                        GENERIC_BRAND_CONFIDENCE,
                        format!("'{brand}' is a brand of {generic}"),
                    );
                }
            }

            if let (Some(brand_a), Some(brand_b)) = (a_brand, b_brand) {
                if brand_a != brand_b {
                    return MatchOutcome::matched(
                        BRAND_BRAND_CONFIDENCE,
                        format!("'{brand_a}' and '{brand_b}' are both {generic} brands"),
                    );
                }
            }
        }

        MatchOutcome::no_match()
    }
}

/// Classifier-assisted strategy.
///
/// Consults an external brand-detection service per name; on any failure it
/// logs a warning and degrades silently to the local pattern table. Transport
/// failures never propagate.
pub struct ClassifierBrandMatcher {
    classifier: Arc<dyn BrandClassifier>,
    fallback: PatternDetector,
}

impl ClassifierBrandMatcher {
    pub fn new(classifier: Arc<dyn BrandClassifier>, fallback: PatternDetector) -> Self {
        Self {
            classifier,
            fallback,
        }
    }

    async fn detect(&self, name: &NormalizedName) -> BrandDetection {
        match self.classifier.classify(name.as_str()).await {
            Ok(detection) => detection,
            Err(error) => {
                tracing::warn!(
                    product_name = %name,
                    %error,
                    "brand classifier unavailable, using local pattern fallback"
                );
                self.fallback.detect(name.as_str())
            }
        }
    }
}

#[async_trait]
impl BrandMatcher for ClassifierBrandMatcher {
    async fn brand_match(&self, a: &NormalizedName, b: &NormalizedName) -> MatchOutcome {
        let detection_a = self.detect(a).await;
        let detection_b = self.detect(b).await;
        relate_detections(&detection_a, &detection_b)
    }
}

/// Combine two detection results into a match outcome.
fn relate_detections(a: &BrandDetection, b: &BrandDetection) -> MatchOutcome {
    // Generic terms of one side intersect the other side's category/generic
    // terms while the other side carries a brand.
    if let Some((generic, brand)) = generic_against_brand(a, b) {
        return MatchOutcome::matched(
            GENERIC_BRAND_CONFIDENCE,
            format!("'{brand}' is a brand of {generic}"),
        );
    }
    if let Some((generic, brand)) = generic_against_brand(b, a) {
        return MatchOutcome::matched(
            GENERIC_BRAND_CONFIDENCE,
            format!("'{brand}' is a brand of {generic}"),
        );
    }

    // Two distinct brands sharing a non-generic category.
    if a.has_brand() && b.has_brand() && a.category == b.category && a.category != GENERIC_CATEGORY
    {
        if let (Some(brand_a), Some(brand_b)) = (a.detected_brands.first(), b.detected_brands.first())
        {
            if brand_a != brand_b {
                return MatchOutcome::matched(
                    BRAND_BRAND_CONFIDENCE,
                    format!("'{brand_a}' and '{brand_b}' are both {} brands", a.category),
                );
            }
        }
    }

    MatchOutcome::no_match()
}

fn generic_against_brand(
    generic_side: &BrandDetection,
    brand_side: &BrandDetection,
) -> Option<(String, String)> {
    let brand = brand_side.detected_brands.first()?;

    for generic in &generic_side.generic_terms {
        if brand_side.category == *generic || brand_side.generic_terms.contains(generic) {
            return Some((generic.clone(), brand.clone()));
        }
    }

    None
}
