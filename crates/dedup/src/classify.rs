//! External brand-classifier boundary and its local fallback.
//!
//! The classifier-assisted brand strategy talks to a remote brand-detection
//! service over HTTP. Any transport, status or decode failure is treated as
//! "classifier absent" and the caller degrades to [`PatternDetector`]; the
//! failure never reaches the engine's own caller.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::taxonomy::CategoryTaxonomy;

/// Category label used when nothing is detected.
pub const GENERIC_CATEGORY: &str = "generic";

/// Detected brand signals for one normalized product name.
///
/// Derived data, never persisted. Doubles as the classifier wire response
/// (`{detectedBrands, genericTerms, category}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandDetection {
    pub detected_brands: Vec<String>,
    pub generic_terms: Vec<String>,
    pub category: String,
}

impl BrandDetection {
    /// Detection with no signals at all.
    pub fn generic() -> Self {
        Self {
            detected_brands: Vec::new(),
            generic_terms: Vec::new(),
            category: GENERIC_CATEGORY.to_string(),
        }
    }

    pub fn has_brand(&self) -> bool {
        !self.detected_brands.is_empty()
    }
}

/// Request body for the remote classifier (`{productName}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    pub product_name: String,
}

/// Failure while consulting the remote classifier.
///
/// Internal to the brand strategy: callers of the engine never see these.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Network-level failure, including timeouts.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status.
    #[error("classifier returned status {0}")]
    Status(u16),

    /// Response body did not match the wire contract.
    #[error("could not decode classifier response: {0}")]
    Decode(String),
}

/// External brand-detection capability.
#[async_trait]
pub trait BrandClassifier: Send + Sync {
    async fn classify(&self, product_name: &str) -> Result<BrandDetection, ClassifierError>;
}

/// HTTP client for a remote brand-detection service.
///
/// The request is bounded by a client-wide timeout so a slow classifier can
/// never stall a duplicate check indefinitely.
pub struct HttpBrandClassifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBrandClassifier {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClassifierError> {
        Self::with_timeout(endpoint, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl BrandClassifier for HttpBrandClassifier {
    async fn classify(&self, product_name: &str) -> Result<BrandDetection, ClassifierError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest {
                product_name: product_name.to_string(),
            })
            .send()
            .await
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClassifierError::Status(response.status().as_u16()));
        }

        response
            .json::<BrandDetection>()
            .await
            .map_err(|e| ClassifierError::Decode(e.to_string()))
    }
}

/// Local keyword-pattern detector used when the remote classifier is absent.
///
/// A static table of (pattern, category) and (pattern, generic-term) pairs
/// evaluated against the lowercased name. Built from the same taxonomy tables
/// as the static brand strategy, so both detection paths agree on the seeded
/// category set.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    /// (brand keyword, owning generic category).
    brand_patterns: Vec<(String, String)>,
    /// (generic keyword, generic term).
    generic_patterns: Vec<(String, String)>,
}

impl PatternDetector {
    pub fn from_taxonomy(taxonomy: &CategoryTaxonomy) -> Self {
        let mut brand_patterns = Vec::new();
        let mut generic_patterns = Vec::new();

        for (generic, brands) in taxonomy.brand_entries() {
            generic_patterns.push((generic.clone(), generic.clone()));
            for brand in brands {
                brand_patterns.push((brand.clone(), generic.clone()));
            }
        }

        Self {
            brand_patterns,
            generic_patterns,
        }
    }

    /// Detect brands and generic terms by case-insensitive containment.
    /// Total: unknown names come back as [`BrandDetection::generic`].
    pub fn detect(&self, product_name: &str) -> BrandDetection {
        let name = product_name.to_lowercase();
        let mut detection = BrandDetection::generic();

        for (pattern, category) in &self.brand_patterns {
            if name.contains(pattern.as_str()) {
                detection.detected_brands.push(pattern.clone());
                if detection.category == GENERIC_CATEGORY {
                    detection.category = category.clone();
                }
            }
        }

        for (pattern, generic) in &self.generic_patterns {
            if name.contains(pattern.as_str()) {
                detection.generic_terms.push(generic.clone());
                if detection.category == GENERIC_CATEGORY {
                    detection.category = generic.clone();
                }
            }
        }

        detection
    }
}
