//! Ad copy generation.
//!
//! Picks one of a few fixed templates at random. Results are memoized per
//! (product name, keywords) pair for five minutes, so asking twice in a row
//! returns the same line.

use std::time::Duration;

use moka::future::Cache;
use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

/// Maximum memoized (name, keywords) pairs.
const CACHE_CAPACITY: u64 = 100;

/// How long a generated line is reused.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Rejected ad copy request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdCopyError {
    #[error("Please enter a product name")]
    MissingProductName,
    #[error("Please enter target keywords")]
    MissingKeywords,
}

type Template = fn(&str, &str, &str) -> String;

const TEMPLATES: [Template; 3] = [
    |name, keywords, marketplace| {
        format!("🔥 HOT DEAL! {name} - Best {keywords} on {marketplace}! Free Shipping!")
    },
    |name, keywords, _| format!("Amazing {name} - Perfect for {keywords}. Buy now and save!"),
    |name, keywords, _| format!("Special offer: {name} - Top quality {keywords} at lowest prices!"),
];

/// Render a random template.
///
/// Both `product_name` and `keywords` appear verbatim in the output.
pub fn render_ad_copy(
    rng: &mut impl Rng,
    product_name: &str,
    keywords: &str,
    marketplace: &str,
) -> String {
    TEMPLATES
        .choose(rng)
        .map_or_else(String::new, |template| {
            template(product_name, keywords, marketplace)
        })
}

/// Memoizing ad copy generator.
#[derive(Clone)]
pub struct AdCopyGenerator {
    marketplace: String,
    cache: Cache<(String, String), String>,
}

impl AdCopyGenerator {
    #[must_use]
    pub fn new(marketplace: impl Into<String>) -> Self {
        Self {
            marketplace: marketplace.into(),
            cache: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    /// Generate (or recall) ad copy for a product.
    ///
    /// # Errors
    ///
    /// Returns [`AdCopyError`] if either input is blank.
    ///
    /// Inputs are rendered and cached exactly as given; blank checks ignore
    /// surrounding whitespace.
    pub async fn generate(
        &self,
        product_name: &str,
        keywords: &str,
    ) -> Result<String, AdCopyError> {
        if product_name.trim().is_empty() {
            return Err(AdCopyError::MissingProductName);
        }
        if keywords.trim().is_empty() {
            return Err(AdCopyError::MissingKeywords);
        }

        let fresh = render_ad_copy(&mut rand::rng(), product_name, keywords, &self.marketplace);
        let copy = self
            .cache
            .get_with(
                (product_name.to_owned(), keywords.to_owned()),
                async move { fresh },
            )
            .await;

        tracing::debug!(product = product_name, keywords, "Generated ad copy");
        Ok(copy)
    }
}
