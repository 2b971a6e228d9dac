//! Competitor price tracking.
//!
//! Each tracked product id owns a series of simulated competitor samples.
//! The first observation is drawn from fixed ranges; every later one
//! perturbs the previous sample. Ratings are clamped to [3.0, 5.0]; prices
//! follow an unclamped multiplicative walk.

use std::collections::VecDeque;
use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SEED_PRICE: RangeInclusive<f64> = 20.0..=30.0;
const SEED_RATING: RangeInclusive<f64> = 4.0..=4.8;
const PRICE_STEP: RangeInclusive<f64> = 0.95..=1.05;
const RATING_STEP: RangeInclusive<f64> = -0.1..=0.1;

/// Lowest rating a competitor can drift to.
pub const MIN_RATING: f64 = 3.0;
/// Highest rating a competitor can drift to.
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    #[error("Enter a product ID to monitor")]
    EmptyProductId,
}

/// One observation of a competitor listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorSample {
    pub price: f64,
    pub rating: f64,
    pub observed_at: DateTime<Utc>,
}

impl CompetitorSample {
    fn seed(rng: &mut impl Rng, now: DateTime<Utc>) -> Self {
        Self {
            price: rng.random_range(SEED_PRICE),
            rating: rng.random_range(SEED_RATING),
            observed_at: now,
        }
    }

    fn next(&self, rng: &mut impl Rng, now: DateTime<Utc>) -> Self {
        Self {
            price: self.price * rng.random_range(PRICE_STEP),
            rating: (self.rating + rng.random_range(RATING_STEP)).clamp(MIN_RATING, MAX_RATING),
            observed_at: now,
        }
    }
}

/// Observation history for one product, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorSeries {
    pub product_id: String,
    pub samples: VecDeque<CompetitorSample>,
}

impl CompetitorSeries {
    /// Prices in observation order.
    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.price)
    }

    /// Ratings in observation order.
    pub fn ratings(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.rating)
    }

    /// Most recent observation.
    #[must_use]
    pub fn latest(&self) -> Option<&CompetitorSample> {
        self.samples.back()
    }

    fn push(&mut self, sample: CompetitorSample, limit: Option<usize>) {
        self.samples.push_back(sample);
        if let Some(limit) = limit {
            while self.samples.len() > limit.max(1) {
                self.samples.pop_front();
            }
        }
    }
}

/// Process-wide competitor tracker, shared by every session.
#[derive(Debug, Clone, Default)]
pub struct CompetitorTracker {
    series: Arc<DashMap<String, CompetitorSeries>>,
    history_limit: Option<usize>,
}

impl CompetitorTracker {
    /// Create a tracker keeping at most `history_limit` samples per product.
    #[must_use]
    pub fn new(history_limit: Option<usize>) -> Self {
        Self {
            series: Arc::new(DashMap::new()),
            history_limit,
        }
    }

    /// Record a new observation and return the full series.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::EmptyProductId`] for a blank id.
    pub fn track(&self, product_id: &str) -> Result<CompetitorSeries, TrackError> {
        self.track_with(product_id, &mut rand::rng(), Utc::now())
    }

    /// [`Self::track`] with an explicit random source and clock.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::EmptyProductId`] for a blank id.
    pub fn track_with(
        &self,
        product_id: &str,
        rng: &mut impl Rng,
        now: DateTime<Utc>,
    ) -> Result<CompetitorSeries, TrackError> {
        let key = product_id.trim();
        if key.is_empty() {
            return Err(TrackError::EmptyProductId);
        }

        let series = match self.series.entry(key.to_owned()) {
            Entry::Occupied(mut entry) => {
                let series = entry.get_mut();
                let sample = match series.latest() {
                    Some(last) => last.next(rng, now),
                    None => CompetitorSample::seed(rng, now),
                };
                series.push(sample, self.history_limit);
                series.clone()
            }
            Entry::Vacant(entry) => {
                let mut series = CompetitorSeries {
                    product_id: key.to_owned(),
                    samples: VecDeque::new(),
                };
                series.push(CompetitorSample::seed(rng, now), self.history_limit);
                entry.insert(series).value().clone()
            }
        };

        tracing::debug!(
            product_id = key,
            samples = series.samples.len(),
            "Tracked competitor"
        );
        Ok(series)
    }

    /// Current series for a product without recording a new sample.
    #[cfg(test)]
    pub(crate) fn history(&self, product_id: &str) -> Option<CompetitorSeries> {
        self.series.get(product_id.trim()).map(|s| s.value().clone())
    }

    /// Number of products being tracked.
    #[cfg(test)]
    pub(crate) fn tracked_products(&self) -> usize {
        self.series.len()
    }
}
