//! Seller insights.
//!
//! Everything here is synchronous, in-memory and free of I/O apart from the
//! caches held by [`ad_copy::AdCopyGenerator`], [`catalog::MockMarketplace`]
//! and [`competitor::CompetitorTracker`].

pub mod ad_copy;
pub mod campaign;
pub mod catalog;
pub mod competitor;
pub mod forecast;
pub mod pricing;

pub use ad_copy::{AdCopyError, AdCopyGenerator};
pub use catalog::{MockMarketplace, SearchQuery};
pub use competitor::{CompetitorSeries, CompetitorTracker, TrackError};
pub use pricing::{LinearPriceModel, PriceAdvisor, PriceRecommendation, PricingStrategy};
