//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::DashboardConfig;
use crate::services::{AdCopyGenerator, CompetitorTracker, MockMarketplace};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the product store, the process-wide services and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    pool: SqlitePool,
    marketplace: MockMarketplace,
    ad_copy: AdCopyGenerator,
    competitors: CompetitorTracker,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Dashboard configuration
    /// * `pool` - `SQLite` connection pool for the product store
    #[must_use]
    pub fn new(config: DashboardConfig, pool: SqlitePool) -> Self {
        let ad_copy = AdCopyGenerator::new(config.marketplace_name.clone());
        let competitors = CompetitorTracker::new(config.competitor_history_limit);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                marketplace: MockMarketplace::new(),
                ad_copy,
                competitors,
            }),
        }
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the mock marketplace.
    #[must_use]
    pub fn marketplace(&self) -> &MockMarketplace {
        &self.inner.marketplace
    }

    /// Get a reference to the ad copy generator.
    #[must_use]
    pub fn ad_copy(&self) -> &AdCopyGenerator {
        &self.inner.ad_copy
    }

    /// Get a reference to the competitor tracker.
    #[must_use]
    pub fn competitors(&self) -> &CompetitorTracker {
        &self.inner.competitors
    }
}
