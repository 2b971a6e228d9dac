//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::marketplace::MarketplaceClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: GatewayConfig,
    marketplace: MarketplaceClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        let marketplace = MarketplaceClient::new(&config);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                marketplace,
            }),
        }
    }

    /// Get a reference to the gateway configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    /// Get a reference to the marketplace client.
    #[must_use]
    pub fn marketplace(&self) -> &MarketplaceClient {
        &self.inner.marketplace
    }
}
