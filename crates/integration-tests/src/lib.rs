//! Integration tests for Seller Pro.
//!
//! Each test spawns the real routers on an ephemeral local port and talks
//! to them over HTTP with `reqwest`, cookies included. The dashboard runs
//! against an in-memory `SQLite` store; the gateway runs against a fake
//! marketplace served the same way.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p seller-pro-integration-tests
//! ```

use std::net::SocketAddr;

use axum::Router;
use reqwest::Client;
use reqwest::redirect::Policy;
use secrecy::SecretString;
use sqlx::SqlitePool;
use url::Url;

use seller_pro_dashboard::config::DashboardConfig;
use seller_pro_dashboard::db::{PortfolioRepository, create_pool};
use seller_pro_dashboard::services::catalog::sample_catalog;
use seller_pro_gateway::config::GatewayConfig;

/// Serve `router` on `127.0.0.1:0` and return its base URL.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr: SocketAddr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server error");
    });

    format!("http://{addr}")
}

/// A running dashboard plus direct access to its store.
pub struct DashboardContext {
    pub base_url: String,
    pub pool: SqlitePool,
}

impl DashboardContext {
    /// Start a dashboard seeded with the sample catalog.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be created or seeded.
    pub async fn start() -> Self {
        Self::start_with(DashboardConfig::default()).await
    }

    /// Start a dashboard with custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be created or seeded.
    pub async fn start_with(config: DashboardConfig) -> Self {
        let pool = create_pool(&SecretString::from("sqlite::memory:"))
            .await
            .expect("Failed to create test pool");

        let repo = PortfolioRepository::new(&pool);
        for product in sample_catalog() {
            repo.upsert_catalog_product(&product)
                .await
                .expect("Failed to seed catalog");
        }

        let state = seller_pro_dashboard::state::AppState::new(config, pool.clone());
        let base_url = spawn(seller_pro_dashboard::app(state)).await;

        Self { base_url, pool }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A client that keeps cookies and does not follow redirects.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client() -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }

    /// A fresh client already logged in as `email`.
    ///
    /// # Panics
    ///
    /// Panics if the login request fails.
    pub async fn login(&self, email: &str) -> Client {
        let client = Self::client();
        let resp = client
            .post(self.url("/login"))
            .form(&[("email", email), ("password", "password")])
            .send()
            .await
            .expect("Failed to log in");
        assert!(resp.status().is_redirection(), "login status {}", resp.status());
        client
    }
}

/// Gateway configuration pointing at `upstream`.
///
/// # Panics
///
/// Panics if `upstream` is not a valid URL.
#[must_use]
pub fn gateway_config(upstream: &str) -> GatewayConfig {
    GatewayConfig {
        api_base_url: Url::parse(upstream).expect("Invalid upstream URL"),
        api_key: SecretString::from("test-api-key"),
        user_id: "seller-77".to_string(),
        host: [127, 0, 0, 1].into(),
        port: 0,
        log_json: false,
        sentry_dsn: None,
        sentry_environment: None,
    }
}
