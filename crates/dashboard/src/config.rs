//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `DASHBOARD_DATABASE_URL` - `SQLite` URL for saved products
//!   (falls back to `DATABASE_URL`, then `sqlite://seller_pro.db`)
//! - `DASHBOARD_HOST` - Bind address (default: 127.0.0.1)
//! - `DASHBOARD_PORT` - Listen port (default: 8501)
//! - `DASHBOARD_BASE_URL` - Public URL (default: `http://localhost:8501`)
//! - `PRICING_STRATEGY` - `regression` or `category-average` (default: regression)
//! - `COMPETITOR_HISTORY_LIMIT` - Samples kept per tracked product, `0` for
//!   no limit (default: 1000)
//! - `MARKETPLACE_NAME` - Marketplace named in generated ad copy (default: Daraz)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

use crate::services::pricing::PricingStrategy;

/// Default number of competitor samples retained per product.
pub const DEFAULT_COMPETITOR_HISTORY_LIMIT: usize = 1000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// `SQLite` database URL for the local product store
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the dashboard
    pub base_url: String,
    /// How price recommendations are computed
    pub pricing_strategy: PricingStrategy,
    /// Maximum competitor samples per product (`None` keeps everything)
    pub competitor_history_limit: Option<usize>,
    /// Marketplace name used in ad copy
    pub marketplace_name: String,
    /// Emit JSON logs instead of text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("DASHBOARD_DATABASE_URL");
        let host = parse_env("DASHBOARD_HOST", "127.0.0.1")?;
        let port = parse_env("DASHBOARD_PORT", "8501")?;
        let base_url = get_env_or_default("DASHBOARD_BASE_URL", "http://localhost:8501");
        let pricing_strategy = parse_env("PRICING_STRATEGY", "regression")?;
        let limit: usize = parse_env(
            "COMPETITOR_HISTORY_LIMIT",
            &DEFAULT_COMPETITOR_HISTORY_LIMIT.to_string(),
        )?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            pricing_strategy,
            competitor_history_limit: (limit > 0).then_some(limit),
            marketplace_name: get_env_or_default("MARKETPLACE_NAME", "Daraz"),
            log_json: get_optional_env("LOG_FORMAT")
                .is_some_and(|f| f.eq_ignore_ascii_case("json")),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies must be marked `Secure`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl Default for DashboardConfig {
    /// Local development defaults with an in-memory database.
    fn default() -> Self {
        Self {
            database_url: SecretString::from("sqlite::memory:"),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8501,
            base_url: "http://localhost:8501".to_string(),
            pricing_strategy: PricingStrategy::default(),
            competitor_history_limit: Some(DEFAULT_COMPETITOR_HISTORY_LIMIT),
            marketplace_name: "Daraz".to_string(),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> SecretString {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_or_else(
            |_| SecretString::from("sqlite://seller_pro.db"),
            SecretString::from,
        )
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to a default literal.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
