//! CLI command implementations.

pub mod db;
pub mod portfolio;

use sqlx::SqlitePool;
use thiserror::Error;

use seller_pro_core::EmailError;
use seller_pro_dashboard::config::{ConfigError, DashboardConfig};
use seller_pro_dashboard::db::{RepositoryError, create_pool};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error("Store error: {0}")]
    Repository(#[from] RepositoryError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Open the product store named by the dashboard configuration.
async fn connect() -> Result<SqlitePool, CommandError> {
    let config = DashboardConfig::from_env()?;
    tracing::info!("Connecting to product store...");
    Ok(create_pool(&config.database_url).await?)
}
