//! Database operations for the local product store.
//!
//! # Database: `SQLite`
//!
//! ## Tables
//!
//! - `products` - Catalog products saved by sellers
//! - `user_products` - Links between seller emails and products
//!
//! There are no migrations. Both tables are created with
//! `CREATE TABLE IF NOT EXISTS` whenever a pool is opened. Links carry no
//! foreign key or uniqueness constraint.

pub mod portfolio;

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use portfolio::PortfolioRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

const CREATE_PRODUCTS: &str = r"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY,
        name TEXT,
        price REAL,
        rating REAL,
        sales INTEGER,
        category_id INTEGER
    )
";

const CREATE_USER_PRODUCTS: &str = r"
    CREATE TABLE IF NOT EXISTS user_products (
        id INTEGER PRIMARY KEY,
        user_email TEXT,
        product_id INTEGER
    )
";

/// Create an `SQLite` connection pool and make sure the schema exists.
///
/// File databases are created if missing. `sqlite::memory:` URLs get a
/// single connection so every query sees the same in-memory database.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established or the
/// schema cannot be created.
pub async fn create_pool(database_url: &SecretString) -> Result<SqlitePool, sqlx::Error> {
    let url = database_url.expose_secret();
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let in_memory = url.contains(":memory:") || url.contains("mode=memory");

    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory { 1 } else { 5 })
        .min_connections(1)
        .idle_timeout(if in_memory { None } else { Some(Duration::from_secs(600)) })
        .max_lifetime(if in_memory { None } else { Some(Duration::from_secs(1800)) })
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Create both tables if they do not exist yet.
///
/// # Errors
///
/// Returns `sqlx::Error` if a statement fails.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_PRODUCTS).execute(pool).await?;
    sqlx::query(CREATE_USER_PRODUCTS).execute(pool).await?;
    tracing::debug!("Product store schema ready");
    Ok(())
}
