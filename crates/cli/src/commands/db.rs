//! Product store commands.
//!
//! # Usage
//!
//! ```bash
//! seller-pro db init
//! seller-pro db seed --random 20 --keyword headphones
//! ```

use seller_pro_core::ProductId;
use seller_pro_dashboard::db::PortfolioRepository;
use seller_pro_dashboard::services::catalog::{generate_product, sample_catalog};

use super::{CommandError, connect};

/// First id given to generated products, clear of the sample catalog.
const GENERATED_ID_BASE: i32 = 2000;

/// Create the product tables.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
pub async fn init() -> Result<(), CommandError> {
    // Opening a pool creates the schema
    connect().await?;
    tracing::info!("Product store ready");
    Ok(())
}

/// Load the sample catalog plus `random` generated products.
///
/// Existing rows with the same ids are overwritten, so seeding twice is
/// harmless.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or a write fails.
pub async fn seed(random: u32, keyword: &str) -> Result<(), CommandError> {
    let pool = connect().await?;
    let repo = PortfolioRepository::new(&pool);

    let mut products = sample_catalog();
    {
        let mut rng = rand::rng();
        products.extend((0..random).zip(GENERATED_ID_BASE..).map(|(index, id)| {
            let mut product = generate_product(&mut rng, index, keyword);
            product.id = ProductId::new(id);
            product
        }));
    }

    for product in &products {
        repo.upsert_catalog_product(product).await?;
    }

    tracing::info!(count = products.len(), "Seeded product store");
    Ok(())
}
