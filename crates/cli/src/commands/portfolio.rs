//! Seller portfolio commands.
//!
//! # Usage
//!
//! ```bash
//! seller-pro portfolio link -e seller@example.com -p 1003
//! seller-pro portfolio add -e seller@example.com -n "Desk Lamp" --price 12.5 -c Fashion
//! seller-pro portfolio list -e seller@example.com
//! ```

use seller_pro_core::{Email, ProductCategory, ProductId};
use seller_pro_dashboard::db::PortfolioRepository;
use seller_pro_dashboard::models::NewCatalogProduct;

use super::{CommandError, connect};

/// Link an existing product to a seller.
///
/// # Errors
///
/// Returns an error for an invalid email or a failed write.
pub async fn link(email: &str, product_id: i32) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let pool = connect().await?;
    let repo = PortfolioRepository::new(&pool);

    let product_id = ProductId::new(product_id);
    if repo.get_product(product_id).await?.is_none() {
        tracing::warn!(%product_id, "Product is not in the store; link will not show until it is");
    }

    let link_id = repo.save_user_product(&email, product_id).await?;
    tracing::info!(%link_id, %email, %product_id, "Linked product");
    Ok(())
}

/// Create a product and link it to a seller.
///
/// # Errors
///
/// Returns an error for invalid input or a failed write.
pub async fn add(
    email: &str,
    name: String,
    price: f64,
    category: &str,
) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let category = parse_category(category)?;
    let input = NewCatalogProduct {
        name,
        price,
        category,
    };
    input.validate().map_err(CommandError::InvalidArgument)?;

    let pool = connect().await?;
    let product = PortfolioRepository::new(&pool)
        .add_product_for_user(&email, &input)
        .await?;

    tracing::info!(product_id = %product.id, "{} added to {}'s portfolio", product.name, email);
    Ok(())
}

/// List a seller's saved products.
///
/// # Errors
///
/// Returns an error for an invalid email or a failed query.
pub async fn list(email: &str) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let pool = connect().await?;
    let products = PortfolioRepository::new(&pool)
        .get_user_products(&email)
        .await?;

    if products.is_empty() {
        tracing::info!("{email} hasn't added any products yet");
        return Ok(());
    }

    tracing::info!("{} saved products for {}", products.len(), email);
    for product in &products {
        tracing::info!(
            "  {} | {} | ${:.2} | {}",
            product.id,
            product.name,
            product.price,
            product.category_label()
        );
    }
    Ok(())
}

fn parse_category(value: &str) -> Result<ProductCategory, CommandError> {
    ProductCategory::ALL
        .into_iter()
        .find(|c| c.label().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| {
            CommandError::InvalidArgument(format!(
                "unknown category '{value}' (expected Electronics, Fashion or Home & Garden)"
            ))
        })
}
