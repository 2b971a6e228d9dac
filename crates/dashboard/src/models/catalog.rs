//! Local product store types.
//!
//! The `products` table has no NOT NULL constraints, so optional columns
//! stay optional here.

use serde::{Deserialize, Serialize};

use seller_pro_core::{CategoryId, ProductCategory, ProductId};

/// A product saved in the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub rating: Option<f64>,
    pub sales: i64,
    pub category_id: Option<CategoryId>,
}

impl CatalogProduct {
    /// Category label for display, falling back to the raw id.
    #[must_use]
    pub fn category_label(&self) -> String {
        match self.category_id {
            Some(id) => ProductCategory::from_id(id)
                .map_or_else(|| format!("Category {id}"), |c| c.label().to_string()),
            None => "Uncategorized".to_string(),
        }
    }
}

/// Input for adding a product from the "My Products" form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewCatalogProduct {
    pub name: String,
    pub price: f64,
    pub category: ProductCategory,
}

impl NewCatalogProduct {
    /// Lowest price the form accepts.
    pub const MIN_PRICE: f64 = 0.1;

    /// Check the form constraints.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message for a blank name or a price below
    /// [`Self::MIN_PRICE`].
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Product name is required".to_string());
        }
        if !self.price.is_finite() || self.price < Self::MIN_PRICE {
            return Err(format!("Price must be at least {:.2}", Self::MIN_PRICE));
        }
        Ok(())
    }
}
