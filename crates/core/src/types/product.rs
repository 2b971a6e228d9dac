//! Marketplace product record.

use serde::{Deserialize, Serialize};

use crate::{CategoryId, ProductId, SellerId};

/// A product as the dashboard sees it.
///
/// Records are synthetic (generated or taken from the sample catalog) and
/// only live for the duration of a session. The generator keeps every numeric
/// field non-negative; nothing else is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Marketplace product ID.
    #[serde(rename = "product_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Listed price in the store currency.
    pub price: f64,
    /// Average customer rating, 0.0 to 5.0.
    pub rating: f64,
    /// Units sold.
    pub sales: u32,
    /// Seller who owns the listing.
    pub seller_id: SellerId,
    /// Marketplace category.
    pub category_id: CategoryId,
}

/// Categories offered by the "add product" form.
///
/// The local store keeps categories as integer ids; each named category maps
/// to a fixed id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductCategory {
    #[default]
    Electronics,
    Fashion,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
}

impl ProductCategory {
    /// All categories, in form order.
    pub const ALL: [Self; 3] = [Self::Electronics, Self::Fashion, Self::HomeAndGarden];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Fashion => "Fashion",
            Self::HomeAndGarden => "Home & Garden",
        }
    }

    /// Category id stored in the local product table.
    #[must_use]
    pub const fn id(self) -> CategoryId {
        match self {
            Self::Electronics => CategoryId::new(100),
            Self::Fashion => CategoryId::new(200),
            Self::HomeAndGarden => CategoryId::new(300),
        }
    }

    /// Look up a category from its stored id.
    #[must_use]
    pub fn from_id(id: CategoryId) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
