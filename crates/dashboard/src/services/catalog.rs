//! Mock marketplace data.
//!
//! Stands in for a real marketplace catalog: search results and product
//! lookups are generated on demand with fixed value ranges, and the session
//! dataset is a fixed five-product sample.

use std::ops::RangeInclusive;
use std::time::Duration;

use moka::future::Cache;
use rand::Rng;
use serde::Serialize;

use seller_pro_core::{CategoryId, Product, ProductId, SellerId};

/// First generated product id; record `i` gets `BASE_PRODUCT_ID + i`.
pub const BASE_PRODUCT_ID: i32 = 1000;

/// Price range of generated products.
pub const PRICE_RANGE: RangeInclusive<f64> = 5.0..=100.0;

/// Rating range of generated products.
pub const RATING_RANGE: RangeInclusive<f64> = 3.5..=5.0;

/// Sales range of generated products.
pub const SALES_RANGE: RangeInclusive<u32> = 100..=5000;

const SELLER_RANGE: RangeInclusive<i32> = 5000..=6000;
const CATEGORY_RANGE: RangeInclusive<i32> = 100..=500;

/// Months shown on the sales trend chart.
pub const TREND_MONTHS: [&str; 5] = ["Jan", "Feb", "Mar", "Apr", "May"];

/// Generate one synthetic product.
///
/// The name is the capitalized keyword followed by the 1-based position.
pub fn generate_product(rng: &mut impl Rng, index: u32, keyword: &str) -> Product {
    let offset = i32::try_from(index).unwrap_or(i32::MAX - BASE_PRODUCT_ID);
    Product {
        id: ProductId::new(BASE_PRODUCT_ID.saturating_add(offset)),
        name: format!("{} {}", capitalize(keyword), index.saturating_add(1)),
        price: round_to(rng.random_range(PRICE_RANGE), 2),
        rating: round_to(rng.random_range(RATING_RANGE), 1),
        sales: rng.random_range(SALES_RANGE),
        seller_id: SellerId::new(rng.random_range(SELLER_RANGE)),
        category_id: CategoryId::new(rng.random_range(CATEGORY_RANGE)),
    }
}

/// The fixed dataset every session starts from.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    [
        (1001, "Wireless Headphones", 25.99, 4.5, 1500, 5001, 301),
        (1002, "Bluetooth Speaker", 18.50, 4.2, 980, 5002, 302),
        (1003, "Phone Charger", 8.99, 4.0, 3200, 5003, 303),
        (1004, "Yoga Mat", 15.75, 4.7, 2100, 5004, 304),
        (1005, "Water Bottle", 12.49, 4.3, 4500, 5005, 305),
    ]
    .into_iter()
    .map(|(id, name, price, rating, sales, seller, category)| Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price,
        rating,
        sales,
        seller_id: SellerId::new(seller),
        category_id: CategoryId::new(category),
    })
    .collect()
}

/// The `n` best-selling products, highest first.
#[must_use]
pub fn top_sellers(products: &[Product], n: usize) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| b.sales.cmp(&a.sales));
    sorted.truncate(n);
    sorted
}

/// One point on the sales trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub month: &'static str,
    pub sales: u32,
}

/// Random monthly sales, 50 to 199 units per month.
pub fn sales_trend(rng: &mut impl Rng) -> Vec<TrendPoint> {
    TREND_MONTHS
        .iter()
        .map(|&month| TrendPoint {
            month,
            sales: rng.random_range(50..200),
        })
        .collect()
}

/// Search parameters understood by [`MockMarketplace::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub category_id: Option<CategoryId>,
    pub page: u32,
    pub page_size: u32,
}

impl SearchQuery {
    /// Largest page the mock will generate.
    pub const MAX_PAGE_SIZE: u32 = 100;

    #[must_use]
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            category_id: None,
            page: 1,
            page_size: 10,
        }
    }
}

/// In-process stand-in for the marketplace catalog API.
///
/// Product lookups are generated once per id and then served from cache for
/// the life of the process.
#[derive(Clone)]
pub struct MockMarketplace {
    products: Cache<ProductId, Product>,
}

impl Default for MockMarketplace {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketplace {
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: Cache::builder()
                .max_capacity(10_000)
                .time_to_idle(Duration::from_secs(24 * 60 * 60))
                .build(),
        }
    }

    /// Generate one page of search results.
    ///
    /// Results are always fresh; only [`Self::product`] is memoized.
    #[must_use]
    pub fn search(&self, query: &SearchQuery) -> Vec<Product> {
        let mut rng = rand::rng();
        let size = query.page_size.clamp(1, SearchQuery::MAX_PAGE_SIZE);
        (0..size)
            .map(|i| {
                let mut product = generate_product(&mut rng, i, &query.keyword);
                if let Some(category) = query.category_id {
                    product.category_id = category;
                }
                product
            })
            .collect()
    }

    /// Look up a product, generating it the first time it is requested.
    pub async fn product(&self, id: ProductId) -> Product {
        let generated = {
            let mut rng = rand::rng();
            let index = u32::try_from(id.as_i32().saturating_sub(BASE_PRODUCT_ID)).unwrap_or(0);
            let mut product = generate_product(&mut rng, index, "Product");
            product.id = id;
            product
        };
        self.products.get_with(id, async move { generated }).await
    }
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(keyword: &str) -> String {
    let trimmed = keyword.trim();
    let mut chars = trimmed.chars();
    chars.next().map_or_else(
        || "Product".to_string(),
        |first| first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    )
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_generated_products_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for i in 0..2_000 {
            let p = generate_product(&mut rng, i, "mat");
            assert!(PRICE_RANGE.contains(&p.price), "price {}", p.price);
            assert!(RATING_RANGE.contains(&p.rating), "rating {}", p.rating);
            assert!(SALES_RANGE.contains(&p.sales), "sales {}", p.sales);
            assert!(SELLER_RANGE.contains(&p.seller_id.as_i32()));
            assert!(CATEGORY_RANGE.contains(&p.category_id.as_i32()));
        }
    }

    #[test]
    fn test_generated_ids_and_names() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = generate_product(&mut rng, 4, "yOGA mat");
        assert_eq!(p.id, ProductId::new(1004));
        assert_eq!(p.name, "Yoga mat 5");
    }

    #[test]
    fn test_capitalize_empty_keyword() {
        assert_eq!(capitalize("   "), "Product");
        assert_eq!(capitalize("éCLAIR"), "Éclair");
    }

    #[test]
    fn test_top_sellers_orders_by_sales() {
        let top = top_sellers(&sample_catalog(), 3);
        let names: Vec<&str> = top.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Water Bottle", "Phone Charger", "Yoga Mat"]);
    }

    #[test]
    fn test_sales_trend_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        let trend = sales_trend(&mut rng);
        assert_eq!(trend.len(), 5);
        assert!(trend.iter().all(|p| (50..200).contains(&p.sales)));
        assert_eq!(trend[0].month, "Jan");
    }

    #[test]
    fn test_search_honours_page_size_and_category() {
        let marketplace = MockMarketplace::new();
        let mut query = SearchQuery::new("lamp");
        query.page_size = 4;
        query.category_id = Some(CategoryId::new(222));

        let results = marketplace.search(&query);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|p| p.category_id == CategoryId::new(222)));
        assert_eq!(results[3].name, "Lamp 4");
    }

    #[tokio::test]
    async fn test_product_lookup_is_memoized() {
        let marketplace = MockMarketplace::new();
        let first = marketplace.product(ProductId::new(1042)).await;
        let second = marketplace.product(ProductId::new(1042)).await;
        assert_eq!(first, second);
        assert_eq!(first.id, ProductId::new(1042));
    }
}
