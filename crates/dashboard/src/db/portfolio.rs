//! Seller portfolio repository.
//!
//! Links seller emails to catalog products. All statements bind their
//! arguments; nothing user-supplied is interpolated into SQL.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use seller_pro_core::{Email, LinkId, Product, ProductId};

use super::RepositoryError;
use crate::models::{CatalogProduct, NewCatalogProduct};

const PRODUCT_COLUMNS: &str = "p.id, COALESCE(p.name, '') AS name, COALESCE(p.price, 0.0) AS price, \
     p.rating, COALESCE(p.sales, 0) AS sales, p.category_id";

/// Repository for saved-product operations.
pub struct PortfolioRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PortfolioRepository<'a> {
    /// Create a new portfolio repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Link a product to a seller.
    ///
    /// Duplicate links are allowed and the product does not have to exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, email), fields(email = %email))]
    pub async fn save_user_product(
        &self,
        email: &Email,
        product_id: ProductId,
    ) -> Result<LinkId, RepositoryError> {
        let (id,): (LinkId,) = sqlx::query_as(
            r"
            INSERT INTO user_products (user_email, product_id)
            VALUES (?1, ?2)
            RETURNING id
            ",
        )
        .bind(email)
        .bind(product_id)
        .fetch_one(self.pool)
        .await?;

        debug!(link_id = %id, "Saved user product");
        Ok(id)
    }

    /// Fetch every product linked to a seller.
    ///
    /// A product linked twice appears twice, matching the join.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, email), fields(email = %email))]
    pub async fn get_user_products(
        &self,
        email: &Email,
    ) -> Result<Vec<CatalogProduct>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p \
             JOIN user_products up ON p.id = up.product_id \
             WHERE up.user_email = ?1 \
             ORDER BY up.id"
        );
        let products = sqlx::query_as::<_, CatalogProduct>(&sql)
            .bind(email)
            .fetch_all(self.pool)
            .await?;

        debug!(count = products.len(), "Fetched user products");
        Ok(products)
    }

    /// Get a catalog product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_product(
        &self,
        id: ProductId,
    ) -> Result<Option<CatalogProduct>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = ?1");
        Ok(sqlx::query_as::<_, CatalogProduct>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?)
    }

    /// Insert a new catalog product with a store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_catalog_product(
        &self,
        input: &NewCatalogProduct,
    ) -> Result<CatalogProduct, RepositoryError> {
        let product = sqlx::query_as::<_, CatalogProduct>(
            r"
            INSERT INTO products (name, price, rating, sales, category_id)
            VALUES (?1, ?2, NULL, 0, ?3)
            RETURNING id, name, price, rating, sales, category_id
            ",
        )
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.category.id())
        .fetch_one(self.pool)
        .await?;

        debug!(product_id = %product.id, "Added catalog product");
        Ok(product)
    }

    /// Add a product and link it to a seller in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either insert fails; nothing is
    /// written in that case.
    #[instrument(skip(self, email, input), fields(email = %email, name = %input.name))]
    pub async fn add_product_for_user(
        &self,
        email: &Email,
        input: &NewCatalogProduct,
    ) -> Result<CatalogProduct, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, CatalogProduct>(
            r"
            INSERT INTO products (name, price, rating, sales, category_id)
            VALUES (?1, ?2, NULL, 0, ?3)
            RETURNING id, name, price, rating, sales, category_id
            ",
        )
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.category.id())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO user_products (user_email, product_id) VALUES (?1, ?2)")
            .bind(email)
            .bind(product.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(product_id = %product.id, "Added product to portfolio");
        Ok(product)
    }

    /// Insert or replace a catalog product keeping its marketplace id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn upsert_catalog_product(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO products (id, name, price, rating, sales, category_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                price = excluded.price,
                rating = excluded.rating,
                sales = excluded.sales,
                category_id = excluded.category_id
            ",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.rating)
        .bind(i64::from(product.sales))
        .bind(product.category_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Change the price of a product the seller has saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product is not linked to
    /// this seller, `RepositoryError::Database` if the update fails.
    #[instrument(skip(self, email), fields(email = %email))]
    pub async fn update_price(
        &self,
        email: &Email,
        product_id: ProductId,
        price: f64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE products SET price = ?1
            WHERE id = ?2
              AND EXISTS (
                  SELECT 1 FROM user_products
                  WHERE product_id = ?2 AND user_email = ?3
              )
            ",
        )
        .bind(price)
        .bind(product_id)
        .bind(email)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        debug!(product_id = %product_id, price, "Updated product price");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use seller_pro_core::ProductCategory;

    use super::*;
    use crate::db::create_pool;
    use crate::services::catalog::sample_catalog;

    async fn seeded_pool() -> SqlitePool {
        let pool = create_pool(&SecretString::from("sqlite::memory:")).await.unwrap();
        let repo = PortfolioRepository::new(&pool);
        for product in sample_catalog() {
            repo.upsert_catalog_product(&product).await.unwrap();
        }
        pool
    }

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_only_linked_rows() {
        let pool = seeded_pool().await;
        let repo = PortfolioRepository::new(&pool);
        let alice = email("alice@shop.pk");
        let bob = email("bob@shop.pk");

        repo.save_user_product(&alice, ProductId::new(1001)).await.unwrap();
        repo.save_user_product(&alice, ProductId::new(1004)).await.unwrap();
        repo.save_user_product(&bob, ProductId::new(1002)).await.unwrap();

        let alice_ids: Vec<i32> = repo
            .get_user_products(&alice)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(alice_ids, [1001, 1004]);

        let bob_products = repo.get_user_products(&bob).await.unwrap();
        assert_eq!(bob_products.len(), 1);
        assert_eq!(bob_products[0].name, "Bluetooth Speaker");

        assert!(repo.get_user_products(&email("carol@shop.pk")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quote_in_email_is_data_not_sql() {
        let pool = seeded_pool().await;
        let repo = PortfolioRepository::new(&pool);
        repo.save_user_product(&email("alice@shop.pk"), ProductId::new(1001))
            .await
            .unwrap();

        let hostile = email("x'or'1'='1@shop.pk");
        assert!(repo.get_user_products(&hostile).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_links_are_kept() {
        let pool = seeded_pool().await;
        let repo = PortfolioRepository::new(&pool);
        let seller = email("dup@shop.pk");

        let first = repo.save_user_product(&seller, ProductId::new(1003)).await.unwrap();
        let second = repo.save_user_product(&seller, ProductId::new(1003)).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(repo.get_user_products(&seller).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_link_to_missing_product_is_allowed_but_not_returned() {
        let pool = seeded_pool().await;
        let repo = PortfolioRepository::new(&pool);
        let seller = email("ghost@shop.pk");

        repo.save_user_product(&seller, ProductId::new(999_999)).await.unwrap();
        assert!(repo.get_user_products(&seller).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_product_for_user() {
        let pool = seeded_pool().await;
        let repo = PortfolioRepository::new(&pool);
        let seller = email("new@shop.pk");

        let added = repo
            .add_product_for_user(
                &seller,
                &NewCatalogProduct {
                    name: " Garden Hose ".to_string(),
                    price: 14.0,
                    category: ProductCategory::HomeAndGarden,
                },
            )
            .await
            .unwrap();

        assert_eq!(added.name, "Garden Hose");
        assert_eq!(added.rating, None);
        assert_eq!(added.category_id, Some(ProductCategory::HomeAndGarden.id()));
        assert!(added.id.as_i32() > 1005);

        let saved = repo.get_user_products(&seller).await.unwrap();
        assert_eq!(saved, vec![added]);
    }

    #[tokio::test]
    async fn test_update_price_requires_link() {
        let pool = seeded_pool().await;
        let repo = PortfolioRepository::new(&pool);
        let owner = email("owner@shop.pk");
        let other = email("other@shop.pk");
        repo.save_user_product(&owner, ProductId::new(1005)).await.unwrap();

        assert!(matches!(
            repo.update_price(&other, ProductId::new(1005), 1.0).await,
            Err(RepositoryError::NotFound)
        ));

        repo.update_price(&owner, ProductId::new(1005), 13.99).await.unwrap();
        let product = repo.get_product(ProductId::new(1005)).await.unwrap().unwrap();
        assert!((product.price - 13.99).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_upsert_overwrites() {
        let pool = seeded_pool().await;
        let repo = PortfolioRepository::new(&pool);
        let mut product = sample_catalog().remove(0);
        product.price = 30.0;
        repo.upsert_catalog_product(&product).await.unwrap();

        let stored = repo.get_product(product.id).await.unwrap().unwrap();
        assert!((stored.price - 30.0).abs() < f64::EPSILON);
        assert_eq!(stored.sales, 1500);
    }
}
