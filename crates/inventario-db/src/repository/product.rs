//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations
//! - Stock is guarded in SQL: an update may lower stock but never raise it,
//!   and a product with recorded sales cannot be deleted
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Guarded Writes (single statement)                      │
//! │                                                                         │
//! │  UPDATE products SET ..., stock = COALESCE(?new, stock)                 │
//! │  WHERE id = ? AND (?new IS NULL OR ?new <= stock)                       │
//! │       │                                                                 │
//! │       ├── 1 row  → updated product returned                             │
//! │       └── 0 rows → probe: missing product or stock increase?            │
//! │                                                                         │
//! │  The check and the write happen in one statement, so a sale that        │
//! │  commits in between cannot be "undone" by a stale stock value.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use inventario_core::{CoreError, NewProduct, Product, ProductUpdate};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let created = repo.insert(&new_product).await?;
/// let product = repo.get_by_id(created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        debug!("Listing products");

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id,
                name,
                price_cents,
                stock,
                created_at,
                updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id,
                name,
                price_cents,
                stock,
                created_at,
                updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product and returns it with its generated id.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let now = Utc::now();

        let inserted = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price_cents, stock, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING
                id,
                name,
                price_cents,
                stock,
                created_at,
                updated_at
            "#,
        )
        .bind(&product.name)
        .bind(product.price.cents())
        .bind(product.stock)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    /// Updates name, price and (optionally) stock of a product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The updated product
    /// * `Err(DbError::Domain(ProductNotFound))` - No such product
    /// * `Err(DbError::Domain(StockIncreaseNotAllowed))` - Requested stock
    ///   is higher than the current stock
    pub async fn update(&self, id: i64, update: &ProductUpdate) -> DbResult<Product> {
        debug!(id = %id, stock = ?update.stock, "Updating product");

        let now = Utc::now();

        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = ?2,
                price_cents = ?3,
                stock = COALESCE(?4, stock),
                updated_at = ?5
            WHERE id = ?1
              AND (?4 IS NULL OR ?4 <= stock)
            RETURNING
                id,
                name,
                price_cents,
                stock,
                created_at,
                updated_at
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(update.price.cents())
        .bind(update.stock)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(product) = updated {
            return Ok(product);
        }

        // Nothing matched: either the product is gone or the guard refused
        let current = self.current_stock(id).await?;
        match (current, update.stock) {
            (Some(current), Some(requested)) => Err(CoreError::StockIncreaseNotAllowed {
                product_id: id,
                current,
                requested,
            }
            .into()),
            _ => Err(CoreError::ProductNotFound(id).into()),
        }
    }

    /// Deletes a product that has no recorded sales.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::Domain(ProductNotFound))` - No such product
    /// * `Err(DbError::Domain(ProductHasSales))` - Sales still reference it
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = ?1
              AND NOT EXISTS (SELECT 1 FROM sales WHERE product_id = ?1)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        if self.current_stock(id).await?.is_none() {
            return Err(CoreError::ProductNotFound(id).into());
        }

        let sales: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE product_id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Err(CoreError::ProductHasSales {
            product_id: id,
            sales,
        }
        .into())
    }

    /// Counts total products (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn current_stock(&self, id: i64) -> DbResult<Option<i64>> {
        let stock: Option<i64> = sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(stock)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use inventario_core::Money;

    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    use super::*;

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            price: Money::from_cents(999),
            stock: 5,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = setup().await;

        let created = db.products().insert(&widget()).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.name, "Widget");
        assert_eq!(created.price_cents, 999);
        assert_eq!(created.stock, 5);

        let fetched = db.products().get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = setup().await;
        assert!(db.products().get_by_id(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let db = setup().await;
        let first = db.products().insert(&widget()).await.unwrap();
        let mut gadget = widget();
        gadget.name = "Gadget".to_string();
        let second = db.products().insert(&gadget).await.unwrap();

        let listed = db.products().list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
        assert_eq!(db.products().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_name_price_and_lower_stock() {
        let db = setup().await;
        let created = db.products().insert(&widget()).await.unwrap();

        let update = ProductUpdate {
            name: "Widget XL".to_string(),
            price: Money::from_cents(1250),
            stock: Some(2),
        };
        let updated = db.products().update(created.id, &update).await.unwrap();

        assert_eq!(updated.name, "Widget XL");
        assert_eq!(updated.price_cents, 1250);
        assert_eq!(updated.stock, 2);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_without_stock_keeps_stock() {
        let db = setup().await;
        let created = db.products().insert(&widget()).await.unwrap();

        let update = ProductUpdate {
            name: "Widget".to_string(),
            price: Money::from_cents(100),
            stock: None,
        };
        let updated = db.products().update(created.id, &update).await.unwrap();
        assert_eq!(updated.stock, 5);
    }

    #[tokio::test]
    async fn test_update_refuses_stock_increase() {
        let db = setup().await;
        let created = db.products().insert(&widget()).await.unwrap();

        let update = ProductUpdate {
            name: "Widget".to_string(),
            price: Money::from_cents(999),
            stock: Some(6),
        };
        let err = db.products().update(created.id, &update).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::StockIncreaseNotAllowed {
                current: 5,
                requested: 6,
                ..
            })
        ));

        let unchanged = db.products().get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(unchanged.stock, 5);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let db = setup().await;
        let update = ProductUpdate {
            name: "Ghost".to_string(),
            price: Money::from_cents(1),
            stock: Some(1),
        };
        let err = db.products().update(99, &update).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::ProductNotFound(99))));
    }

    #[tokio::test]
    async fn test_delete_product_without_sales() {
        let db = setup().await;
        let created = db.products().insert(&widget()).await.unwrap();

        db.products().delete(created.id).await.unwrap();
        assert!(db.products().get_by_id(created.id).await.unwrap().is_none());

        let err = db.products().delete(created.id).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_refused_when_sales_exist() {
        let db = setup().await;
        let created = db.products().insert(&widget()).await.unwrap();
        db.sales().record_sale(created.id, 1).await.unwrap();
        db.sales().record_sale(created.id, 1).await.unwrap();

        let err = db.products().delete(created.id).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::ProductHasSales { sales: 2, .. })
        ));
        assert!(db.products().get_by_id(created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_negative_stock_rejected_by_schema() {
        let db = setup().await;
        let mut bad = widget();
        bad.stock = -1;

        let err = db.products().insert(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }

    #[tokio::test]
    async fn test_out_of_range_price_rejected_by_schema() {
        let db = setup().await;
        let mut bad = widget();
        bad.price = Money::from_cents(inventario_core::MAX_PRICE_CENTS + 1);

        let err = db.products().insert(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));

        bad.price = Money::from_cents(inventario_core::MAX_PRICE_CENTS);
        assert!(db.products().insert(&bad).await.is_ok());
    }
}
