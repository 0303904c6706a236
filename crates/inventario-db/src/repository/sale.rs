//! # Sale Repository
//!
//! Database operations for sales and the read models built from them.
//!
//! ## Sale Recording Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    record_sale(product_id, quantity)                    │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  UPDATE products SET stock = stock - qty                                │
//! │  WHERE id = ? AND stock >= qty          ← takes the write lock first    │
//! │    │                                                                    │
//! │    ├── 0 rows ──► probe product ──► ProductNotFound | InsufficientStock │
//! │    │               (transaction dropped = ROLLBACK, nothing written)    │
//! │    ▼                                                                    │
//! │  INSERT INTO sales ... RETURNING                                        │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  COMMIT  ← decrement and sale become visible together                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stock check and the decrement are the same statement, so two
//! concurrent sales can never both pass a check against the same stock.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use inventario_core::validation::validate_quantity;
use inventario_core::{CoreError, InvoiceDetail, Sale, SaleReportRow};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    // =========================================================================
    // Sale Recording
    // =========================================================================

    /// Records a sale, decrementing stock in the same transaction.
    ///
    /// ## Arguments
    /// * `product_id` - Product being sold
    /// * `quantity` - Units sold, must be > 0
    ///
    /// ## Returns
    /// * `Ok(Sale)` - The committed sale with its generated id and timestamp
    /// * `Err(DbError::Domain(ProductNotFound))` - No such product
    /// * `Err(DbError::Domain(InsufficientStock))` - Stock is below `quantity`
    ///
    /// On any error nothing is written: neither the sale nor the decrement.
    pub async fn record_sale(&self, product_id: i64, quantity: i64) -> DbResult<Sale> {
        validate_quantity(quantity).map_err(CoreError::from)?;

        debug!(product_id = %product_id, quantity = quantity, "Recording sale");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let now = Utc::now();

        let decremented = sqlx::query(
            r#"
            UPDATE products SET
                stock = stock - ?2,
                updated_at = ?3
            WHERE id = ?1
              AND stock >= ?2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            let available: Option<i64> =
                sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
                    .bind(product_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

            let err = match available {
                None => CoreError::ProductNotFound(product_id),
                Some(available) => CoreError::InsufficientStock {
                    product_id,
                    available,
                    requested: quantity,
                },
            };
            debug!(error = %err, "Sale rejected");
            return Err(err.into());
        }

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (product_id, quantity, sold_at)
            VALUES (?1, ?2, ?3)
            RETURNING
                id,
                product_id,
                quantity,
                sold_at
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            sale_id = %sale.id,
            product_id = %product_id,
            quantity = quantity,
            "Sale recorded"
        );

        Ok(sale)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Gets a sale by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, product_id, quantity, sold_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Counts the sales recorded for a product.
    pub async fn count_for_product(&self, product_id: i64) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE product_id = ?1")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Returns one row per sale joined with its product name, in sale order.
    pub async fn report_rows(&self) -> DbResult<Vec<SaleReportRow>> {
        let rows = sqlx::query_as::<_, SaleReportRow>(
            r#"
            SELECT
                s.id AS sale_id,
                s.product_id,
                p.name AS product_name,
                s.quantity,
                s.sold_at
            FROM sales s
            JOIN products p ON p.id = s.product_id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(rows = rows.len(), "Loaded sales report rows");
        Ok(rows)
    }

    /// Loads everything an invoice needs for a single sale.
    ///
    /// The unit price is the product's current price.
    ///
    /// ## Returns
    /// * `Ok(None)` - No sale with this id
    pub async fn invoice_detail(&self, sale_id: i64) -> DbResult<Option<InvoiceDetail>> {
        let detail = sqlx::query_as::<_, InvoiceDetail>(
            r#"
            SELECT
                s.id AS sale_id,
                s.product_id,
                p.name AS product_name,
                s.quantity,
                s.sold_at,
                p.price_cents AS unit_price_cents
            FROM sales s
            JOIN products p ON p.id = s.product_id
            WHERE s.id = ?1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(detail)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
