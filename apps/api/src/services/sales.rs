//! # Sale Processor
//!
//! Records a sale against stock as one unit: either the sale row exists and
//! stock went down by its quantity, or neither happened.
//!
//! ```text
//! record_sale(product_id, quantity)
//!      │
//!      ├── quantity <= 0 / product_id <= 0 ──► Validation (nothing queried)
//!      │
//!      ▼
//! SaleRepository::record_sale  (single transaction)
//!      │
//!      ├── ProductNotFound     ──► 404
//!      ├── InsufficientStock   ──► 400
//!      ├── store failure       ──► 500 (rolled back, not retried)
//!      └── Sale                ──► 201
//! ```

use tracing::warn;

use inventario_core::validation::{validate_id, validate_quantity};
use inventario_core::Sale;
use inventario_db::Database;

use super::{ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct SaleProcessor {
    db: Database,
}

impl SaleProcessor {
    pub fn new(db: Database) -> Self {
        SaleProcessor { db }
    }

    /// Validates the request and records the sale.
    ///
    /// ## Returns
    /// * `Ok(Sale)` - Sale committed, stock decremented
    /// * `Err(..)` - Nothing was written
    pub async fn record_sale(&self, product_id: i64, quantity: i64) -> ServiceResult<Sale> {
        validate_id("producto_id", product_id)?;
        validate_quantity(quantity)?;

        self.db
            .sales()
            .record_sale(product_id, quantity)
            .await
            .map_err(|e| {
                let err = ServiceError::from(e);
                if let Some(rule) = err.domain() {
                    warn!(
                        product_id = %product_id,
                        quantity = quantity,
                        error = %rule,
                        "Sale rejected"
                    );
                }
                err
            })
    }
}

#[cfg(test)]
mod tests {
    use inventario_core::{CoreError, Money, NewProduct};
    use inventario_db::DbConfig;

    use super::*;

    async fn setup() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let widget = db
            .products()
            .insert(&NewProduct {
                name: "Widget".to_string(),
                price: Money::from_cents(999),
                stock: 5,
            })
            .await
            .unwrap();
        (db, widget.id)
    }

    #[tokio::test]
    async fn test_widget_scenario() {
        let (db, widget) = setup().await;
        let processor = SaleProcessor::new(db.clone());

        let sale = processor.record_sale(widget, 3).await.unwrap();
        assert_eq!(sale.product_id, widget);
        assert_eq!(sale.quantity, 3);

        let err = processor.record_sale(widget, 3).await.unwrap_err();
        assert!(matches!(
            err.domain(),
            Some(CoreError::InsufficientStock {
                available: 2,
                requested: 3,
                ..
            })
        ));

        let product = db.products().get_by_id(widget).await.unwrap().unwrap();
        assert_eq!(product.stock, 2);
    }

    #[tokio::test]
    async fn test_validation_happens_before_store() {
        let (db, widget) = setup().await;
        let processor = SaleProcessor::new(db);

        let err = processor.record_sale(widget, 0).await.unwrap_err();
        assert!(matches!(err.domain(), Some(CoreError::Validation(_))));

        let err = processor.record_sale(-1, 1).await.unwrap_err();
        assert!(matches!(err.domain(), Some(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_product() {
        let (db, _) = setup().await;
        let processor = SaleProcessor::new(db);

        let err = processor.record_sale(999, 1).await.unwrap_err();
        assert!(matches!(err.domain(), Some(CoreError::ProductNotFound(999))));
    }
}
