//! Product CRUD service.

use tracing::{info, warn};

use inventario_core::validation::validate_id;
use inventario_core::{CoreError, NewProduct, Product, ProductUpdate};
use inventario_db::Database;

use super::{ServiceError, ServiceResult};

/// Product CRUD over the store.
#[derive(Debug, Clone)]
pub struct ProductService {
    db: Database,
}

impl ProductService {
    pub fn new(db: Database) -> Self {
        ProductService { db }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.db.products().list().await?)
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Product> {
        validate_id("id", id)?;

        self.db
            .products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(id).into())
    }

    pub async fn create(&self, product: NewProduct) -> ServiceResult<Product> {
        let created = self.db.products().insert(&product).await?;
        info!(id = %created.id, name = %created.name, "Product created");
        Ok(created)
    }

    /// Updates a product; its stock may be kept or lowered, never raised.
    pub async fn update(&self, id: i64, update: ProductUpdate) -> ServiceResult<Product> {
        validate_id("id", id)?;

        let updated = self.db.products().update(id, &update).await.map_err(|e| {
            let err = ServiceError::from(e);
            if let Some(rule) = err.domain() {
                warn!(id = %id, error = %rule, "Product update rejected");
            }
            err
        })?;

        info!(id = %id, "Product updated");
        Ok(updated)
    }

    /// Deletes a product that no sale references.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        validate_id("id", id)?;

        self.db.products().delete(id).await.map_err(|e| {
            let err = ServiceError::from(e);
            if let Some(rule) = err.domain() {
                warn!(id = %id, error = %rule, "Product delete rejected");
            }
            err
        })?;

        info!(id = %id, "Product deleted");
        Ok(())
    }
}
