//! Request and response bodies.
//!
//! Field names follow the Spanish wire format the frontend already speaks
//! (`nombre`, `precio`, `producto_id`, `cantidad`, `fecha`). Numbers may
//! arrive as JSON numbers or as numeric strings straight from form inputs;
//! both are validated into core types before any service is called.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use inventario_core::validation::{validate_new_product, validate_product_update};
use inventario_core::{NewProduct, Product, ProductUpdate, Sale, ValidationError};

// =============================================================================
// Loose Numeric Input
// =============================================================================

/// A number given either as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(serde_json::Number),
    Text(String),
}

impl NumberInput {
    /// Decimal text of the value, as typed.
    pub fn as_text(&self) -> String {
        match self {
            NumberInput::Number(n) => n.to_string(),
            NumberInput::Text(s) => s.trim().to_string(),
        }
    }

    /// The value as a whole number.
    pub fn to_integer(&self, field: &str) -> Result<i64, ValidationError> {
        let parsed = match self {
            NumberInput::Number(n) => n.as_i64(),
            NumberInput::Text(s) => s.trim().parse().ok(),
        };

        parsed.ok_or_else(|| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a whole number".to_string(),
        })
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub nombre: String,
    pub precio: NumberInput,
    pub stock: NumberInput,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let stock = self.stock.to_integer("stock")?;
        validate_new_product(&self.nombre, &self.precio.as_text(), stock)
    }
}

/// `stock` may be omitted to keep the current stock.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductRequest {
    pub nombre: String,
    pub precio: NumberInput,
    #[serde(default)]
    pub stock: Option<NumberInput>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<ProductUpdate, ValidationError> {
        let stock = self
            .stock
            .as_ref()
            .map(|s| s.to_integer("stock"))
            .transpose()?;
        validate_product_update(&self.nombre, &self.precio.as_text(), stock)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub nombre: String,
    /// Two-decimal text, e.g. "9.99".
    pub precio: String,
    pub stock: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id,
            precio: product.price().to_decimal_string(),
            nombre: product.name,
            stock: product.stock,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Sales
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SaleRequest {
    pub producto_id: NumberInput,
    pub cantidad: NumberInput,
}

impl SaleRequest {
    /// Returns `(product_id, quantity)`.
    pub fn parse(&self) -> Result<(i64, i64), ValidationError> {
        Ok((
            self.producto_id.to_integer("producto_id")?,
            self.cantidad.to_integer("cantidad")?,
        ))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleResponse {
    pub id: i64,
    pub producto_id: i64,
    pub cantidad: i64,
    pub fecha: DateTime<Utc>,
}

impl From<Sale> for SaleResponse {
    fn from(sale: Sale) -> Self {
        SaleResponse {
            id: sale.id,
            producto_id: sale.product_id,
            cantidad: sale.quantity,
            fecha: sale.sold_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_price_as_number_or_string() {
        let from_number: CreateProductRequest =
            serde_json::from_value(json!({"nombre": "Widget", "precio": 9.99, "stock": 5}))
                .unwrap();
        let from_text: CreateProductRequest =
            serde_json::from_value(json!({"nombre": "Widget", "precio": "9.99", "stock": "5"}))
                .unwrap();

        let a = from_number.validate().unwrap();
        let b = from_text.validate().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.price.cents(), 999);
        assert_eq!(a.stock, 5);
    }

    #[test]
    fn test_fractional_stock_rejected() {
        let req: CreateProductRequest =
            serde_json::from_value(json!({"nombre": "Widget", "precio": 1, "stock": 2.5}))
                .unwrap();

        assert!(matches!(
            req.validate(),
            Err(ValidationError::InvalidFormat { field, .. }) if field == "stock"
        ));
    }

    #[test]
    fn test_update_without_stock() {
        let req: UpdateProductRequest =
            serde_json::from_value(json!({"nombre": "Widget", "precio": "1.50"})).unwrap();

        assert_eq!(req.validate().unwrap().stock, None);
    }

    #[test]
    fn test_sale_request_from_form_strings() {
        let req: SaleRequest =
            serde_json::from_value(json!({"producto_id": "1", "cantidad": "3"})).unwrap();
        assert_eq!(req.parse().unwrap(), (1, 3));

        let req: SaleRequest =
            serde_json::from_value(json!({"producto_id": 1, "cantidad": "tres"})).unwrap();
        assert!(req.parse().is_err());
    }
}
