//! # Domain Types
//!
//! Core domain types used throughout Inventario.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Product      │   │      Sale       │   (immutable once created)  │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  id             │◄──│  product_id     │                             │
//! │  │  name           │   │  id             │                             │
//! │  │  price_cents    │   │  quantity       │                             │
//! │  │  stock          │   │  sold_at        │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  Joined read models (Sale ⋈ Product):                                   │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ SaleReportRow   │   │ InvoiceDetail   │                             │
//! │  │ one per sale    │   │ + unit price    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are store-generated integers; the invoice number printed on
//! a PDF is the sale id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A sellable item with a unit price and an on-hand quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-generated identifier.
    pub id: i64,

    /// Display name shown on reports and invoices.
    pub name: String,

    /// Unit price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Current on-hand quantity. Never negative.
    pub stock: i64,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated (CRUD or sale).
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether `quantity` units can be taken from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

/// Validated input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

/// Validated input for updating a product.
///
/// `stock: None` leaves the stock untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: String,
    pub price: Money,
    pub stock: Option<i64>,
}

// =============================================================================
// Sale
// =============================================================================

/// An immutable record of a quantity of a product sold at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    /// Store-generated identifier (also the invoice number).
    pub id: i64,

    /// Product the sale refers to. A reference, not ownership.
    pub product_id: i64,

    /// Units sold. Always > 0.
    pub quantity: i64,

    /// Server-assigned creation time.
    #[ts(as = "String")]
    pub sold_at: DateTime<Utc>,
}

// =============================================================================
// Joined Read Models
// =============================================================================

/// One row of the sales report: a sale joined with its product's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleReportRow {
    pub sale_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub sold_at: DateTime<Utc>,
}

/// Everything an invoice needs: a single sale joined with its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InvoiceDetail {
    pub sale_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub sold_at: DateTime<Utc>,
    /// Current unit price of the product, in cents.
    pub unit_price_cents: i64,
}

impl InvoiceDetail {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Invoice total: quantity × unit price, or `None` on overflow.
    #[inline]
    pub fn total(&self) -> Option<Money> {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            name: "Widget".to_string(),
            price_cents: 999,
            stock: 5,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_can_sell() {
        let product = widget();
        assert!(product.can_sell(3));
        assert!(product.can_sell(5));
        assert!(!product.can_sell(6));
    }

    #[test]
    fn test_invoice_total() {
        let detail = InvoiceDetail {
            sale_id: 10,
            product_id: 1,
            product_name: "Widget".to_string(),
            quantity: 3,
            sold_at: Utc::now(),
            unit_price_cents: 999,
        };
        assert_eq!(detail.total(), Some(Money::from_cents(2997)));
        assert_eq!(detail.total().unwrap().to_string(), "$29.97");
        assert_eq!(detail.unit_price().to_string(), "$9.99");
    }
}
