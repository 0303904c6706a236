//! # inventario-core: Pure Business Logic for Inventario
//!
//! This crate holds the domain model of the inventory and invoicing backend
//! as plain types and pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Inventario Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP layer (apps/api)                         │   │
//! │  │   /api/productos   /api/factura   /api/reporte-ventas   ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ inventario-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │   types   │  │   money   │  │ validation│                 │   │
//! │  │   │  Product  │  │   Money   │  │   rules   │                 │   │
//! │  │   │   Sale    │  │  display  │  │   checks  │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                 │                               │                       │
//! │  ┌──────────────▼──────────────┐  ┌─────────────▼──────────────────┐   │
//! │  │   inventario-db (SQLite)    │  │   inventario-docs (XLSX, PDF)  │   │
//! │  └─────────────────────────────┘  └────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, joined report/invoice rows)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use inventario_core::money::Money;
//!
//! // "9.99" as typed by the user becomes 999 cents
//! let price = Money::parse_decimal("9.99").unwrap();
//! assert_eq!(price.cents(), 999);
//!
//! // Three units
//! assert_eq!(price.multiply_quantity(3).unwrap().to_string(), "$29.97");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name (after trimming).
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Highest accepted unit price, in cents ($1,000,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;

/// Highest stock level a product may hold.
///
/// `MAX_PRICE_CENTS * MAX_STOCK` fits in `i64`, so any sale of stored stock
/// at a stored price has a representable total.
pub const MAX_STOCK: i64 = 10_000_000;
