//! # Inventario API
//!
//! HTTP server for product management, sale recording and sales documents.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Inventario API                                  │
//! │                                                                         │
//! │  Client ───► axum Router ───► Services ───────────► inventario-db       │
//! │              (routes/)        ProductService          (SQLite pool)     │
//! │                               SaleProcessor                             │
//! │                               DocumentGenerator ───► inventario-docs    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PORT` - HTTP port (default: 5000)
//! - `BIND_ADDR` - Interface to bind (default: 0.0.0.0)
//! - `DATABASE_PATH` - SQLite file (default: ./inventario.db)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT_SECS` - Pool acquire timeout (default: 30)
//! - `RUST_LOG` - Log filter (default: info,inventario=debug,sqlx=warn)

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;

use inventario_db::Database;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};
pub use routes::router;

use services::{DocumentGenerator, ProductService, SaleProcessor};

/// Shared application state.
///
/// Every service holds a clone of the same [`Database`] handle.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub products: ProductService,
    pub sales: SaleProcessor,
    pub documents: DocumentGenerator,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState {
            products: ProductService::new(db.clone()),
            sales: SaleProcessor::new(db.clone()),
            documents: DocumentGenerator::new(db.clone()),
            db,
        }
    }
}
