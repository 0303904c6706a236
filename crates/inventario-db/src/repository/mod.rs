//! # Repository Module
//!
//! Database repository implementations for Inventario.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Service layer (apps/api)                                               │
//! │       │                                                                 │
//! │       │  db.sales().record_sale(product_id, quantity)                   │
//! │       ▼                                                                 │
//! │  SaleRepository                                                         │
//! │  ├── record_sale(&self, product_id, quantity)   (transactional)         │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── report_rows(&self)                                                 │
//! │  └── invoice_detail(&self, sale_id)                                     │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD
//! - [`SaleRepository`](sale::SaleRepository) - Sale recording and the
//!   report/invoice read models

pub mod product;
pub mod sale;
