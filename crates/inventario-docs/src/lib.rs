//! # inventario-docs: Sales Report and Invoice Rendering
//!
//! Both documents are rendered fully in memory from rows that the caller
//! has already loaded. Nothing here touches the database.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Vec<SaleReportRow> ──► SalesReport::render() ──► xlsx bytes            │
//! │                         sheet "Ventas", one row per sale                │
//! │                                                                         │
//! │  InvoiceDetail ───────► Invoice::render() ──────► PDF bytes             │
//! │                         one A4 page, total = quantity × unit price      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`report`] - Spreadsheet sales report
//! - [`invoice`] - PDF invoice
//! - [`error`] - Rendering errors

pub mod error;
pub mod invoice;
pub mod report;

pub use error::{DocError, DocResult};
pub use invoice::Invoice;
pub use report::SalesReport;
