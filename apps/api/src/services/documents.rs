//! Document generation service.
//!
//! Loads the joined rows from the store and hands them to the renderers in
//! `inventario-docs`. Read-only.

use tracing::info;

use inventario_core::CoreError;
use inventario_db::Database;
use inventario_docs::{invoice, report, Invoice, SalesReport};

use super::ServiceResult;

/// A rendered file ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct DocumentGenerator {
    db: Database,
}

impl DocumentGenerator {
    pub fn new(db: Database) -> Self {
        DocumentGenerator { db }
    }

    /// Builds the spreadsheet of every sale joined with its product.
    pub async fn sales_report(&self) -> ServiceResult<RenderedDocument> {
        let rows = self.db.sales().report_rows().await?;
        let sales_report = SalesReport::new(rows);
        let bytes = sales_report.render()?;

        info!(rows = sales_report.len(), "Sales report generated");

        Ok(RenderedDocument {
            file_name: report::FILE_NAME.to_string(),
            content_type: report::CONTENT_TYPE,
            bytes,
        })
    }

    /// Builds the PDF invoice for one sale.
    ///
    /// ## Returns
    /// * `Err(SaleNotFound)` - No sale with this id
    pub async fn invoice(&self, sale_id: i64) -> ServiceResult<RenderedDocument> {
        let detail = self
            .db
            .sales()
            .invoice_detail(sale_id)
            .await?
            .ok_or(CoreError::SaleNotFound(sale_id))?;

        let sale_invoice = Invoice::new(detail);
        let bytes = sale_invoice.render()?;

        info!(sale_id = %sale_id, "Invoice generated");

        Ok(RenderedDocument {
            file_name: sale_invoice.file_name(),
            content_type: invoice::CONTENT_TYPE,
            bytes,
        })
    }
}
