//! # Document Error Types

use thiserror::Error;

/// Errors raised while rendering a document.
///
/// Rendering fails on writer errors or on stored amounts the invoice
/// cannot total. The HTTP layer reports every variant as a 500.
#[derive(Debug, Error)]
pub enum DocError {
    /// The spreadsheet writer rejected the workbook.
    #[error("Spreadsheet rendering failed: {0}")]
    Spreadsheet(String),

    /// The PDF writer failed to encode or save the document.
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    /// Quantity × unit price does not fit in the money type.
    #[error("Invoice total overflows for sale {sale_id}")]
    TotalOverflow { sale_id: i64 },
}

impl From<rust_xlsxwriter::XlsxError> for DocError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        DocError::Spreadsheet(err.to_string())
    }
}

/// Result type for rendering operations.
pub type DocResult<T> = Result<T, DocError>;
