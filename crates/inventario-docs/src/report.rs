//! # Sales Report
//!
//! A single-sheet workbook listing every sale with its product name.
//!
//! ```text
//! ┌─────────┬─────────────┬─────────────────────┬──────────┬─────────────────────┐
//! │ ID      │ Producto ID │ Nombre del Producto │ Cantidad │ Fecha               │
//! ├─────────┼─────────────┼─────────────────────┼──────────┼─────────────────────┤
//! │ 1       │ 1           │ Widget              │ 3        │ 2024-05-01 10:15:00 │
//! │ 2       │ 4           │ Gadget              │ 1        │ 2024-05-01 11:02:41 │
//! └─────────┴─────────────┴─────────────────────┴──────────┴─────────────────────┘
//!   row 0 is the header, then one row per sale in the order given
//! ```

use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use crate::error::{DocError, DocResult};
use inventario_core::SaleReportRow;

/// Worksheet name.
pub const SHEET_NAME: &str = "Ventas";

/// Header row, in column order.
pub const HEADERS: [&str; 5] = ["ID", "Producto ID", "Nombre del Producto", "Cantidad", "Fecha"];

/// Column widths in character units, matching [`HEADERS`].
const COLUMN_WIDTHS: [f64; 5] = [30.0, 30.0, 30.0, 15.0, 20.0];

/// How the Fecha column renders a sale timestamp (UTC).
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// MIME type of the rendered workbook.
pub const CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download file name.
pub const FILE_NAME: &str = "ventas.xlsx";

/// A single worksheet cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Number(i64),
    Text(String),
}

/// The sales report for a set of joined sale rows.
#[derive(Debug, Clone)]
pub struct SalesReport {
    rows: Vec<SaleReportRow>,
}

impl SalesReport {
    pub fn new(rows: Vec<SaleReportRow>) -> Self {
        SalesReport { rows }
    }

    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data rows as cell values, in input order.
    pub fn table(&self) -> Vec<[Cell; 5]> {
        self.rows
            .iter()
            .map(|row| {
                [
                    Cell::Number(row.sale_id),
                    Cell::Number(row.product_id),
                    Cell::Text(row.product_name.clone()),
                    Cell::Number(row.quantity),
                    Cell::Text(row.sold_at.format(DATE_FORMAT).to_string()),
                ]
            })
            .collect()
    }

    /// Renders the workbook to xlsx bytes.
    pub fn render(&self) -> DocResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (index, cells) in self.table().iter().enumerate() {
            let row = u32::try_from(index + 1)
                .map_err(|_| DocError::Spreadsheet("too many rows".to_string()))?;

            for (col, cell) in cells.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Number(n) => worksheet.write_number(row, col, *n as f64)?,
                    Cell::Text(text) => worksheet.write_string(row, col, text)?,
                };
            }
        }

        let bytes = workbook.save_to_buffer()?;

        debug!(rows = self.rows.len(), bytes = bytes.len(), "Rendered sales report");
        Ok(bytes)
    }
}
