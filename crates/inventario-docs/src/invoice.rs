//! # Invoice
//!
//! One A4 page per sale, drawn with the standard Helvetica fonts.
//!
//! ## Layout
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     Factura de Venta                      │  18pt bold
//! │                                                           │
//! │  Número de Factura: 12                                    │  12pt
//! │  Fecha: 01/05/2024                                        │
//! │                                                           │
//! │  Detalles de la Venta:                                    │  12pt bold
//! │  ┌───────────┬──────────────────────┬─────────┬─────────┐ │
//! │  │Producto ID│ Nombre del Producto  │Cantidad │ Precio  │ │  10pt bold
//! │  ├───────────┼──────────────────────┼─────────┼─────────┤ │
//! │  │ 1         │ Widget               │ 3       │ $9.99   │ │  10pt
//! │  └───────────┴──────────────────────┴─────────┴─────────┘ │
//! │                                            Total: $29.97  │  16pt bold
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Text is encoded as WinAnsi, so Spanish accents render with the
//! built-in fonts and no font embedding is needed.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

use crate::error::{DocError, DocResult};
use inventario_core::InvoiceDetail;

/// MIME type of the rendered invoice.
pub const CONTENT_TYPE: &str = "application/pdf";

/// How the invoice prints the sale date.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub const TITLE: &str = "Factura de Venta";

pub const TABLE_HEADERS: [&str; 4] = [
    "Producto ID",
    "Nombre del Producto",
    "Cantidad",
    "Precio Unitario",
];

// A4 in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;

const COLUMN_WIDTHS: [i64; 4] = [90, 215, 80, 110];
const ROW_HEIGHT: i64 = 24;
const CELL_PADDING: i64 = 5;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

/// The invoice for a single sale.
#[derive(Debug, Clone)]
pub struct Invoice {
    detail: InvoiceDetail,
}

impl Invoice {
    pub fn new(detail: InvoiceDetail) -> Self {
        Invoice { detail }
    }

    /// The invoice number is the sale id.
    pub fn number(&self) -> i64 {
        self.detail.sale_id
    }

    /// Download file name, e.g. `factura_12.pdf`.
    pub fn file_name(&self) -> String {
        format!("factura_{}.pdf", self.number())
    }

    pub fn number_line(&self) -> String {
        format!("Número de Factura: {}", self.number())
    }

    pub fn date_line(&self) -> String {
        format!("Fecha: {}", self.detail.sold_at.format(DATE_FORMAT))
    }

    /// The single data row of the details table.
    pub fn table_row(&self) -> [String; 4] {
        [
            self.detail.product_id.to_string(),
            self.detail.product_name.clone(),
            self.detail.quantity.to_string(),
            self.detail.unit_price().to_string(),
        ]
    }

    pub fn total_line(&self) -> DocResult<String> {
        let total = self.detail.total().ok_or(DocError::TotalOverflow {
            sale_id: self.detail.sale_id,
        })?;
        Ok(format!("Total: {}", total))
    }

    /// Renders the invoice to PDF bytes.
    ///
    /// The content stream is left uncompressed.
    pub fn render(&self) -> DocResult<Vec<u8>> {
        let operations = self.page_operations()?;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR => regular_id,
                BOLD => bold_id,
            },
        });

        let content = Content { operations }
            .encode()
            .map_err(|e| DocError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| DocError::Pdf(e.to_string()))?;

        debug!(
            sale_id = %self.number(),
            bytes = bytes.len(),
            "Rendered invoice"
        );
        Ok(bytes)
    }

    fn page_operations(&self) -> DocResult<Vec<Operation>> {
        let mut page = PageBuilder::default();
        let right_edge = PAGE_WIDTH - MARGIN;

        // Heading
        let title_x = (PAGE_WIDTH - text_width(TITLE, 18)) / 2;
        page.text(BOLD, 18, title_x, 780, TITLE);
        page.text(REGULAR, 12, MARGIN, 740, &self.number_line());
        page.text(REGULAR, 12, MARGIN, 720, &self.date_line());
        page.text(BOLD, 12, MARGIN, 690, "Detalles de la Venta:");

        // Details table: header row, then the data row below it
        let header_bottom = 670 - ROW_HEIGHT;
        let data_bottom = header_bottom - ROW_HEIGHT;
        page.table_row(BOLD, header_bottom, &TABLE_HEADERS.map(String::from));
        page.table_row(REGULAR, data_bottom, &self.table_row());

        // Total, right aligned with the table
        let total = self.total_line()?;
        let total_x = right_edge - text_width(&total, 16);
        page.text(BOLD, 16, total_x, data_bottom - 40, &total);

        Ok(page.ops)
    }
}

// =============================================================================
// Page Drawing
// =============================================================================

#[derive(Default)]
struct PageBuilder {
    ops: Vec<Operation>,
}

impl PageBuilder {
    fn text(&mut self, font: &str, size: i64, x: i64, y: i64, text: &str) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops
            .push(Operation::new("Tf", vec![font.into(), size.into()]));
        self.ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(win_ansi(text))],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn rect(&mut self, x: i64, y: i64, width: i64, height: i64) {
        self.ops.push(Operation::new(
            "re",
            vec![x.into(), y.into(), width.into(), height.into()],
        ));
        self.ops.push(Operation::new("S", vec![]));
    }

    /// Draws one bordered table row whose bottom edge sits at `bottom`.
    fn table_row(&mut self, font: &str, bottom: i64, cells: &[String; 4]) {
        const SIZE: i64 = 10;

        let mut x = MARGIN;
        for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
            self.rect(x, bottom, width, ROW_HEIGHT);
            let text = fit_text(cell, SIZE, width - 2 * CELL_PADDING);
            self.text(font, SIZE, x + CELL_PADDING, bottom + 8, &text);
            x += width;
        }
    }
}

/// Approximate rendered width of `text` in points.
///
/// Helvetica averages a little over half an em per glyph.
fn text_width(text: &str, size: i64) -> i64 {
    text.chars().count() as i64 * size * 55 / 100
}

/// Shortens `text` with a trailing "..." until it fits `max_width`.
fn fit_text(text: &str, size: i64, max_width: i64) -> String {
    if text_width(text, size) <= max_width {
        return text.to_string();
    }

    let mut shortened: String = text.to_string();
    while !shortened.is_empty() && text_width(&format!("{}...", shortened), size) > max_width {
        shortened.pop();
    }
    format!("{}...", shortened.trim_end())
}

/// Encodes text for a WinAnsiEncoding font.
///
/// Latin-1 code points map to themselves; anything else becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            0x20AC => 0x80, // €
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn widget_invoice() -> Invoice {
        Invoice::new(InvoiceDetail {
            sale_id: 12,
            product_id: 1,
            product_name: "Widget".to_string(),
            quantity: 3,
            sold_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 0).unwrap(),
            unit_price_cents: 999,
        })
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    #[test]
    fn test_text_lines() {
        let invoice = widget_invoice();

        assert_eq!(invoice.number_line(), "Número de Factura: 12");
        assert_eq!(invoice.date_line(), "Fecha: 01/05/2024");
        assert_eq!(invoice.total_line().unwrap(), "Total: $29.97");
        assert_eq!(invoice.file_name(), "factura_12.pdf");
        assert_eq!(
            invoice.table_row(),
            [
                "1".to_string(),
                "Widget".to_string(),
                "3".to_string(),
                "$9.99".to_string()
            ]
        );
    }

    #[test]
    fn test_total_always_has_two_decimals() {
        let mut detail = widget_invoice().detail;
        detail.unit_price_cents = 250;
        detail.quantity = 4;

        assert_eq!(Invoice::new(detail).total_line().unwrap(), "Total: $10.00");
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let mut detail = widget_invoice().detail;
        detail.unit_price_cents = 9_000_000_000_000_000_000;
        detail.quantity = 2;
        let invoice = Invoice::new(detail);

        assert!(matches!(
            invoice.total_line(),
            Err(DocError::TotalOverflow { sale_id: 12 })
        ));
        assert!(matches!(
            invoice.render(),
            Err(DocError::TotalOverflow { sale_id: 12 })
        ));
    }

    #[test]
    fn test_render_is_single_page_pdf() {
        let bytes = widget_invoice().render().unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(contains(&bytes, "Factura de Venta"));
        assert!(contains(&bytes, "Total: $29.97"));
        assert!(contains(&bytes, "Precio Unitario"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(win_ansi("Número"), vec![b'N', 0xFA, b'm', b'e', b'r', b'o']);
        assert_eq!(win_ansi("10€"), vec![b'1', b'0', 0x80]);
        assert_eq!(win_ansi("水"), vec![b'?']);
    }

    #[test]
    fn test_fit_text_truncates_long_names() {
        assert_eq!(fit_text("Widget", 10, 200), "Widget");

        let long = "A".repeat(100);
        let fitted = fit_text(&long, 10, 100);
        assert!(fitted.ends_with("..."));
        assert!(text_width(&fitted, 10) <= 100);
    }
}
