//! # Document Routes
//!
//! Binary downloads: the xlsx sales report and per-sale PDF invoices.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::error::ApiResult;
use crate::services::RenderedDocument;
use crate::AppState;

pub async fn sales_report(State(state): State<AppState>) -> ApiResult<Response> {
    let document = state.documents.sales_report().await?;
    Ok(attachment(document))
}

pub async fn invoice_pdf(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Response> {
    let Path(sale_id) = path?;
    debug!(sale_id = %sale_id, "invoice_pdf");

    let document = state.documents.invoice(sale_id).await?;
    Ok(attachment(document))
}

fn attachment(document: RenderedDocument) -> Response {
    let headers = [
        (header::CONTENT_TYPE, document.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", document.file_name),
        ),
    ];

    (headers, document.bytes).into_response()
}
