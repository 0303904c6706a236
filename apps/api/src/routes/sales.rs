//! # Sale Routes
//!
//! `POST /api/factura` records a sale and returns it.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::error::ApiResult;
use crate::routes::dto::{SaleRequest, SaleResponse};
use crate::AppState;

pub async fn record_sale(
    State(state): State<AppState>,
    payload: Result<Json<SaleRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SaleResponse>)> {
    let Json(request) = payload?;
    let (product_id, quantity) = request.parse()?;
    debug!(product_id = %product_id, quantity = quantity, "record_sale");

    let sale = state.sales.record_sale(product_id, quantity).await?;
    Ok((StatusCode::CREATED, Json(sale.into())))
}
