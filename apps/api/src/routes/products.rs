//! # Product Routes
//!
//! `/api/productos` CRUD.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::error::ApiResult;
use crate::routes::dto::{
    CreateProductRequest, MessageResponse, ProductResponse, UpdateProductRequest,
};
use crate::AppState;

pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductResponse>>> {
    let products = state.products.list().await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ProductResponse>> {
    let Path(id) = path?;
    debug!(id = %id, "get_product");

    let product = state.products.get(id).await?;
    Ok(Json(product.into()))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProductResponse>)> {
    let Json(request) = payload?;
    let product = request.validate()?;
    debug!(name = %product.name, "create_product");

    let created = state.products.create(product).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> ApiResult<Json<ProductResponse>> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let update = request.validate()?;
    debug!(id = %id, "update_product");

    let updated = state.products.update(id, update).await?;
    Ok(Json(updated.into()))
}

pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = path?;
    debug!(id = %id, "delete_product");

    state.products.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Producto eliminado".to_string(),
    }))
}
