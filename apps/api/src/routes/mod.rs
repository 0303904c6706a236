//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /api/productos              list products                       │
//! │  POST   /api/productos              create product                      │
//! │  GET    /api/productos/{id}         get product                         │
//! │  PUT    /api/productos/{id}         update product (stock never rises)  │
//! │  DELETE /api/productos/{id}         delete product without sales        │
//! │                                                                         │
//! │  POST   /api/factura                record a sale                       │
//! │  GET    /api/reporte-ventas         xlsx sales report                   │
//! │  GET    /api/factura-pdf/{venta_id} PDF invoice                         │
//! │                                                                         │
//! │  GET    /health                     liveness + database check           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod documents;
pub mod dto;
pub mod health;
pub mod products;
pub mod sales;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::error::{ApiError, ErrorCode};
use crate::middleware::trace_request;
use crate::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/productos",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/productos/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/api/factura", post(sales::record_sale))
        .route("/api/reporte-ventas", get(documents::sales_report))
        .route("/api/factura-pdf/{venta_id}", get(documents::invoice_pdf))
        .route("/health", get(health::health))
        .fallback(route_not_found)
        .layer(middleware::from_fn(trace_request))
        .with_state(state)
}

async fn route_not_found() -> ApiError {
    ApiError::new(ErrorCode::NotFound, "Route not found")
}

// =============================================================================
// Router Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use inventario_db::{Database, DbConfig};

    use super::*;

    async fn app() -> Router {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        router(AppState::new(db))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };

        app.clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    async fn create_widget(app: &Router) -> i64 {
        let response = send(
            app,
            "POST",
            "/api/productos",
            Some(json!({"nombre": "Widget", "precio": 9.99, "stock": 5})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_product_crud() {
        let app = app().await;
        let id = create_widget(&app).await;

        let response = send(&app, "GET", &format!("/api/productos/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let product = body_json(response).await;
        assert_eq!(product["nombre"], "Widget");
        assert_eq!(product["precio"], "9.99");
        assert_eq!(product["stock"], 5);

        let response = send(
            &app,
            "PUT",
            &format!("/api/productos/{}", id),
            Some(json!({"nombre": "Widget XL", "precio": "12.50", "stock": 4})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["precio"], "12.50");

        let response = send(&app, "GET", "/api/productos", None).await;
        let list = body_json(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["nombre"], "Widget XL");

        let response = send(&app, "DELETE", &format!("/api/productos/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Producto eliminado");

        let response = send(&app, "GET", &format!("/api/productos/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_product_input() {
        let app = app().await;

        let response = send(
            &app,
            "POST",
            "/api/productos",
            Some(json!({"nombre": "", "precio": 1, "stock": 1})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

        let response = send(
            &app,
            "POST",
            "/api/productos",
            Some(json!({"nombre": "Widget", "precio": -1, "stock": 1})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Missing field is a body rejection
        let response = send(
            &app,
            "POST",
            "/api/productos",
            Some(json!({"nombre": "Widget"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

        let response = send(&app, "GET", "/api/productos/abc", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // A price whose invoice total could not be represented
        let response = send(
            &app,
            "POST",
            "/api/productos",
            Some(json!({"nombre": "Yacht", "precio": "90000000000000000.00", "stock": 2})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_update_cannot_raise_stock() {
        let app = app().await;
        let id = create_widget(&app).await;

        let response = send(
            &app,
            "PUT",
            &format!("/api/productos/{}", id),
            Some(json!({"nombre": "Widget", "precio": 9.99, "stock": 50})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_sale_flow_and_documents() {
        let app = app().await;
        let id = create_widget(&app).await;

        let response = send(
            &app,
            "POST",
            "/api/factura",
            Some(json!({"producto_id": id, "cantidad": 3})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let sale = body_json(response).await;
        assert_eq!(sale["producto_id"], id);
        assert_eq!(sale["cantidad"], 3);
        assert!(sale["fecha"].is_string());
        let sale_id = sale["id"].as_i64().unwrap();

        let response = send(
            &app,
            "POST",
            "/api/factura",
            Some(json!({"producto_id": id.to_string(), "cantidad": "3"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "INSUFFICIENT_STOCK");

        let response = send(&app, "GET", &format!("/api/productos/{}", id), None).await;
        assert_eq!(body_json(response).await["stock"], 2);

        // Product with a sale cannot be deleted
        let response = send(&app, "DELETE", &format!("/api/productos/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = send(&app, "GET", "/api/reporte-ventas", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=ventas.xlsx"
        );
        assert!(body_bytes(response).await.starts_with(b"PK"));

        let response = send(&app, "GET", &format!("/api/factura-pdf/{}", sale_id), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            format!("attachment; filename=factura_{}.pdf", sale_id).as_str()
        );
        let pdf = body_bytes(response).await;
        assert!(pdf.starts_with(b"%PDF"));
        assert!(pdf.windows(13).any(|w| w == b"Total: $29.97"));
    }

    #[tokio::test]
    async fn test_sale_errors() {
        let app = app().await;

        let response = send(
            &app,
            "POST",
            "/api/factura",
            Some(json!({"producto_id": 77, "cantidad": 1})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let id = create_widget(&app).await;
        let response = send(
            &app,
            "POST",
            "/api/factura",
            Some(json!({"producto_id": id, "cantidad": 0})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

        let response = send(&app, "GET", "/api/factura-pdf/123", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_health_and_fallback() {
        let app = app().await;

        let response = send(&app, "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");

        let response = send(&app, "GET", "/nope", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
