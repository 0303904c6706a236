//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Inventario                             │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                           │
//! │       │                                                                 │
//! │       ├── Json / Path rejection ────────────► 400 VALIDATION_ERROR      │
//! │       ├── ValidationError ──────────────────► 400 VALIDATION_ERROR      │
//! │       ├── CoreError::InsufficientStock ─────► 400 INSUFFICIENT_STOCK    │
//! │       ├── CoreError::*NotFound ─────────────► 404 NOT_FOUND             │
//! │       ├── CoreError::ProductHasSales ───────► 409 CONFLICT              │
//! │       ├── DbError (store failure) ──────────► 500 DATABASE_ERROR        │
//! │       └── DocError ─────────────────────────► 500 DOCUMENT_ERROR        │
//! │                                                                         │
//! │  Response body: { "code": "NOT_FOUND", "error": "Sale not found: 9" }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store and rendering failures are logged with their detail; the client
//! only gets a generic message.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use inventario_core::{CoreError, ValidationError};
use inventario_db::DbError;
use inventario_docs::DocError;

use crate::services::ServiceError;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "error": "Insufficient stock for product 1: available 2, requested 3"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    #[serde(rename = "error")]
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Requested quantity exceeds stock (400)
    InsufficientStock,

    /// Operation conflicts with existing data (409)
    Conflict,

    /// Database operation failed (500)
    DatabaseError,

    /// Document rendering failed (500)
    DocumentError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::InsufficientStock => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::DocumentError | ErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ProductNotFound(_) | CoreError::SaleNotFound(_) => ErrorCode::NotFound,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::StockIncreaseNotAllowed { .. } | CoreError::Validation(_) => {
                ErrorCode::ValidationError
            }
            CoreError::ProductHasSales { .. } => ErrorCode::Conflict,
        };

        let message = match err {
            CoreError::Validation(e) => e.to_string(),
            other => other.to_string(),
        };

        ApiError::new(code, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Domain(e) => e.into(),
            DbError::NotFound { entity, id } => {
                ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
            }
            DbError::UniqueViolation { field, .. } => {
                ApiError::new(ErrorCode::Conflict, format!("{} already exists", field))
            }
            DbError::ForeignKeyViolation { message } => {
                error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::Conflict, "Invalid reference")
            }
            DbError::CheckViolation { message } => {
                error!("Check constraint violation: {}", message);
                ApiError::validation("Value violates a store constraint")
            }
            DbError::ConnectionFailed(e) => {
                error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                error!("Database pool exhausted");
                ApiError::new(ErrorCode::DatabaseError, "Database is busy")
            }
            DbError::Internal(e) => {
                error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::Internal, "Internal server error")
            }
        }
    }
}

impl From<DocError> for ApiError {
    fn from(err: DocError) -> Self {
        error!("Document rendering failed: {}", err);
        ApiError::new(ErrorCode::DocumentError, "Document could not be generated")
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Db(e) => e.into(),
            ServiceError::Document(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_status_mapping() {
        let cases = [
            (CoreError::ProductNotFound(1), StatusCode::NOT_FOUND),
            (CoreError::SaleNotFound(1), StatusCode::NOT_FOUND),
            (
                CoreError::InsufficientStock {
                    product_id: 1,
                    available: 2,
                    requested: 3,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::ProductHasSales {
                    product_id: 1,
                    sales: 1,
                },
                StatusCode::CONFLICT,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_store_failure_hides_detail() {
        let err = ApiError::from(DbError::QueryFailed("disk I/O error at page 7".to_string()));

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("page 7"));
    }

    #[test]
    fn test_document_failure_is_internal() {
        let err = ApiError::from(DocError::TotalOverflow { sale_id: 4 });

        assert_eq!(err.code, ErrorCode::DocumentError);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::from(CoreError::SaleNotFound(9));
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["error"], "Sale not found: 9");
    }

    #[test]
    fn test_validation_message_is_unwrapped() {
        let err = ApiError::from(CoreError::Validation(ValidationError::MustBePositive {
            field: "cantidad".to_string(),
        }));

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "cantidad must be positive");
    }
}
