//! Service layer.
//!
//! Each service holds an explicitly passed [`Database`] handle; connections
//! are acquired per call and released when the call returns.
//!
//! [`Database`]: inventario_db::Database

pub mod documents;
pub mod products;
pub mod sales;

use inventario_core::{CoreError, ValidationError};
use inventario_db::DbError;
use inventario_docs::DocError;
use thiserror::Error;

pub use documents::{DocumentGenerator, RenderedDocument};
pub use products::ProductService;
pub use sales::SaleProcessor;

/// Failure of a service operation.
///
/// Business rule failures travel inside `Db(DbError::Domain(..))`, so
/// callers match a single place for NotFound, InsufficientStock and
/// validation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Document(#[from] DocError),
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        ServiceError::Db(DbError::Domain(err))
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        CoreError::from(err).into()
    }
}

impl ServiceError {
    /// The business rule failure, if that is what this is.
    pub fn domain(&self) -> Option<&CoreError> {
        match self {
            ServiceError::Db(DbError::Domain(err)) => Some(err),
            _ => None,
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
