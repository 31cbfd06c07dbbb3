//! Service-layer error type for the storefront
//!
//! `ServiceError` lets the page and JSON handlers use `?` on `sqlx::Error`
//! and `AppError` alike, then turn the result into whatever the route renders.

use shared::error::{AppError, ErrorCode};

use crate::checkout::{OrderError, StoreError};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error
///
/// - `Db`: store query failure (logged, message kept verbatim)
/// - `Unavailable`: store unreachable (logged, reported as retryable)
/// - `App`: business-rule failure, passed through unchanged
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    Unavailable(String),
    App(AppError),
}

impl ServiceError {
    /// Text shown to the user on rendered pages
    pub fn message(&self) -> String {
        match self {
            ServiceError::Db(e) => e.to_string(),
            ServiceError::Unavailable(msg) => msg.clone(),
            ServiceError::App(e) => e.message.clone(),
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        // Keep only the server's own text for constraint and syntax errors
        match StoreError::from(e) {
            StoreError::Unavailable(msg) => ServiceError::Unavailable(msg),
            StoreError::Query(msg) => ServiceError::Db(msg.into()),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<OrderError> for ServiceError {
    fn from(e: OrderError) -> Self {
        ServiceError::App(e.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::database(db_err.to_string())
            }
            ServiceError::Unavailable(msg) => {
                tracing::error!(error = %msg, "Service store unavailable");
                AppError::with_message(ErrorCode::NetworkError, msg)
            }
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_maps_to_network_error() {
        let err = ServiceError::from(sqlx::Error::PoolTimedOut);
        // Unreachable stores take the logged branch, not the pass-through one
        assert!(matches!(err, ServiceError::Unavailable(_)));

        let message = err.message();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::NetworkError);
        assert_eq!(app.message, message);
    }

    #[test]
    fn test_db_error_keeps_message() {
        let err = ServiceError::Db("duplicate key value violates unique constraint".into());
        assert_eq!(
            err.message(),
            "duplicate key value violates unique constraint"
        );

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
        assert_eq!(app.message, "duplicate key value violates unique constraint");
    }

    #[test]
    fn test_order_error_passes_through() {
        let err = ServiceError::from(OrderError::ProductNotFound(3));
        assert_eq!(err.message(), "Product 3 not found");

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::ProductNotFound);
    }
}
