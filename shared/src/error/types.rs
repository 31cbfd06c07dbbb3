//! Application error type and its JSON response

use super::codes::ErrorCode;
use http::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error type every storefront handler ends in:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages (store messages are kept verbatim)
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

// ===== Axum Integration =====

/// Renders `{"error": message, "code": n}` plus `details` when present,
/// with the status from [`ErrorCode::http_status`].
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        let mut body = serde_json::json!({
            "error": self.message,
            "code": self.code.code(),
        });
        if let Some(details) = self.details {
            body["details"] = Value::Object(details.into_iter().collect());
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::ProductNotFound);
        assert_eq!(err.code, ErrorCode::ProductNotFound);
        assert_eq!(err.message, "Product not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "name must not be empty");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "name must not be empty");
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::new(ErrorCode::ProductOutOfStock)
            .with_detail("requested", 2)
            .with_detail("available", 1);

        let details = err.details.unwrap();
        assert_eq!(details.get("requested").unwrap(), 2);
        assert_eq!(details.get("available").unwrap(), 1);
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::ProductNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::new(ErrorCode::ProductOutOfStock).http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::database("connection refused").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::validation("Invalid input");
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = AppError::database("deadlock detected");
        assert_eq!(err.code, ErrorCode::DatabaseError);

        let err = AppError::invalid_request("bad body");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn test_app_error_display_is_message() {
        let err = AppError::database("relation \"orders\" does not exist");
        assert_eq!(format!("{}", err), "relation \"orders\" does not exist");
    }

    async fn response_json(err: AppError) -> (StatusCode, Value) {
        use axum::response::IntoResponse;
        use http_body_util::BodyExt;

        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let (status, body) = response_json(AppError::new(ErrorCode::ProductNotFound)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            serde_json::json!({ "error": "Product not found", "code": 6001 })
        );
    }

    #[tokio::test]
    async fn test_into_response_keeps_details_and_store_text() {
        let err = AppError::with_message(ErrorCode::ProductOutOfStock, "Only 1 left")
            .with_detail("available", 1);
        let (status, body) = response_json(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 6003);
        assert_eq!(body["details"]["available"], 1);

        let (status, body) = response_json(AppError::database("deadlock detected")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "deadlock detected");
        assert_eq!(body["code"], 9002);
        assert!(body.get("details").is_none());
    }
}
