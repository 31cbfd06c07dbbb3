//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::ProductNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::ProductOutOfStock | Self::ProductHasOrders => StatusCode::CONFLICT,

            // 503 Service Unavailable (client can retry)
            Self::NetworkError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation errors)
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::OrderInvalidQuantity
            | Self::ProductInvalidPrice => StatusCode::BAD_REQUEST,
        }
    }
}
