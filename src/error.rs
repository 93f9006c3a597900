//! Error types for the audit service
//!
//! Provides unified error handling using thiserror.
//!
//! A cache miss is never an error: lookups and updates report absence as
//! `None`. The variants here cover configuration, malformed events and
//! failures on the consumer side of the cache.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Audit Error Enum ==
/// Unified error type for the audit service.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Configuration rejected at startup (e.g. a zero cache capacity)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed inbound event
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Message is not held by the cache (HTTP lookups only)
    #[error("Message not cached: {0}")]
    NotFound(String),

    /// The audit sink failed to deliver a record
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// An event handler panicked and was recovered
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AuditError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuditError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuditError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AuditError::NotFound(_) => StatusCode::NOT_FOUND,
            AuditError::Delivery(_) => StatusCode::BAD_GATEWAY,
            AuditError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the audit service.
pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (AuditError::InvalidConfig("cap".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AuditError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (AuditError::NotFound("42".into()), StatusCode::NOT_FOUND),
            (AuditError::Delivery("sink".into()), StatusCode::BAD_GATEWAY),
            (AuditError::Internal("panic".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.into_response().status(), expected_status);
        }
    }

    #[tokio::test]
    async fn test_error_body_is_json() {
        let response = AuditError::NotFound("1234".into()).into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "Message not cached: 1234");
    }
}
