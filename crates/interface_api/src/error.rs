//! API error handling
//!
//! Maps domain errors onto HTTP responses with a small JSON envelope.
//! Validation failures and rejected payments surface as 400s carrying the
//! specific reason; internal failures are logged server-side and surfaced
//! generically.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_invoicing::InvoicingError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Internal(msg) => {
                // Full detail stays in the logs; callers get a generic reply
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<InvoicingError> for ApiError {
    fn from(err: InvoicingError) -> Self {
        match err {
            InvoicingError::Validation(msg) => ApiError::BadRequest(msg),
            InvoicingError::Payment(rejection) => ApiError::BadRequest(rejection.to_string()),
            InvoicingError::NotFound(msg) => ApiError::NotFound(msg),
            InvoicingError::AccessDenied(msg) => ApiError::Forbidden(msg),
            InvoicingError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::PortError;
    use domain_invoicing::PaymentRejection;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rejected_payment_maps_to_bad_request() {
        let err: ApiError = InvoicingError::from(PaymentRejection::ExceedsBalance {
            balance_due: dec!(70),
        })
        .into();

        match err {
            ApiError::BadRequest(msg) => assert!(msg.contains("70.00")),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_access_denied_maps_to_forbidden() {
        let err: ApiError = InvoicingError::access_denied("not yours").into();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_store_failure_maps_to_internal() {
        let err: ApiError = InvoicingError::Store(PortError::internal("pg down")).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
