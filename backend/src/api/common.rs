//! Error handling utilities for API responses.
//!
//! Provides the conversion between service-layer errors and HTTP responses.
//! All failures come back as `{"message": ...}` with the status the operation
//! contract requires; internal detail (store errors, provider errors) is
//! logged server-side and never echoed to the caller.

use crate::errors::ServiceError;
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

/// JSON error body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type HttpError = (StatusCode, Json<ErrorBody>);

/// Maps a `ServiceError` to the HTTP status + JSON body for the boundary.
pub fn service_error_to_http(error: ServiceError) -> HttpError {
    let (status, message) = match &error {
        ServiceError::Validation { .. } | ServiceError::AlreadyExists { .. } => {
            (StatusCode::BAD_REQUEST, error.to_string())
        }
        ServiceError::InvalidCredentials
        | ServiceError::InvalidToken
        | ServiceError::Unauthenticated { .. } => (StatusCode::UNAUTHORIZED, error.to_string()),
        ServiceError::Forbidden { .. } => (StatusCode::FORBIDDEN, error.to_string()),
        ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, error.to_string()),
        ServiceError::Database { .. }
        | ServiceError::ExternalService { .. }
        | ServiceError::Internal { .. } => {
            tracing::error!(error = %error, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };

    (status, Json(ErrorBody::new(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_the_error_taxonomy() {
        let cases = [
            (
                service_error_to_http(ServiceError::already_exists("User", "a@b.c")).0,
                StatusCode::BAD_REQUEST,
            ),
            (
                service_error_to_http(ServiceError::InvalidCredentials).0,
                StatusCode::UNAUTHORIZED,
            ),
            (
                service_error_to_http(ServiceError::InvalidToken).0,
                StatusCode::UNAUTHORIZED,
            ),
            (
                service_error_to_http(ServiceError::forbidden("Admin access required")).0,
                StatusCode::FORBIDDEN,
            ),
            (
                service_error_to_http(ServiceError::not_found("Review", "x")).0,
                StatusCode::NOT_FOUND,
            ),
            (
                service_error_to_http(ServiceError::internal("boom")).0,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (actual, expected) in cases {
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn internal_errors_do_not_leak_detail() {
        let (_, Json(body)) =
            service_error_to_http(ServiceError::internal("connection pool exhausted"));
        assert_eq!(body.message, "Internal server error");
    }
}
