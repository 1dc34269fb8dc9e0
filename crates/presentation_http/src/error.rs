//! API error handling
//!
//! Error responses carry a single `detail` field, matching the compute
//! service's own error shape so clients see one format end to end.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream error ({status}): {detail}")]
    Upstream { status: u16, detail: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error detail
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Upstream { status, detail } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                detail,
            ),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::Upstream { status, detail } => Self::Upstream { status, detail },
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_message() {
        let err = ApiError::BadRequest("'points' field must be an array.".to_string());
        assert_eq!(
            err.to_string(),
            "Bad request: 'points' field must be an array."
        );
    }

    #[test]
    fn upstream_error_message() {
        let err = ApiError::Upstream {
            status: 503,
            detail: "busy".to_string(),
        };
        assert_eq!(err.to_string(), "Upstream error (503): busy");
    }

    #[test]
    fn into_response_bad_request() {
        let err = ApiError::BadRequest("invalid".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn into_response_upstream_uses_upstream_status() {
        let err = ApiError::Upstream {
            status: 503,
            detail: "busy".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn into_response_upstream_invalid_status_falls_back_to_500() {
        let err = ApiError::Upstream {
            status: 99,
            detail: "weird".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn into_response_internal() {
        let err = ApiError::Internal("crash".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn application_upstream_converts() {
        let source = ApplicationError::upstream(Some(503), Some("busy".to_string()));
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::Upstream { status: 503, .. }));
    }

    #[test]
    fn application_domain_converts_to_bad_request() {
        let source: ApplicationError =
            domain::DomainError::ValidationError("'points' array must not be empty.".to_string())
                .into();
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::BadRequest(_)));
    }

    #[test]
    fn application_internal_converts() {
        let source = ApplicationError::Internal("crash".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::Internal(_)));
    }

    #[test]
    fn error_response_serialization() {
        let resp = ErrorResponse {
            detail: "busy".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"detail":"busy"}"#);
    }
}
