//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::models::ModelError;
use crate::pipeline::extraction::{ExtractionError, ExtractionErrorKind};
use crate::report::RenderError;
use crate::session::SessionError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("File too large: {0}")]
    TooLarge(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Extraction service failed: {0}")]
    Upstream(String),
    #[error("Unusable extraction response: {0}")]
    Unprocessable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail),
            ApiError::TooLarge(detail) => (StatusCode::BAD_REQUEST, "REQUEST_TOO_LARGE", detail),
            ApiError::Conflict(detail) => (StatusCode::CONFLICT, "CONFLICT", detail),
            ApiError::Upstream(detail) => {
                tracing::warn!(detail = %detail, "Extraction upstream failure");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_FAILURE", detail)
            }
            ApiError::Unprocessable(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPARSABLE_RESPONSE",
                detail,
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ExtractionError> for ApiError {
    fn from(err: ExtractionError) -> Self {
        match err.kind() {
            ExtractionErrorKind::RequestTooLarge => ApiError::TooLarge(err.to_string()),
            ExtractionErrorKind::UpstreamFailure => ApiError::Upstream(err.to_string()),
            ExtractionErrorKind::UnparsableResponse => ApiError::Unprocessable(err.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::FileNotFound { .. } | SessionError::SessionNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            SessionError::InvalidTransition { .. } | SessionError::NoData => {
                ApiError::Conflict(err.to_string())
            }
            SessionError::CategoryMismatch { .. } | SessionError::InvalidPolicy(_) => {
                ApiError::BadRequest(err.to_string())
            }
            SessionError::LockPoisoned => ApiError::Internal("lock poisoned".into()),
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::UnsupportedFormat(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("background task failed: {err}"))
    }
}
