//! Error types for Prism
//!
//! HTTP-facing errors. Every error body is `{"error": "<message>"}`, with a
//! `kind` field added when the failure was classified by the gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::gateway::{ErrorKind, Failure};

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{}", .0.message)]
    Gateway(Failure),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Display-ready message
    #[schema(example = "Missing required fields: endpointUrl or model")]
    pub error: String,
    /// Classified failure kind, present for gateway failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl From<Failure> for AppError {
    fn from(failure: Failure) -> Self {
        AppError::Gateway(failure)
    }
}

impl AppError {
    /// Request-shape problems are 400; everything upstream is collapsed to 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Gateway(failure) if failure.kind.is_caller_error() => StatusCode::BAD_REQUEST,
            AppError::Gateway(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::BadRequest(message) => ErrorResponse {
                error: message,
                kind: None,
            },
            AppError::Gateway(failure) => ErrorResponse {
                error: failure.message,
                kind: Some(failure.kind),
            },
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    kind: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
