// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// A stored row violates a canonical-record invariant.
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// The store or the generative model could not be reached.
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    /// The store answered an insert with a non-empty list of row errors.
    #[error("Write rejected: {}", .0.join("; "))]
    WriteRejected(Vec<String>),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for failures caused by a collaborator rather than by the caller or the data.
    pub fn is_upstream(&self) -> bool {
        matches!(self, AppError::Upstream(_) | AppError::WriteRejected(_))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::DataIntegrity(msg) => {
                tracing::error!(error = %msg, "Data integrity error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "data_integrity_error",
                    None,
                )
            }
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "Upstream unavailable");
                (StatusCode::BAD_GATEWAY, "upstream_unavailable", None)
            }
            AppError::WriteRejected(errors) => {
                tracing::error!(errors = ?errors, "Write rejected by store");
                (StatusCode::BAD_GATEWAY, "write_rejected", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
