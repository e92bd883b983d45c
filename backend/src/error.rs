//! Error types and error handling for the application
//!
//! Every failure is reported to the caller inside the uniform response
//! envelope. Unexpected errors are logged and replaced with a generic message
//! so internal details never reach the client.

use crate::api::envelope::ApiResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message returned to clients for unexpected failures
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed request input
    #[error("{0}")]
    Validation(String),

    /// The requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Lookup miss for the named resource kind, e.g. "Agent not found"
    pub fn not_found(resource: &str) -> Self {
        AppError::NotFound(format!("{} not found", resource))
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match self {
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Unexpected error while handling request");
                GENERIC_ERROR_MESSAGE.to_string()
            }
            other => {
                tracing::debug!(status = %status.as_u16(), error = %other, "Request rejected");
                other.to_string()
            }
        };

        (status, Json(ApiResponse::<()>::failure(error_message))).into_response()
    }
}
