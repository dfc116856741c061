//! Error types for the mapp gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("artifact not found: {0}")]
    NotFound(String),

    #[error("{message}")]
    Backend {
        /// Short fixed string returned to the client.
        message: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("could not resolve a unique name for {0}")]
    NameResolutionExhausted(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wrap a backend failure with the fixed client-facing message for the
    /// operation that hit it.
    pub fn backend(message: &'static str, source: StorageError) -> Self {
        AppError::Backend { message, source }
    }
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("backend connection failed: {0}")]
    ConnectionFailed(String),

    #[error("backend SDK error: {0}")]
    Sdk(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
            AppError::NotFound(name) => {
                tracing::debug!(%name, "artifact not found");
                (StatusCode::NOT_FOUND, "App not found".to_string())
            }
            AppError::Backend { message, source } => {
                tracing::error!(error = %source, "storage backend error");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::NameResolutionExhausted(name) => {
                tracing::error!(%name, "unique name resolution exhausted");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not allocate a unique filename".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { error: message });

        (status, body).into_response()
    }
}
