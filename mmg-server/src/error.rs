//! Error types for mmg-server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for mmg-server
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog endpoint unreachable or returned an error status
    #[error("Catalog fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Catalog body was not valid JSON
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog body had an unexpected shape
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Operation not allowed in the current game phase
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Clicked title is not on screen
    #[error("Unknown card: {0}")]
    UnknownCard(String),
}

/// Convenience Result type using mmg-server Error
pub type Result<T> = std::result::Result<T, Error>;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Conflict with the current game phase (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::UnknownCard(title) => ApiError::NotFound(format!("card not on screen: {}", title)),
            Error::InvalidState(msg) => ApiError::Conflict(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;
