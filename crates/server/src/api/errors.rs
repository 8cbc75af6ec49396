//! API error types mapped to HTTP status codes.
//!
//! Each [`ApiError`] variant maps to a specific HTTP status code and produces
//! a JSON response body `{"message": "..."}`. Validation failures add an
//! `errors` array with one entry per offending field.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use studymitra_core::validate::FieldError;

/// Application-level error type that implements `IntoResponse`.
///
/// Each variant maps to an HTTP status code:
/// - `Validation` → 400 (with field errors)
/// - `BadRequest` → 400
/// - `Unauthorized` → 401
/// - `NotFound` → 404
/// - `Internal` → 500
#[derive(Debug)]
pub enum ApiError {
    /// Create payload failed shape validation (400).
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },
    /// Malformed or incomplete request (400).
    BadRequest(String),
    /// Bad credentials (401).
    Unauthorized(String),
    /// Unknown id (404).
    NotFound(String),
    /// Unexpected server error (500). The message is generic; details go to the log.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { message, errors } => {
                let body = axum::Json(json!({ "message": message, "errors": errors }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            other => {
                let (status, message) = match other {
                    ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
                    ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
                    ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
                    ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
                    ApiError::Validation { .. } => unreachable!(),
                };
                let body = axum::Json(json!({ "message": message }));
                (status, body).into_response()
            }
        }
    }
}
