//! # Error Handling Middleware
//!
//! Maps the domain error taxonomy onto HTTP responses. Admission-level
//! rejections (stale, duplicate) are not failures: the transport retried or
//! replayed something we already handled, so they answer 200 with no body
//! and no reply is produced.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use booksync_core::errors::BookingError;

/// Application error wrapper that provides HTTP status code mapping.
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BookingError::Parse(_) => StatusCode::BAD_REQUEST,
            BookingError::Upstream(_) => StatusCode::BAD_GATEWAY,
            // Silently accepted: the message was already handled or is too
            // old to act on.
            BookingError::Stale { .. } | BookingError::Duplicate(_) => {
                return StatusCode::OK.into_response();
            }
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}
