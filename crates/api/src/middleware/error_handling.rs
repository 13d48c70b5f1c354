//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error responses so the
//! whole API surfaces failures consistently: validation errors as 400,
//! state-dependent conflicts as 409, missing resources as 404, and
//! authorization failures as 403. Every failure signal of the booking
//! engine keeps its own variant, so callers can render a precise message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotbook_core::errors::BookingError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain `BookingError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_)
            | BookingError::InvalidDuration(_)
            | BookingError::WindowTooShort(_)
            | BookingError::InvalidTimestamp(_) => StatusCode::BAD_REQUEST,
            BookingError::ScheduleOverlap(_)
            | BookingError::DuplicateRequest(_)
            | BookingError::HostUnavailable(_)
            | BookingError::GuestUnavailable(_) => StatusCode::CONFLICT,
            BookingError::Unauthorized(_) => StatusCode::FORBIDDEN,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Allows using `?` with functions returning `Result<T, BookingError>`.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Allows using `?` with functions returning `Result<T, eyre::Report>`,
/// wrapping the report in `BookingError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}

/// Allows using `?` directly on sqlx transaction begin/commit calls.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError(BookingError::Database(err.into()))
    }
}
