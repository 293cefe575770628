use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for the booking endpoints
#[derive(Debug)]
pub enum BookingError {
    /// Validation failed on submitted booking data
    ValidationFailed(validator::ValidationErrors),
    /// Database failure while saving a booking
    InsertFailed(rusqlite::Error),
    /// Database failure while listing bookings
    QueryFailed(rusqlite::Error),
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        match self {
            Self::ValidationFailed(e) => {
                // Log detailed validation errors internally
                tracing::warn!(
                    validation_errors = ?e,
                    "Booking validation failed"
                );
                // Name the offending fields, never the stored detail
                let field_errors = e.field_errors();
                let mut fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
                fields.sort_unstable();
                let error = if fields.is_empty() {
                    "Invalid booking request.".to_string()
                } else {
                    format!("Invalid booking request: {}.", fields.join(", "))
                };
                (StatusCode::BAD_REQUEST, Json(json!({ "error": error }))).into_response()
            }
            Self::InsertFailed(e) => {
                // Log detailed database error internally
                tracing::error!(
                    database_error = ?e,
                    "Failed to save booking"
                );
                // Return generic error to client
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to save booking request." })),
                )
                    .into_response()
            }
            Self::QueryFailed(e) => {
                tracing::error!(
                    database_error = ?e,
                    "Failed to retrieve bookings"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to retrieve bookings." })),
                )
                    .into_response()
            }
        }
    }
}

// Implement From for convenient error conversion with `?`
impl From<validator::ValidationErrors> for BookingError {
    fn from(e: validator::ValidationErrors) -> Self {
        BookingError::ValidationFailed(e)
    }
}
