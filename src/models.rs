use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Incoming booking submission, accepted as JSON or form-encoded.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct BookingRequest {
    #[validate(length(min = 1, max = 256), custom(function = "validate_no_control_chars"))]
    pub name: String,
    #[validate(email, length(max = 256))]
    pub email: String,
    #[validate(length(min = 1, max = 64), custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(custom(function = "validate_session_marker"))]
    pub session_from: String,
    #[validate(custom(function = "validate_session_marker"))]
    pub session_to: String,
    /// Comma-separated list of requested service names.
    #[validate(length(max = 1024), custom(function = "validate_no_control_chars"))]
    pub services: Option<String>,
    #[validate(length(max = 2048))]
    pub special_request: Option<String>,
}

/// Represents a row from the bookings table
#[derive(Debug, Serialize)]
pub struct BookingRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub session_from: String,
    pub session_to: String,
    pub services: Option<String>,
    pub special_request: Option<String>,
    pub status: String,
}

/// Success body for a booking submission
#[derive(Debug, Serialize)]
pub struct BookingCreated {
    pub message: String,
    pub id: i64,
}

/// Validates that a string contains no control characters
/// Works for both required and optional fields (called on inner String when Option is Some)
fn validate_no_control_chars(s: &str) -> Result<(), ValidationError> {
    if s.chars().any(char::is_control) {
        Err(ValidationError::new("control_characters"))
    } else {
        Ok(())
    }
}

/// Validates a phone number: digits plus common separators, at least one digit
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let chars_ok = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '));
    if chars_ok && phone.chars().any(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone"))
    }
}

/// Validates a session marker: local datetime (`2024-01-01T10:00`, with
/// optional seconds) or a full RFC3339 timestamp
fn validate_session_marker(ts: &str) -> Result<(), ValidationError> {
    let ok = chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M").is_ok()
        || chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S").is_ok()
        || chrono::DateTime::parse_from_rfc3339(ts).is_ok();
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_session_marker"))
    }
}
