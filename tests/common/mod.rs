use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use studio_booking_server::{db, handlers, AppState};
use tempfile::NamedTempFile;

/// Creates a test application with a temporary SQLite database.
/// Returns the router and the temp file (which must be kept alive for the duration of the test).
pub fn setup_test_app() -> (Router, NamedTempFile) {
    let temp_db = NamedTempFile::new().expect("Failed to create temp db file");
    let db_path = temp_db.path().to_str().unwrap().to_string();

    // Initialize the database schema
    db::open_and_init(&db_path).expect("Failed to initialize test database");

    let state = Arc::new(AppState {
        db_path,
        session_secret: None,
        debug_mode: false,
    });

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route(
            "/api/bookings",
            post(handlers::create_booking).get(handlers::list_bookings),
        )
        .with_state(state);

    (app, temp_db)
}

/// Creates a valid booking JSON payload for testing.
#[allow(dead_code)]
pub fn valid_booking_json() -> String {
    serde_json::json!({
        "name": "Jo",
        "email": "jo@x.com",
        "phone": "555",
        "session_from": "2024-01-01T10:00",
        "session_to": "2024-01-01T11:00"
    })
    .to_string()
}

/// Creates a booking JSON with custom values.
#[allow(dead_code)]
pub fn booking_json_with(name: &str, email: &str, from: &str, to: &str) -> String {
    serde_json::json!({
        "name": name,
        "email": email,
        "phone": "555-0100",
        "session_from": from,
        "session_to": to,
        "services": "Portrait",
        "special_request": null
    })
    .to_string()
}
