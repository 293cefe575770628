use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use validator::Validate;

use crate::{
    db,
    errors::BookingError,
    models::{BookingCreated, BookingRequest, BookingRow},
    AppState,
};

// ============== Extractors ==============

/// Accepts a request body as JSON or form-encoded, dispatching on the
/// Content-Type header. Anything else gets 415.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(value))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(value))
        } else {
            Err(StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response())
        }
    }
}

// ============== Health Handlers ==============

/// GET /health - liveness probe
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// GET /ready - readiness probe; verifies the store answers a query
pub async fn ready(State(state): State<Arc<AppState>>) -> StatusCode {
    let probe = rusqlite::Connection::open(&state.db_path).and_then(|conn| {
        conn.query_row("SELECT COUNT(*) FROM bookings", [], |row| {
            row.get::<_, i64>(0)
        })
    });

    match probe {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = ?e, "Readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

// ============== API Handlers ==============

/// POST /api/bookings - accept a booking submission
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    JsonOrForm(payload): JsonOrForm<BookingRequest>,
) -> Result<Json<BookingCreated>, BookingError> {
    // Validate input data
    payload.validate()?;

    if state.debug_mode {
        println!(
            "[DEBUG] Booking received: name={}, email={}, phone={}, from={}, to={}, services={}",
            payload.name,
            payload.email,
            payload.phone,
            payload.session_from,
            payload.session_to,
            payload.services.as_deref().unwrap_or("(none)")
        );
    }

    // One connection per request is fine for SQLite WAL at this scale.
    let conn = rusqlite::Connection::open(&state.db_path).map_err(|e| {
        tracing::error!(
            email = %payload.email,
            error = ?e,
            "Failed to open database connection"
        );
        BookingError::InsertFailed(e)
    })?;

    conn.execute_batch(db::CONN_PRAGMAS).map_err(|e| {
        tracing::error!(
            email = %payload.email,
            error = ?e,
            "Failed to set database pragmas"
        );
        BookingError::InsertFailed(e)
    })?;

    let id = db::insert_booking(&conn, &payload).map_err(|e| {
        tracing::error!(
            email = %payload.email,
            session_from = %payload.session_from,
            error = ?e,
            "Failed to insert booking record"
        );
        BookingError::InsertFailed(e)
    })?;

    tracing::info!(id, "Booking saved");

    Ok(Json(BookingCreated {
        message: "Booking request submitted successfully.".to_string(),
        id,
    }))
}

/// GET /api/bookings - list every booking for administrative review
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookingRow>>, BookingError> {
    let conn = rusqlite::Connection::open(&state.db_path).map_err(|e| {
        tracing::error!(error = ?e, "Failed to open database connection");
        BookingError::QueryFailed(e)
    })?;

    conn.execute_batch(db::CONN_PRAGMAS).map_err(|e| {
        tracing::error!(error = ?e, "Failed to set database pragmas");
        BookingError::QueryFailed(e)
    })?;

    let bookings = db::get_all_bookings(&conn).map_err(BookingError::QueryFailed)?;

    Ok(Json(bookings))
}
