use crate::error::{field_error, validate_payload, AppError};
use crate::query::ListQuery;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use atrio_calendar::CalendarDay;
use chrono::{DateTime, Utc};
use atrio_lifecycle::{Booking, BookingStatus, CreateBooking, UpdateBooking};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route(
            "/api/bookings/{id}",
            get(get_booking)
                .put(update_booking)
                .post(update_booking_spoofed)
                .delete(delete_booking),
        )
        .route("/api/bookings/{id}/status", post(set_booking_status))
}

/// GET /api/bookings
/// List bookings, filtered by search/status/month server-side.
async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Booking>> {
    let filter = query.calendar_filter();
    let rows = state
        .directory
        .list_bookings()
        .await
        .into_iter()
        .filter(|b| filter.matches(b) && query.matches_month(b.calendar_date()))
        .collect();
    Json(rows)
}

/// GET /api/bookings/:id
async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    state
        .directory
        .get_booking(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("booking not found".to_string()))
}

/// POST /api/bookings
/// New bookings always start out pending/unpaid.
async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBooking>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    validate_payload(&payload)?;
    check_date_order(payload.check_in, payload.check_out)?;

    let booking = state.directory.create_booking(&payload).await;
    info!("Booking created: {}", booking.reference_code);
    Ok((StatusCode::CREATED, Json(booking)))
}

/// PUT /api/bookings/:id
async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateBooking>,
) -> Result<Json<Booking>, AppError> {
    apply_update(&state, id, update).await
}

/// POST /api/bookings/:id with `_method=PUT` in the body, the spoofing
/// convention the legacy clients use instead of a real PUT.
async fn update_booking_spoofed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<Booking>, AppError> {
    let method = body.get("_method").and_then(Value::as_str).unwrap_or("");
    if !method.eq_ignore_ascii_case("put") {
        return Err(AppError::BadRequest("expected _method=PUT".to_string()));
    }
    let update: UpdateBooking =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    apply_update(&state, id, update).await
}

async fn apply_update(
    state: &AppState,
    id: Uuid,
    update: UpdateBooking,
) -> Result<Json<Booking>, AppError> {
    validate_payload(&update)?;

    let current = state
        .directory
        .get_booking(id)
        .await
        .ok_or_else(|| AppError::NotFound("booking not found".to_string()))?;
    let check_in = update.check_in.unwrap_or(current.check_in);
    let check_out = update.check_out.unwrap_or(current.check_out);
    check_date_order(check_in, check_out)?;

    state
        .directory
        .update_booking(id, &update)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("booking not found".to_string()))
}

/// DELETE /api/bookings/:id
/// Irreversible; refused with 409 once the stay has begun.
async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    match state.directory.delete_booking(id).await {
        None => Err(AppError::NotFound("booking not found".to_string())),
        Some(Err(err)) => Err(AppError::Conflict(err.to_string())),
        Some(Ok(())) => {
            info!("Booking deleted: {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
    }
}

/// POST /api/bookings/:id/status
/// The transition table is enforced here regardless of what the client
/// chose to display: an illegal jump is a 409, an unknown value a 400.
async fn set_booking_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Booking>, AppError> {
    let target: BookingStatus = body
        .status
        .parse()
        .map_err(|err: atrio_lifecycle::TransitionError| AppError::BadRequest(err.to_string()))?;
    match state.directory.transition_booking(id, target).await {
        None => Err(AppError::NotFound("booking not found".to_string())),
        Some(Err(err)) => Err(AppError::Conflict(err.to_string())),
        Some(Ok(booking)) => {
            info!(
                "Booking {} transitioned to {}",
                booking.reference_code, booking.status
            );
            Ok(Json(booking))
        }
    }
}

fn check_date_order(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Result<(), AppError> {
    if check_out <= check_in {
        return Err(field_error("check_out", "check-out must be after check-in"));
    }
    Ok(())
}
