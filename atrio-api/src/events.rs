use crate::bookings::StatusBody;
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
use atrio_lifecycle::{CreateEvent, Event, EventStatus, UpdateEvent};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route(
            "/api/events/{id}",
            get(get_event)
                .put(update_event)
                .post(update_event_spoofed)
                .delete(delete_event),
        )
        .route("/api/events/{id}/status", post(set_event_status))
}

async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Event>> {
    let filter = query.calendar_filter();
    let rows = state
        .directory
        .list_events()
        .await
        .into_iter()
        .filter(|e| filter.matches(e) && query.matches_month(e.calendar_date()))
        .collect();
    Json(rows)
}

async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, AppError> {
    state
        .directory
        .get_event(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("event not found".to_string()))
}

async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEvent>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    validate_payload(&payload)?;
    if !payload.times_ordered() {
        return Err(field_error("end_time", "end time must be after start time"));
    }

    let event = state.directory.create_event(&payload).await;
    info!("Event created: {}", event.reference_code);
    Ok((StatusCode::CREATED, Json(event)))
}

async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateEvent>,
) -> Result<Json<Event>, AppError> {
    apply_update(&state, id, update).await
}

async fn update_event_spoofed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<Event>, AppError> {
    let method = body.get("_method").and_then(Value::as_str).unwrap_or("");
    if !method.eq_ignore_ascii_case("put") {
        return Err(AppError::BadRequest("expected _method=PUT".to_string()));
    }
    let update: UpdateEvent =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    apply_update(&state, id, update).await
}

async fn apply_update(
    state: &AppState,
    id: Uuid,
    update: UpdateEvent,
) -> Result<Json<Event>, AppError> {
    validate_payload(&update)?;

    let current = state
        .directory
        .get_event(id)
        .await
        .ok_or_else(|| AppError::NotFound("event not found".to_string()))?;
    let start = update.start_time.unwrap_or(current.start_time);
    let end = update.end_time.unwrap_or(current.end_time);
    if end <= start {
        return Err(field_error("end_time", "end time must be after start time"));
    }

    state
        .directory
        .update_event(id, &update)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("event not found".to_string()))
}

async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    match state.directory.delete_event(id).await {
        None => Err(AppError::NotFound("event not found".to_string())),
        Some(Err(err)) => Err(AppError::Conflict(err.to_string())),
        Some(Ok(())) => {
            info!("Event deleted: {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
    }
}

async fn set_event_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Event>, AppError> {
    let target: EventStatus = body
        .status
        .parse()
        .map_err(|err: atrio_lifecycle::TransitionError| AppError::BadRequest(err.to_string()))?;
    match state.directory.transition_event(id, target).await {
        None => Err(AppError::NotFound("event not found".to_string())),
        Some(Err(err)) => Err(AppError::Conflict(err.to_string())),
        Some(Ok(event)) => {
            info!(
                "Event {} transitioned to {}",
                event.reference_code, event.status
            );
            Ok(Json(event))
        }
    }
}
