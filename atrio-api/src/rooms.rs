use crate::bookings::StatusBody;
use crate::error::{validate_payload, AppError};
use crate::query::ListQuery;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use atrio_catalog::{CreateRoom, Room, RoomStatus, UpdateRoom};
use serde_json::Value;
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/rooms", get(list_rooms).post(create_room))
        .route(
            "/api/rooms/{id}",
            get(get_room)
                .put(update_room)
                .post(update_room_spoofed)
                .delete(delete_room),
        )
        .route("/api/rooms/{id}/status", post(set_room_status))
}

async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Room>> {
    let rows = state
        .directory
        .list_rooms()
        .await
        .into_iter()
        .filter(|r| {
            query.search_matches(&[&r.number, &r.room_type])
                && query.status_matches(r.status.as_str())
        })
        .collect();
    Json(rows)
}

async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Room>, AppError> {
    state
        .directory
        .get_room(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("room not found".to_string()))
}

async fn create_room(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoom>,
) -> Result<(StatusCode, Json<Room>), AppError> {
    validate_payload(&payload)?;
    let room = state.directory.create_room(&payload).await;
    Ok((StatusCode::CREATED, Json(room)))
}

async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateRoom>,
) -> Result<Json<Room>, AppError> {
    apply_update(&state, id, update).await
}

async fn update_room_spoofed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<Room>, AppError> {
    let method = body.get("_method").and_then(Value::as_str).unwrap_or("");
    if !method.eq_ignore_ascii_case("put") {
        return Err(AppError::BadRequest("expected _method=PUT".to_string()));
    }
    let update: UpdateRoom =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    apply_update(&state, id, update).await
}

async fn apply_update(
    state: &AppState,
    id: Uuid,
    update: UpdateRoom,
) -> Result<Json<Room>, AppError> {
    validate_payload(&update)?;
    state
        .directory
        .update_room(id, &update)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("room not found".to_string()))
}

async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.directory.delete_room(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("room not found".to_string()))
    }
}

/// Rooms have no lifecycle: the desk toggles freely between available
/// and maintenance, only the value itself is checked.
async fn set_room_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Room>, AppError> {
    let status: RoomStatus = body
        .status
        .parse()
        .map_err(|err: atrio_lifecycle::TransitionError| AppError::BadRequest(err.to_string()))?;
    state
        .directory
        .set_room_status(id, status)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("room not found".to_string()))
}
