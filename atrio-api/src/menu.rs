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
use atrio_catalog::{CreateMenuItem, MenuItem, MenuStatus, UpdateMenuItem};
use serde_json::Value;
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/menu", get(list_menu).post(create_item))
        .route(
            "/api/menu/{id}",
            get(get_item)
                .put(update_item)
                .post(update_item_spoofed)
                .delete(delete_item),
        )
        .route("/api/menu/{id}/status", post(set_menu_status))
}

async fn list_menu(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<MenuItem>> {
    let rows = state
        .directory
        .list_menu()
        .await
        .into_iter()
        .filter(|m| {
            query.search_matches(&[&m.name, &m.category])
                && query.status_matches(m.status.as_str())
        })
        .collect();
    Json(rows)
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MenuItem>, AppError> {
    state
        .directory
        .get_menu_item(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("menu item not found".to_string()))
}

async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateMenuItem>,
) -> Result<(StatusCode, Json<MenuItem>), AppError> {
    validate_payload(&payload)?;
    let item = state.directory.create_menu_item(&payload).await;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateMenuItem>,
) -> Result<Json<MenuItem>, AppError> {
    apply_update(&state, id, update).await
}

async fn update_item_spoofed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<MenuItem>, AppError> {
    let method = body.get("_method").and_then(Value::as_str).unwrap_or("");
    if !method.eq_ignore_ascii_case("put") {
        return Err(AppError::BadRequest("expected _method=PUT".to_string()));
    }
    let update: UpdateMenuItem =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    apply_update(&state, id, update).await
}

async fn apply_update(
    state: &AppState,
    id: Uuid,
    update: UpdateMenuItem,
) -> Result<Json<MenuItem>, AppError> {
    validate_payload(&update)?;
    state
        .directory
        .update_menu_item(id, &update)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("menu item not found".to_string()))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.directory.delete_menu_item(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("menu item not found".to_string()))
    }
}

async fn set_menu_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody>,
) -> Result<Json<MenuItem>, AppError> {
    let status: MenuStatus = body
        .status
        .parse()
        .map_err(|err: atrio_lifecycle::TransitionError| AppError::BadRequest(err.to_string()))?;
    state
        .directory
        .set_menu_status(id, status)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("menu item not found".to_string()))
}
