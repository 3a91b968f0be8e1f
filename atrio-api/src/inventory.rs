use crate::error::{validate_payload, AppError};
use crate::query::ListQuery;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use atrio_catalog::{CreateInventoryItem, InventoryItem, StockLevel, UpdateInventoryItem};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Inventory row as served: the stored item plus its derived stock
/// level, recomputed on every read.
#[derive(Debug, Serialize)]
pub struct InventoryItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub stock_level: StockLevel,
}

impl From<InventoryItem> for InventoryItemView {
    fn from(item: InventoryItem) -> Self {
        let stock_level = item.stock_level();
        Self { item, stock_level }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/inventory", get(list_inventory).post(create_item))
        .route(
            "/api/inventory/{id}",
            get(get_item)
                .put(update_item)
                .post(update_item_spoofed)
                .delete(delete_item),
        )
}

async fn list_inventory(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<InventoryItemView>> {
    let rows = state
        .directory
        .list_inventory()
        .await
        .into_iter()
        .filter(|i| query.search_matches(&[&i.name, &i.category]))
        .map(InventoryItemView::from)
        // The stock tab filters on the derived level, not a stored status
        .filter(|view| query.status_matches(view.stock_level.as_str()))
        .collect();
    Json(rows)
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InventoryItemView>, AppError> {
    state
        .directory
        .get_inventory_item(id)
        .await
        .map(|item| Json(InventoryItemView::from(item)))
        .ok_or_else(|| AppError::NotFound("inventory item not found".to_string()))
}

async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateInventoryItem>,
) -> Result<(StatusCode, Json<InventoryItemView>), AppError> {
    validate_payload(&payload)?;
    let item = state.directory.create_inventory_item(&payload).await;
    Ok((StatusCode::CREATED, Json(InventoryItemView::from(item))))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateInventoryItem>,
) -> Result<Json<InventoryItemView>, AppError> {
    apply_update(&state, id, update).await
}

async fn update_item_spoofed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<InventoryItemView>, AppError> {
    let method = body.get("_method").and_then(Value::as_str).unwrap_or("");
    if !method.eq_ignore_ascii_case("put") {
        return Err(AppError::BadRequest("expected _method=PUT".to_string()));
    }
    let update: UpdateInventoryItem =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    apply_update(&state, id, update).await
}

async fn apply_update(
    state: &AppState,
    id: Uuid,
    update: UpdateInventoryItem,
) -> Result<Json<InventoryItemView>, AppError> {
    validate_payload(&update)?;
    state
        .directory
        .update_inventory_item(id, &update)
        .await
        .map(|item| Json(InventoryItemView::from(item)))
        .ok_or_else(|| AppError::NotFound("inventory item not found".to_string()))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.directory.delete_inventory_item(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("inventory item not found".to_string()))
    }
}
