//! Checklist Item Endpoints

use crate::api::AppState;
use crate::error::ApiError;
use crate::store::{Item, NewItem};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub event_id: i64,
    #[serde(default)]
    pub is_checked: bool,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct SetCheckedRequest {
    pub is_checked: bool,
}

/// `POST /items` — attach a checklist entry to an existing event.
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<Json<Item>, ApiError> {
    let item = state.store.create_item(NewItem {
        event_id: payload.event_id,
        is_checked: payload.is_checked,
        notes: payload.notes,
    })?;

    Ok(Json(item))
}

/// `GET /events/:id/items`
pub async fn list_event_items(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Vec<Item>>, ApiError> {
    // 404 for a bogus event rather than an empty list.
    state
        .store
        .event_by_id(event_id)?
        .ok_or(ApiError::NotFound)?;

    let items = state.store.items_for_event(event_id)?;
    Ok(Json(items))
}

/// `PATCH /items/:id/checked`
pub async fn set_item_checked(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SetCheckedRequest>,
) -> Result<Json<Item>, ApiError> {
    state.store.set_item_checked(id, payload.is_checked)?;
    let item = state.store.item_by_id(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(item))
}
