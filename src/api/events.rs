//! Event Endpoints

use crate::api::AppState;
use crate::auth::api::current_user;
use crate::auth::models::Claims;
use crate::error::ApiError;
use crate::store::{Event, NewEvent};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub date: NaiveDate,
    pub location_id: i64,
}

/// `POST /events` — create an event at an existing location. Runs under
/// optional auth: claims present means the event is owned by the caller.
pub async fn create_event(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Event name must not be empty".to_string()));
    }

    // A stale token on this route degrades to anonymous creation rather
    // than failing the request.
    let user_id = match claims {
        Some(Extension(claims)) => current_user(&state, &claims).ok().map(|u| u.id),
        None => None,
    };

    let event = state.store.create_event(NewEvent {
        name: payload.name,
        date: payload.date,
        location_id: payload.location_id,
        user_id,
    })?;

    Ok(Json(event))
}

/// `GET /events/:id`
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Event>, ApiError> {
    let event = state.store.event_by_id(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(event))
}

/// `GET /users/me/events` — the caller's own events, soonest first.
pub async fn list_my_events(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let user = current_user(&state, &claims)?;
    let events = state.store.events_for_user(user.id)?;
    Ok(Json(events))
}
