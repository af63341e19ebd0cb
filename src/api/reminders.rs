//! Reminder Endpoints

use crate::api::AppState;
use crate::auth::api::current_user;
use crate::auth::models::Claims;
use crate::error::ApiError;
use crate::store::{NewReminder, Reminder};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CreateReminderRequest {
    pub title: String,
    pub schedule_date: NaiveDate,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// `POST /reminders` — create a reminder owned by the caller.
pub async fn create_reminder(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateReminderRequest>,
) -> Result<Json<Reminder>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation(
            "Reminder title must not be empty".to_string(),
        ));
    }

    let user = current_user(&state, &claims)?;

    let reminder = state.store.create_reminder(NewReminder {
        user_id: user.id,
        title: payload.title,
        schedule_date: payload.schedule_date,
        is_active: payload.is_active,
        message: payload.message,
    })?;

    Ok(Json(reminder))
}

/// `GET /users/me/reminders`
pub async fn list_my_reminders(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Reminder>>, ApiError> {
    let user = current_user(&state, &claims)?;
    let reminders = state.store.reminders_for_user(user.id)?;
    Ok(Json(reminders))
}

/// `PATCH /reminders/:id/active` — toggle one of the caller's reminders.
pub async fn set_reminder_active(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<Json<Reminder>, ApiError> {
    let user = current_user(&state, &claims)?;

    // Another user's reminder is indistinguishable from a missing one.
    let reminder = state.store.reminder_by_id(id)?.ok_or(ApiError::NotFound)?;
    if reminder.user_id != user.id {
        return Err(ApiError::NotFound);
    }

    state.store.set_reminder_active(id, payload.is_active)?;
    let reminder = state.store.reminder_by_id(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(reminder))
}
