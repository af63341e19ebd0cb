//! Location Endpoints

use crate::api::AppState;
use crate::error::ApiError;
use crate::store::Location;
use axum::{extract::State, Json};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
}

/// `POST /locations`
pub async fn create_location(
    State(state): State<AppState>,
    Json(payload): Json<CreateLocationRequest>,
) -> Result<Json<Location>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation(
            "Location name must not be empty".to_string(),
        ));
    }

    let location = state.store.create_location(payload.name.trim())?;
    Ok(Json(location))
}

/// `GET /locations`
pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Location>>, ApiError> {
    let locations = state.store.list_locations()?;
    Ok(Json(locations))
}
