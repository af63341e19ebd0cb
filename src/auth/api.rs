//! Authentication Endpoints
//! Mission: Signup, login, and the current-user lookup

use crate::api::AppState;
use crate::auth::models::{Claims, SignupRequest, TokenRequest, TokenResponse};
use crate::auth::password::{hash_password, verify_password};
use crate::error::ApiError;
use crate::store::{NewUser, User};
use axum::{extract::State, Extension, Form, Json};
use chrono::Duration;
use serde_json::{json, Value};
use tracing::{info, warn};

/// `POST /signup` — register a new account.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<Value>, ApiError> {
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(ApiError::Validation("A valid email is required".to_string()));
    }
    if payload.password.is_empty() {
        return Err(ApiError::Validation("Password must not be empty".to_string()));
    }
    if payload.username.trim().is_empty() {
        return Err(ApiError::Validation("Username must not be empty".to_string()));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        warn!("password hashing failed: {e}");
        ApiError::Internal
    })?;

    let user = state.store.create_user(NewUser {
        username: payload.username,
        email: payload.email,
        password_hash,
        occupation: payload.occupation,
        fcm_token: payload.fcm_token,
        location_id: payload.location_id,
    })?;

    info!(user_id = user.id, "signup complete");

    Ok(Json(json!({ "message": "User created successfully" })))
}

/// `POST /token` — login with an urlencoded form whose `username` field
/// carries the email. Absent user and wrong password are indistinguishable
/// to the caller.
pub async fn token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state.store.user_by_email(&form.username)?;

    let user = match user {
        Some(u) if verify_password(&form.password, &u.password_hash) => u,
        _ => {
            warn!(email = %form.username, "failed login attempt");
            return Err(ApiError::Unauthenticated);
        }
    };

    let ttl = Duration::minutes(state.token_expire_minutes);
    let access_token = state.tokens.issue(&user.email, Some(ttl)).map_err(|e| {
        warn!("token issuance failed: {e}");
        ApiError::Internal
    })?;

    info!(user_id = user.id, "login successful");

    Ok(Json(TokenResponse::bearer(access_token)))
}

/// `GET /users/me` — profile of the authenticated caller.
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<User>, ApiError> {
    let user = current_user(&state, &claims)?;
    Ok(Json(user))
}

/// Resolve the token subject to a live user row. A token whose subject no
/// longer exists is treated as invalid.
pub(crate) fn current_user(state: &AppState, claims: &Claims) -> Result<User, ApiError> {
    state
        .store
        .user_by_email(&claims.sub)?
        .ok_or(ApiError::InvalidToken)
}
