//! API Module
//! Mission: Shared handler state and route assembly

pub mod events;
pub mod items;
pub mod locations;
pub mod reminders;

use crate::auth::{api as auth_api, auth_middleware, optional_auth_middleware, TokenService};
use crate::store::Store;
use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared handler state. Cheap to clone; one copy per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub tokens: Arc<TokenService>,
    /// Expiry window for tokens issued at login, in minutes.
    pub token_expire_minutes: i64,
}

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    // Open endpoints: liveness, registration, login, and the location
    // directory signup may reference.
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/signup", post(auth_api::signup))
        .route("/token", post(auth_api::token))
        .route(
            "/locations",
            get(locations::list_locations).post(locations::create_location),
        )
        .with_state(state.clone());

    // Event creation stays open to match the original wire contract, but a
    // valid bearer token binds the event to its caller.
    let event_routes = Router::new()
        .route("/events", post(events::create_event))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            optional_auth_middleware,
        ))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/users/me", get(auth_api::me))
        .route("/users/me/events", get(events::list_my_events))
        .route("/users/me/reminders", get(reminders::list_my_reminders))
        .route("/events/:id", get(events::get_event))
        .route("/events/:id/items", get(items::list_event_items))
        .route("/items", post(items::create_item))
        .route("/items/:id/checked", patch(items::set_item_checked))
        .route("/reminders", post(reminders::create_reminder))
        .route(
            "/reminders/:id/active",
            patch(reminders::set_reminder_active),
        )
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(event_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Liveness probe.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
