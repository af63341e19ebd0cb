//! Planner Backend
//! Mission: Event-planning API with token auth over SQLite

use anyhow::{Context, Result};
use planner_backend::{
    api::{app, AppState},
    auth::TokenService,
    config::{load_env, Config},
    store::Store,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();

    let config = Config::from_env()?;

    let store = Arc::new(Store::open(&config.database_path)?);
    let tokens = Arc::new(TokenService::new(&config.secret_key, config.algorithm));

    let state = AppState {
        store,
        tokens,
        token_expire_minutes: config.token_expire_minutes,
    };

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("API server listening on {}", config.bind_addr);

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planner_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
