//! HTTP API for the memory game
//!
//! The browser (or any other client) renders the snapshot and posts
//! clicks and configuration changes back.

pub mod handlers;
pub mod health;
pub mod sse;

use crate::GameSession;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<GameSession>,
}

impl AppState {
    pub fn new(session: Arc<GameSession>) -> Self {
        Self { session }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/game", get(handlers::get_game))
        .route("/api/click", post(handlers::click_card))
        .route("/api/config", post(handlers::set_config))
        .route("/api/reload", post(handlers::reload_catalog))
        .route("/api/events", get(sse::event_stream))
        .merge(health::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
