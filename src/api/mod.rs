//! HTTP API module
//!
//! This module contains the endpoints a display client uses to read the
//! timer and send it commands.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer", get(status_handler))
        .route("/timer/adjust", post(adjust_handler))
        .route("/timer/start", post(start_handler))
        .route("/timer/cancel", post(cancel_handler))
        .route("/timer/toggle", post(toggle_handler))
        .route("/timer/stream", get(stream_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
