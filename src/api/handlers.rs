//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, info, warn};

use crate::state::AppState;
use super::responses::{
    error_response, AdjustRequest, ApiResponse, ErrorResponse, HealthResponse, StatusResponse,
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Handle POST /timer/adjust - Step hours, minutes or seconds
pub async fn adjust_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdjustRequest>,
) -> ApiResult<ApiResponse> {
    match state.adjust(request.unit, request.operator) {
        Ok(timer) => Ok(Json(ApiResponse::idle(
            format!("Timer set to {}", timer.display_text),
            timer,
        ))),
        Err(e) => {
            warn!("Rejected adjust of {:?}: {}", request.unit, e);
            Err(error_response(e))
        }
    }
}

/// Handle POST /timer/start - Start (or restart) the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    match state.start() {
        Ok(timer) => {
            info!("Start endpoint called - countdown from {}", timer.display_text);
            Ok(Json(ApiResponse::running(
                "Countdown started".to_string(),
                timer,
            )))
        }
        Err(e) => {
            warn!("Failed to start countdown: {}", e);
            Err(error_response(e))
        }
    }
}

/// Handle POST /timer/cancel - Stop the countdown
pub async fn cancel_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    match state.cancel() {
        Ok(timer) => {
            info!("Cancel endpoint called - stopped at {}", timer.display_text);
            Ok(Json(ApiResponse::idle(
                "Countdown cancelled".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to cancel countdown: {}", e);
            Err(error_response(e))
        }
    }
}

/// Handle POST /timer/toggle - Start when idle, cancel when running
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    match state.toggle() {
        Ok(timer) => {
            let message = if timer.running {
                "Countdown started"
            } else {
                "Countdown cancelled"
            };
            info!("Toggle endpoint called - {}", message);
            Ok(Json(ApiResponse::from_timer(message.to_string(), timer)))
        }
        Err(e) => {
            warn!("Failed to toggle countdown: {}", e);
            Err(error_response(e))
        }
    }
}

/// Handle GET /timer - Return the current timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> ApiResult<StatusResponse> {
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(error_response(e));
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /timer/stream - Server-sent events of every published state
pub async fn stream_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let rx = state.watch_timer();

    // First item is the current value, then one per change
    let updates = stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let timer = rx.borrow_and_update().clone();
        Some((Event::default().event("timer").json_data(&timer), (rx, false)))
    });

    Sse::new(updates).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
