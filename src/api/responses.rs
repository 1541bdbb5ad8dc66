//! API request and response structures

use axum::{http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::TimerError,
    state::{TimeOperator, TimeUnit, TimerState},
};

/// Body of POST /timer/adjust
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustRequest {
    pub unit: TimeUnit,
    pub operator: TimeOperator,
}

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response describing a running timer
    pub fn running(message: String, timer: TimerState) -> Self {
        Self::new("running".to_string(), message, timer)
    }

    /// Create a response describing a stopped timer
    pub fn idle(message: String, timer: TimerState) -> Self {
        Self::new("idle".to_string(), message, timer)
    }

    /// Pick `running` or `idle` from the timer itself
    pub fn from_timer(message: String, timer: TimerState) -> Self {
        if timer.running {
            Self::running(message, timer)
        } else {
            Self::idle(message, timer)
        }
    }
}

/// Error body returned alongside a non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// HTTP status for each timer error
pub fn status_code(error: &TimerError) -> StatusCode {
    match error {
        TimerError::Running => StatusCode::CONFLICT,
        TimerError::ZeroDuration => StatusCode::UNPROCESSABLE_ENTITY,
        TimerError::StatePoisoned(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Turn a timer error into the status and body handlers return
pub fn error_response(error: TimerError) -> (StatusCode, Json<ErrorResponse>) {
    (status_code(&error), Json(ErrorResponse::new(error.to_string())))
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
