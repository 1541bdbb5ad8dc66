//! State management module
//! 
//! This module contains the countdown engine, the state it publishes and the
//! shared application state that serializes access to it.

pub mod app_state;
pub mod events;
pub mod timer_engine;
pub mod timer_state;
pub mod units;

// Re-export main types
pub use app_state::AppState;
pub use events::TimerEvent;
pub use timer_engine::TimerEngine;
pub use timer_state::{format_hms, Phase, TimerState};
pub use units::{TimeOperator, TimeUnit};
