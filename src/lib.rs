//! Countdown - A countdown timer engine with a small HTTP control surface
//! 
//! The engine owns the configured duration and the live countdown. Clients
//! read the state it publishes and send it adjust, start and cancel commands.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use state::{AppState, TimerEngine, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
