//! Error types for the countdown engine and its control surface

use thiserror::Error;

/// Errors returned by timer commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The configured time cannot be adjusted while a countdown is running
    #[error("Timer is running; cancel it before adjusting the duration")]
    Running,

    /// A countdown was requested with hours, minutes and seconds all zero
    #[error("Configured duration is zero")]
    ZeroDuration,

    /// The shared timer state could not be locked
    #[error("Failed to lock timer state: {0}")]
    StatePoisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for TimerError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        TimerError::StatePoisoned(e.to_string())
    }
}
