//! Published timer state and display formatting

use serde::{Deserialize, Serialize};

/// Logical phase of one countdown session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    /// Countdown reached zero on its own. Behaves like `Idle` but the
    /// display keeps the completed run until the next adjust or start.
    Finished,
}

/// Snapshot of everything an observer may read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub running: bool,
    pub phase: Phase,
    /// Fraction of the run still remaining, 1.0 full and 0.0 empty
    pub progress: f32,
    pub display_text: String,
}

impl TimerState {
    /// Create an idle, zeroed timer state
    pub fn new() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            running: false,
            phase: Phase::Idle,
            progress: 1.0,
            display_text: format_hms(0, 0, 0),
        }
    }

    /// Check if a countdown is active
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Check if hours, minutes and seconds are all zero
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a duration as zero-padded `HH:MM:SS`
pub fn format_hms(hours: u32, minutes: u32, seconds: u32) -> String {
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
