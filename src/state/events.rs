//! Timer change notifications

use serde::{Deserialize, Serialize};

use super::TimerState;

/// One published change, carrying the state it produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "timer", rename_all = "lowercase")]
pub enum TimerEvent {
    Adjusted(TimerState),
    Started(TimerState),
    Tick(TimerState),
    Finished(TimerState),
    Cancelled(TimerState),
}

impl TimerEvent {
    pub fn state(&self) -> &TimerState {
        match self {
            TimerEvent::Adjusted(state)
            | TimerEvent::Started(state)
            | TimerEvent::Tick(state)
            | TimerEvent::Finished(state)
            | TimerEvent::Cancelled(state) => state,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::Adjusted(_) => "adjusted",
            TimerEvent::Started(_) => "started",
            TimerEvent::Tick(_) => "tick",
            TimerEvent::Finished(_) => "finished",
            TimerEvent::Cancelled(_) => "cancelled",
        }
    }
}
