//! Time units and adjustment operators

use serde::{Deserialize, Serialize};

pub const MSECS_IN_SEC: u64 = 1000;
pub const SECS_IN_MINUTE: u64 = 60;
pub const MINUTES_IN_HOUR: u64 = 60;

/// A component of the configured duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    /// Largest value the unit may hold
    pub fn max(self) -> u32 {
        match self {
            TimeUnit::Hour => 23,
            TimeUnit::Minute | TimeUnit::Second => 59,
        }
    }

    /// Clamp `value` into `[0, max]`, saturating at the bounds
    pub fn clamp(self, value: i64) -> u32 {
        value.clamp(0, self.max() as i64) as u32
    }
}

/// Direction of a single-step adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOperator {
    Increase,
    Decrease,
}

impl TimeOperator {
    /// Apply one step to `current` and clamp the result for `unit`
    pub fn apply(self, unit: TimeUnit, current: u32) -> u32 {
        let next = match self {
            TimeOperator::Increase => current as i64 + 1,
            TimeOperator::Decrease => current as i64 - 1,
        };
        unit.clamp(next)
    }
}
