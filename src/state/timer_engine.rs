//! Countdown state machine.
//!
//! The engine has no clock of its own. Whoever drives it calls `tick()`
//! once per interval while a run is active; see `tasks::countdown`.
//!
//! ```text
//! Idle --start--> Running --tick(rem > 0)--> Running
//!                 Running --tick(rem == 0)--> Finished
//!                 Running --cancel--> Idle
//! Finished --adjust--> Idle,  Finished --start--> Running
//! ```

use tracing::debug;

use super::{
    timer_state::{format_hms, Phase, TimerState},
    units::{TimeOperator, TimeUnit, MINUTES_IN_HOUR, MSECS_IN_SEC, SECS_IN_MINUTE},
};
use crate::error::TimerError;

/// Length of one tick in milliseconds
pub const TICK_MS: u64 = 1000;

/// Authoritative countdown state
#[derive(Debug, Clone)]
pub struct TimerEngine {
    hours: u32,
    minutes: u32,
    seconds: u32,
    phase: Phase,
    /// Configured duration captured by the last `start`
    total_duration_ms: u64,
    remaining_ms: u64,
    progress: f32,
}

impl TimerEngine {
    /// Create an idle engine with a zero duration
    pub fn new() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            phase: Phase::Idle,
            total_duration_ms: 0,
            remaining_ms: 0,
            progress: 1.0,
        }
    }

    /// Create an idle engine preconfigured with the given time, clamped per unit
    pub fn with_duration(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours: TimeUnit::Hour.clamp(hours as i64),
            minutes: TimeUnit::Minute.clamp(minutes as i64),
            seconds: TimeUnit::Second.clamp(seconds as i64),
            ..Self::new()
        }
    }

    // Queries

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.total_duration_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    /// Duration currently shown by hours, minutes and seconds
    pub fn configured_ms(&self) -> u64 {
        let secs = self.hours as u64 * MINUTES_IN_HOUR * SECS_IN_MINUTE
            + self.minutes as u64 * SECS_IN_MINUTE
            + self.seconds as u64;
        secs * MSECS_IN_SEC
    }

    pub fn snapshot(&self) -> TimerState {
        TimerState {
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            running: self.is_running(),
            phase: self.phase,
            progress: self.progress,
            display_text: format_hms(self.hours, self.minutes, self.seconds),
        }
    }

    // Commands

    /// Step one unit of the configured time up or down.
    ///
    /// Rejected while running so the live countdown only ever decreases.
    pub fn adjust(&mut self, unit: TimeUnit, operator: TimeOperator) -> Result<TimerState, TimerError> {
        if self.is_running() {
            return Err(TimerError::Running);
        }

        match unit {
            TimeUnit::Hour => self.hours = operator.apply(unit, self.hours),
            TimeUnit::Minute => self.minutes = operator.apply(unit, self.minutes),
            TimeUnit::Second => self.seconds = operator.apply(unit, self.seconds),
        }
        // A new configuration drops whatever the last run left on display
        self.phase = Phase::Idle;
        self.total_duration_ms = self.configured_ms();
        self.remaining_ms = self.total_duration_ms;
        self.progress = 1.0;

        Ok(self.snapshot())
    }

    /// Begin a countdown from the configured time, replacing any active run
    pub fn start(&mut self) -> TimerState {
        if self.is_running() {
            debug!("Restarting countdown, cancelling current run");
            self.cancel();
        }

        self.total_duration_ms = self.configured_ms();
        self.remaining_ms = self.total_duration_ms;
        self.phase = Phase::Running;
        self.progress = self.compute_progress();

        self.snapshot()
    }

    /// Advance the active run by one interval.
    ///
    /// Returns `None` when no run is active.
    pub fn tick(&mut self) -> Option<TimerState> {
        if !self.is_running() {
            return None;
        }

        self.remaining_ms = self.remaining_ms.saturating_sub(TICK_MS);

        let total_secs = self.remaining_ms / MSECS_IN_SEC;
        self.seconds = (total_secs % SECS_IN_MINUTE) as u32;
        self.minutes = (total_secs / SECS_IN_MINUTE % MINUTES_IN_HOUR) as u32;
        self.hours = (total_secs / SECS_IN_MINUTE / MINUTES_IN_HOUR) as u32;
        self.progress = self.compute_progress();

        if self.remaining_ms == 0 {
            self.phase = Phase::Finished;
        }

        Some(self.snapshot())
    }

    /// Stop the active run, keeping the last remaining time on display
    pub fn cancel(&mut self) -> TimerState {
        if self.is_running() {
            self.phase = Phase::Idle;
        }
        self.snapshot()
    }

    fn compute_progress(&self) -> f32 {
        if self.total_duration_ms == 0 {
            return 1.0;
        }
        self.remaining_ms as f32 / self.total_duration_ms as f32
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(hours: u32, minutes: u32, seconds: u32) -> TimerEngine {
        TimerEngine::with_duration(hours, minutes, seconds)
    }

    #[test]
    fn five_second_increases_show_five_seconds() {
        let mut engine = TimerEngine::new();
        let mut last = engine.snapshot();
        for _ in 0..5 {
            last = engine.adjust(TimeUnit::Second, TimeOperator::Increase).unwrap();
        }
        assert_eq!(last.display_text, "00:00:05");
        assert_eq!(last.seconds, 5);
    }

    #[test]
    fn adjust_clamps_each_unit() {
        let mut engine = TimerEngine::new();
        let state = engine.adjust(TimeUnit::Minute, TimeOperator::Decrease).unwrap();
        assert_eq!(state.minutes, 0);

        let mut engine = configured(23, 59, 59);
        let state = engine.adjust(TimeUnit::Hour, TimeOperator::Increase).unwrap();
        assert_eq!(state.hours, 23);
        let state = engine.adjust(TimeUnit::Second, TimeOperator::Increase).unwrap();
        assert_eq!(state.seconds, 59);
        assert_eq!(state.display_text, "23:59:59");
    }

    #[test]
    fn three_second_run_counts_down_then_finishes() {
        let mut engine = configured(0, 0, 3);
        let started = engine.start();
        assert_eq!(started.display_text, "00:00:03");
        assert!(started.running);
        assert_eq!(started.progress, 1.0);

        let texts: Vec<String> = std::iter::from_fn(|| engine.tick())
            .map(|s| s.display_text)
            .collect();
        assert_eq!(texts, vec!["00:00:02", "00:00:01", "00:00:00"]);

        let done = engine.snapshot();
        assert!(!done.running);
        assert_eq!(done.phase, Phase::Finished);
        assert_eq!(done.progress, 0.0);
    }

    #[test]
    fn each_tick_removes_one_second_and_progress_never_rises() {
        let mut engine = configured(1, 0, 2);
        engine.start();
        let mut previous_ms = engine.remaining_ms();
        let mut previous_progress = engine.snapshot().progress;

        while let Some(state) = engine.tick() {
            assert_eq!(previous_ms - engine.remaining_ms(), TICK_MS);
            assert!(state.progress <= previous_progress);
            assert!((0.0..=1.0).contains(&state.progress));
            assert_eq!(state.display_text, format_hms(state.hours, state.minutes, state.seconds));
            previous_ms = engine.remaining_ms();
            previous_progress = state.progress;
        }
        assert_eq!(engine.remaining_ms(), 0);
    }

    #[test]
    fn tick_arithmetic_crosses_hour_boundary() {
        let mut engine = configured(1, 0, 0);
        engine.start();
        let state = engine.tick().unwrap();
        assert_eq!((state.hours, state.minutes, state.seconds), (0, 59, 59));
        assert_eq!(state.display_text, "00:59:59");
    }

    #[test]
    fn cancel_keeps_last_remaining_time() {
        let mut engine = configured(0, 0, 10);
        engine.start();
        engine.tick();
        let cancelled = engine.cancel();
        assert!(!cancelled.running);
        assert_eq!(cancelled.phase, Phase::Idle);
        assert_eq!(cancelled.seconds, 9);
        assert!(engine.tick().is_none());
    }

    #[test]
    fn cancel_twice_matches_cancel_once() {
        let mut engine = configured(0, 0, 10);
        engine.start();
        engine.tick();
        let once = engine.cancel();
        let twice = engine.cancel();
        assert_eq!(once, twice);
    }

    #[test]
    fn cancel_while_idle_is_a_no_op() {
        let mut engine = configured(0, 2, 0);
        let before = engine.snapshot();
        assert_eq!(engine.cancel(), before);
    }

    #[test]
    fn adjust_is_rejected_while_running() {
        let mut engine = configured(0, 0, 10);
        engine.start();
        let before = engine.snapshot();
        assert_eq!(
            engine.adjust(TimeUnit::Second, TimeOperator::Increase),
            Err(TimerError::Running)
        );
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn restart_uses_remaining_time_as_new_total() {
        let mut engine = configured(0, 0, 10);
        engine.start();
        engine.tick();
        let restarted = engine.start();
        assert_eq!(engine.total_duration_ms(), 9_000);
        assert_eq!(restarted.progress, 1.0);
        assert_eq!(restarted.display_text, "00:00:09");
    }

    #[test]
    fn zero_duration_run_finishes_on_first_tick_with_full_progress() {
        let mut engine = TimerEngine::new();
        let started = engine.start();
        assert_eq!(started.progress, 1.0);
        let done = engine.tick().unwrap();
        assert_eq!(done.phase, Phase::Finished);
        assert_eq!(done.progress, 1.0);
        assert!(engine.tick().is_none());
    }

    #[test]
    fn adjust_after_finish_returns_to_idle() {
        let mut engine = configured(0, 0, 1);
        engine.start();
        engine.tick();
        assert_eq!(engine.phase(), Phase::Finished);
        let state = engine.adjust(TimeUnit::Minute, TimeOperator::Increase).unwrap();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.display_text, "00:01:00");
    }

    #[test]
    fn adjust_after_finish_or_cancel_refills_progress() {
        let mut engine = configured(0, 0, 1);
        engine.start();
        engine.tick();
        assert_eq!(engine.snapshot().progress, 0.0);
        let state = engine.adjust(TimeUnit::Minute, TimeOperator::Increase).unwrap();
        assert_eq!(state.progress, 1.0);
        assert_eq!(engine.remaining_ms(), 60_000);
        assert_eq!(engine.total_duration_ms(), 60_000);

        let mut engine = configured(0, 0, 10);
        engine.start();
        engine.tick();
        engine.cancel();
        assert!(engine.snapshot().progress < 1.0);
        let state = engine.adjust(TimeUnit::Second, TimeOperator::Decrease).unwrap();
        assert_eq!(state.display_text, "00:00:08");
        assert_eq!(state.progress, 1.0);
        assert_eq!(engine.remaining_ms(), 8_000);
    }
}
