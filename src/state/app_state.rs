//! Shared application state around the countdown engine

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::{debug, info};

use super::{Phase, TimeOperator, TimeUnit, TimerEngine, TimerEvent, TimerState};
use crate::{error::TimerError, tasks::countdown_task};

/// Engine plus the handle of the task currently ticking it
#[derive(Debug, Default)]
struct Countdown {
    engine: TimerEngine,
    /// Generation of the current run; ticks from older runs are dropped
    run_id: u64,
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    fn stop_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Main application state that owns the timer and publishes its changes
#[derive(Debug)]
pub struct AppState {
    /// Engine and tick task, mutated only under this lock
    timer: Mutex<Countdown>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last command tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for timer events, one per command or tick
    pub timer_event_tx: broadcast::Sender<TimerEvent>,
    /// Latest published timer state
    pub timer_update_tx: watch::Sender<TimerState>,
}

impl AppState {
    /// Create a new AppState with an idle, zeroed timer
    pub fn new(port: u16, host: String) -> Self {
        Self::with_engine(port, host, TimerEngine::new())
    }

    /// Create a new AppState with the timer preset to the given time
    pub fn with_preset(port: u16, host: String, hours: u32, minutes: u32, seconds: u32) -> Self {
        Self::with_engine(port, host, TimerEngine::with_duration(hours, minutes, seconds))
    }

    fn with_engine(port: u16, host: String, engine: TimerEngine) -> Self {
        let (timer_event_tx, _) = broadcast::channel(100);
        let (timer_update_tx, _) = watch::channel(engine.snapshot());

        Self {
            timer: Mutex::new(Countdown {
                engine,
                ..Countdown::default()
            }),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_event_tx,
            timer_update_tx,
        }
    }

    /// Step one unit of the configured time
    pub fn adjust(&self, unit: TimeUnit, operator: TimeOperator) -> Result<TimerState, TimerError> {
        let mut timer = self.timer.lock()?;
        let state = timer.engine.adjust(unit, operator)?;
        debug!("Adjusted {:?} {:?}: {}", unit, operator, state.display_text);
        self.publish(TimerEvent::Adjusted(state.clone()));
        self.record_action("adjust");
        Ok(state)
    }

    /// Start a countdown from the configured time, restarting any active run
    pub fn start(self: &Arc<Self>) -> Result<TimerState, TimerError> {
        let mut timer = self.timer.lock()?;
        let state = self.start_locked(&mut timer)?;
        self.record_action("start");
        Ok(state)
    }

    /// Stop the active countdown. Calling it while idle changes nothing.
    pub fn cancel(&self) -> Result<TimerState, TimerError> {
        let mut timer = self.timer.lock()?;
        let state = self.cancel_locked(&mut timer);
        self.record_action("cancel");
        Ok(state)
    }

    /// Cancel a running countdown, otherwise start one
    pub fn toggle(self: &Arc<Self>) -> Result<TimerState, TimerError> {
        let mut timer = self.timer.lock()?;
        let (state, action) = if timer.engine.is_running() {
            (self.cancel_locked(&mut timer), "cancel")
        } else {
            (self.start_locked(&mut timer)?, "start")
        };
        self.record_action(action);
        Ok(state)
    }

    /// Stop tick delivery before the owning session goes away
    pub fn shutdown(&self) -> Result<(), TimerError> {
        let mut timer = self.timer.lock()?;
        let phase = timer.engine.phase();
        self.cancel_locked(&mut timer);
        info!("Timer torn down in phase {:?}", phase);
        Ok(())
    }

    /// Apply one tick for `run_id`. Returns whether the run wants more ticks.
    pub fn apply_tick(&self, run_id: u64) -> Result<bool, TimerError> {
        let mut timer = self.timer.lock()?;
        if timer.run_id != run_id {
            debug!("Dropping tick from superseded run {}", run_id);
            return Ok(false);
        }

        let Some(state) = timer.engine.tick() else {
            return Ok(false);
        };

        if state.phase == Phase::Finished {
            info!("Countdown run {} finished", run_id);
            // The task is exiting on its own, no need to abort it
            timer.task = None;
            self.publish(TimerEvent::Finished(state));
            Ok(false)
        } else {
            debug!("Tick for run {}: {}", run_id, state.display_text);
            self.publish(TimerEvent::Tick(state));
            Ok(true)
        }
    }

    fn start_locked(self: &Arc<Self>, timer: &mut Countdown) -> Result<TimerState, TimerError> {
        if !timer.engine.is_running() && timer.engine.snapshot().is_zero() {
            return Err(TimerError::ZeroDuration);
        }

        timer.stop_task();
        let state = timer.engine.start();
        timer.run_id += 1;
        let run_id = timer.run_id;
        timer.task = Some(tokio::spawn(countdown_task(Arc::clone(self), run_id)));

        info!(
            "Started countdown run {} for {} ({} ms)",
            run_id,
            state.display_text,
            timer.engine.total_duration_ms()
        );
        self.publish(TimerEvent::Started(state.clone()));
        Ok(state)
    }

    fn cancel_locked(&self, timer: &mut Countdown) -> TimerState {
        let was_running = timer.engine.is_running();
        timer.stop_task();
        let state = timer.engine.cancel();

        if was_running {
            info!(
                "Cancelled countdown run {} at {} ({} ms left)",
                timer.run_id,
                state.display_text,
                timer.engine.remaining_ms()
            );
            self.publish(TimerEvent::Cancelled(state.clone()));
        }
        state
    }

    /// Push a change to watchers and event subscribers.
    ///
    /// Callers hold the timer lock so publications stay in order.
    fn publish(&self, event: TimerEvent) {
        debug!("Publishing {} event", event.name());
        let state = event.state().clone();
        self.timer_update_tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });

        if let Err(e) = self.timer_event_tx.send(event) {
            debug!("No subscribers for timer event: {}", e);
        }
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, TimerError> {
        let timer = self.timer.lock()?;
        Ok(timer.engine.snapshot())
    }

    /// Subscribe to every timer event from now on
    pub fn subscribe_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.timer_event_tx.subscribe()
    }

    /// Watch the latest published timer state
    pub fn watch_timer(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Called with the timer lock held so the recorded command matches the
    /// state it produced.
    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last command information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
