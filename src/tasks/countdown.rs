//! Countdown tick task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error};

use crate::state::{timer_engine::TICK_MS, AppState};

/// Deliver one tick per second to run `run_id` until it finishes or is replaced.
///
/// `AppState` aborts this task on cancel or restart. Ticks that still race
/// in are discarded there because the run id no longer matches.
pub async fn countdown_task(state: Arc<AppState>, run_id: u64) {
    debug!("Starting tick delivery for run {}", run_id);

    let period = Duration::from_millis(TICK_MS);
    let mut interval = interval_at(Instant::now() + period, period);
    // A delayed clock coalesces ticks instead of bursting to catch up
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match state.apply_tick(run_id) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Run {} needs no more ticks", run_id);
                break;
            }
            Err(e) => {
                error!("Failed to apply tick for run {}: {}", run_id, e);
                break;
            }
        }
    }
}
