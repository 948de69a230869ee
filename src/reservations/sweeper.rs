use super::ledger::ReservationLedger;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default cadence of the background expiry sweep.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Runs `sweep_expired` on the shared ledger every `every` until the task is aborted.
/// The first sweep happens one full interval after start.
pub fn spawn_sweeper(ledger: Arc<Mutex<ReservationLedger>>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            let removed = {
                let mut ledger = ledger.lock().unwrap_or_else(|e| e.into_inner());
                ledger.sweep_expired()
            };
            tracing::debug!("Expiry sweep removed {} reservations", removed);
        }
    })
}
