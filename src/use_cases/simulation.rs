// Periodic simulation loop driving unit drift and mesh rebuilds.

use crate::use_cases::store::EntityStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct SimulationSettings {
    /// Period between simulation ticks.
    pub tick_interval: Duration,
    /// Period between last-sync stamps while the network mode is ONLINE.
    pub sync_interval: Duration,
}

/// Runs until `shutdown` is notified.
///
/// Ticks run inline in this single task, so one tick (drift plus mesh
/// rebuild) always completes before the next can start.
pub async fn simulation_task(
    store: Arc<EntityStore>,
    settings: SimulationSettings,
    shutdown: Arc<Notify>,
) {
    let mut rng = StdRng::from_entropy();

    let mut ticks = tokio::time::interval(settings.tick_interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut syncs = tokio::time::interval(settings.sync_interval);
    syncs.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first interval tick fires immediately; the initial state is already published.
    ticks.tick().await;
    syncs.tick().await;

    info!(
        tick_interval_ms = settings.tick_interval.as_millis() as u64,
        sync_interval_ms = settings.sync_interval.as_millis() as u64,
        "simulation started"
    );

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!("simulation stopped");
                break;
            }
            _ = ticks.tick() => {
                store.run_tick(&mut rng);
            }
            _ = syncs.tick() => {
                if let Some(at) = store.record_sync() {
                    debug!(last_sync = at, "network sync recorded");
                }
            }
        }
    }
}
