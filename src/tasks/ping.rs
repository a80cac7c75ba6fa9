//! Liveness Ping Task
//!
//! Periodically pings the user service. Gate-closed calls never ping on
//! their own, so this is what reopens the gate after an outage.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info};

use crate::liveness::LivenessOracle;

/// Spawns a background task calling `check_now` every `ping_interval_secs`.
///
/// The first ping runs immediately.
pub fn spawn_ping_task(oracle: Arc<dyn LivenessOracle>, ping_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(ping_interval_secs.max(1));

    tokio::spawn(async move {
        info!(interval = ping_interval_secs, "Liveness ping task starting");

        let mut ticker = time::interval(interval);
        loop {
            ticker.tick().await;
            if let Err(e) = oracle.check_now().await {
                debug!(error = %e, "Periodic liveness check failed");
            }
        }
    })
}
