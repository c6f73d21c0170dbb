//! Periodic maintenance task purging expired cooldowns and requests.
//!
//! Reads self-purge, so the sweeper only bounds memory held by entries
//! nobody looks at again.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cooldown::CooldownTracker;
use crate::request::RequestRegistry;

/// Handle to the running sweeper task.
pub struct SweeperHandle {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweeper and wait for the task to finish.
    pub async fn shutdown(self) -> Result<()> {
        self.cancel.cancel();
        self.handle.await.context("sweeper task panicked")?;
        info!("Maintenance sweeper stopped");
        Ok(())
    }
}

/// Spawn the sweeper, running one sweep every `sweep_interval`.
pub fn start_sweeper(
    cooldowns: Arc<CooldownTracker>,
    requests: Arc<RequestRegistry>,
    sweep_interval: Duration,
) -> SweeperHandle {
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let handle = tokio::spawn(async move {
        let mut ticker = interval(sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; skip it so the initial sweep
        // happens one full interval after startup.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    cooldowns.sweep();
                    requests.sweep();
                    debug!("maintenance sweep complete");
                }
            }
        }
    });

    info!(?sweep_interval, "Maintenance sweeper started");
    SweeperHandle { cancel, handle }
}
