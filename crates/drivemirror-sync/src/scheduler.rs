//! Poll-driven scheduler
//!
//! Runs reconciliation passes on a fixed interval until shutdown is
//! requested. A failed pass (listing error) is logged and retried on the
//! next tick; per-item failures are already absorbed into the pass stats, so
//! they never reach this loop. The scheduler owns the engine, which
//! guarantees only one pass runs at a time.

use std::time::Duration;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::engine::SyncEngine;

/// Drives repeated reconciliation passes with a sleep between them
pub struct SyncScheduler {
    engine: SyncEngine,
    interval: Duration,
    shutdown: CancellationToken,
}

impl SyncScheduler {
    /// Creates a scheduler around an engine
    ///
    /// # Arguments
    /// * `engine` - The engine to drive; the scheduler takes ownership
    /// * `interval` - Sleep between the end of one pass and the start of the next
    /// * `shutdown` - Token that stops the loop after the current pass
    pub fn new(engine: SyncEngine, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            engine,
            interval,
            shutdown,
        }
    }

    /// Runs passes until the shutdown token fires
    ///
    /// The running pass is never interrupted; cancellation takes effect at
    /// the next sleep point.
    pub async fn run(mut self) -> Result<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            mode = %self.engine.mode(),
            "Starting poll loop"
        );

        loop {
            match self.engine.run_pass().await {
                Ok(stats) => info!(%stats, "Pass finished"),
                Err(err) => error!(
                    error = format!("{err:#}"),
                    "Pass failed; retrying on next tick"
                ),
            }

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Shutdown requested, stopping poll loop");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}
