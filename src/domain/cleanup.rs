//! Periodic reclamation sweep for expired URL records.
//!
//! Expired rows are already invisible to the read paths; this job reclaims the
//! physical storage on a fixed interval (daily by default). Failures are logged
//! and the job simply waits for its next tick - no retry within the same cycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use crate::domain::repositories::UrlRepository;

/// Runs the expired-URL sweep forever on the given interval.
///
/// Spawned once at startup as a detached task. The first sweep happens one
/// full interval after startup.
pub async fn run_cleanup_job(repository: Arc<dyn UrlRepository>, interval: Duration) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick of a tokio interval fires immediately; consume it so the
    // sweep starts one interval from now.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        info!("Running cleanup job for expired urls");

        match repository.delete_expired().await {
            Ok(rows) => info!(rows, "Cleanup job completed"),
            Err(e) => error!("Failed to clean expired urls: {e}"),
        }
    }
}
