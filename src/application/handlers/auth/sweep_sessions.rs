//! Periodic removal of expired sessions.
//!
//! Expired sessions are rejected at lookup either way; sweeping only bounds
//! the store's memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::foundation::Timestamp;
use crate::ports::SessionStore;

/// Removes sessions that expired before `now`. Returns how many were removed.
pub async fn sweep_expired_sessions(store: &dyn SessionStore, now: &Timestamp) -> usize {
    match store.purge_expired(now).await {
        Ok(removed) => {
            if removed > 0 {
                tracing::info!(removed, "Purged expired sessions");
            }
            removed
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to purge expired sessions");
            0
        }
    }
}

/// Spawns a task that sweeps the store every `interval`.
pub fn spawn_session_sweeper(store: Arc<dyn SessionStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            sweep_expired_sessions(store.as_ref(), &Timestamp::now()).await;
        }
    })
}
