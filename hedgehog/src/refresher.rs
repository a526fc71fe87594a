//! Background task that keeps the mint cache in sync with hedgehog

use crate::cache::{MergeStats, MintCache};
use crate::client::HedgehogClient;
use crate::error::Result;
use crate::metrics::{
    FEED_CACHE_SIZE, FEED_ENTRIES_SKIPPED, FEED_REFRESH_FAILURES, FEED_REFRESH_TOTAL,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Fetches one snapshot and merges it into `cache`.
///
/// On error the cache is left untouched.
pub async fn refresh_once(client: &HedgehogClient, cache: &MintCache) -> Result<MergeStats> {
    FEED_REFRESH_TOTAL.inc();

    let data = match client.fetch().await {
        Ok(data) => data,
        Err(e) => {
            FEED_REFRESH_FAILURES.inc();
            return Err(e);
        }
    };

    let stats = cache.merge(&data);
    FEED_ENTRIES_SKIPPED.inc_by(stats.skipped() as u64);
    FEED_CACHE_SIZE.set(cache.len() as i64);

    debug!(
        inserted = stats.inserted,
        malformed = stats.malformed,
        foreign = stats.foreign,
        stale = stats.stale,
        pruned = stats.pruned,
        cached = cache.len(),
        "merged hedgehog mints"
    );
    Ok(stats)
}

/// Owns the refresh loop. Dropping it signals the loop to stop.
#[derive(Debug)]
pub struct FeedRefresher {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl FeedRefresher {
    /// Spawns the refresh loop on the current tokio runtime.
    ///
    /// The first refresh runs immediately, then once per `interval`.
    pub fn start(client: HedgehogClient, cache: Arc<MintCache>, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            info!(
                endpoint = client.endpoint(),
                interval_secs = interval.as_secs(),
                "hedgehog feed refresher started"
            );

            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        // a request already in flight runs to completion or timeout
                        if let Err(e) = refresh_once(&client, &cache).await {
                            warn!(error = %e, "hedgehog refresh failed, keeping cached mints");
                        }
                    }
                }
            }

            info!("hedgehog feed refresher stopped");
        });

        FeedRefresher {
            cancel,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signals the loop and waits for it to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "hedgehog refresher task ended abnormally");
            }
        }
    }
}

impl Drop for FeedRefresher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
