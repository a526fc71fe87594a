//! Prometheus metrics for the hedgehog feed
//!
//! - `ugdmint_feed_refresh_total` - refresh attempts (counter)
//! - `ugdmint_feed_refresh_failures_total` - failed fetches or decodes (counter)
//! - `ugdmint_feed_entries_skipped_total` - feed entries not cached (counter)
//! - `ugdmint_feed_cache_size` - pending mints held in the cache (gauge)

use lazy_static::lazy_static;
use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref FEED_REFRESH_TOTAL: IntCounter = IntCounter::new(
        "ugdmint_feed_refresh_total",
        "Hedgehog feed refresh attempts"
    ).expect("Failed to create feed_refresh_total metric");

    pub static ref FEED_REFRESH_FAILURES: IntCounter = IntCounter::new(
        "ugdmint_feed_refresh_failures_total",
        "Hedgehog feed refreshes that failed to fetch or decode"
    ).expect("Failed to create feed_refresh_failures metric");

    pub static ref FEED_ENTRIES_SKIPPED: IntCounter = IntCounter::new(
        "ugdmint_feed_entries_skipped_total",
        "Hedgehog feed entries that were malformed, foreign or stale"
    ).expect("Failed to create feed_entries_skipped metric");

    pub static ref FEED_CACHE_SIZE: IntGauge = IntGauge::new(
        "ugdmint_feed_cache_size",
        "Pending hedgehog mints held in the cache"
    ).expect("Failed to create feed_cache_size metric");
}

/// Registers the feed metrics with `registry`.
pub fn register_feed_metrics(registry: &Registry) -> prometheus::Result<()> {
    registry.register(Box::new(FEED_REFRESH_TOTAL.clone()))?;
    registry.register(Box::new(FEED_REFRESH_FAILURES.clone()))?;
    registry.register(Box::new(FEED_ENTRIES_SKIPPED.clone()))?;
    registry.register(Box::new(FEED_CACHE_SIZE.clone()))?;
    Ok(())
}
