//! Block-height keyed cache of pending hedgehog mints
//!
//! Written by the feed refresher, read once per block by the mint
//! coordinator. A height is served at most until the coordinator reports
//! it processed; after that it is never returned again and is dropped on
//! the next merge.

use crate::feed::{parse_mint_key, HedgehogData, Mint};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Outcome of merging one feed payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Entries inserted or overwritten
    pub inserted: usize,
    /// Entries with an unparsable key or a non-positive amount
    pub malformed: usize,
    /// Entries whose address does not carry the chain prefix
    pub foreign: usize,
    /// Entries for heights the chain has already processed
    pub stale: usize,
    /// Cached entries evicted because their height has passed
    pub pruned: usize,
}

impl MergeStats {
    pub fn skipped(&self) -> usize {
        self.malformed + self.foreign + self.stale
    }
}

#[derive(Debug)]
pub struct MintCache {
    mints: RwLock<HashMap<u64, Mint>>,
    /// Lowest height that may still be served
    floor: AtomicU64,
    address_prefix: String,
}

impl MintCache {
    pub fn new(address_prefix: impl Into<String>) -> Self {
        Self {
            mints: RwLock::new(HashMap::new()),
            floor: AtomicU64::new(0),
            address_prefix: address_prefix.into(),
        }
    }

    pub fn address_prefix(&self) -> &str {
        &self.address_prefix
    }

    /// Pending mint for `height`, if any and not yet processed.
    pub fn lookup(&self, height: u64) -> Option<Mint> {
        if height < self.floor() {
            return None;
        }
        self.mints.read().get(&height).cloned()
    }

    /// Records that the chain has finished `height`.
    ///
    /// Only moves forward; reporting an older height is a no-op.
    pub fn mark_processed(&self, height: u64) {
        self.floor.fetch_max(height.saturating_add(1), Ordering::SeqCst);
    }

    /// Last height reported through [`mark_processed`](Self::mark_processed).
    pub fn processed_height(&self) -> Option<u64> {
        self.floor().checked_sub(1)
    }

    fn floor(&self) -> u64 {
        self.floor.load(Ordering::SeqCst)
    }

    /// Merges a feed payload.
    ///
    /// Each entry is validated independently; a bad entry is skipped and
    /// never aborts the batch. The last entry for a height wins.
    pub fn merge(&self, data: &HedgehogData) -> MergeStats {
        let mut stats = MergeStats::default();
        let floor = self.floor();
        let mut accepted = Vec::with_capacity(data.data.mints.len());

        for (key, &amount) in &data.data.mints {
            let Some((address, height)) = parse_mint_key(key) else {
                warn!(key = %key, "skipping malformed hedgehog mint key");
                stats.malformed += 1;
                continue;
            };
            if amount <= 0 {
                warn!(key = %key, amount, "skipping hedgehog mint with non-positive amount");
                stats.malformed += 1;
                continue;
            }
            if !address.starts_with(&self.address_prefix) {
                debug!(address, height, "ignoring mint for foreign address");
                stats.foreign += 1;
                continue;
            }
            if height < floor {
                stats.stale += 1;
                continue;
            }

            accepted.push(Mint {
                address: address.to_string(),
                amount,
                height,
            });
        }

        let mut mints = self.mints.write();
        let before = mints.len();
        mints.retain(|height, _| *height >= floor);
        stats.pruned = before - mints.len();

        for mint in accepted {
            mints.insert(mint.height, mint);
            stats.inserted += 1;
        }

        stats
    }

    /// Evicts entries at or below the processed height.
    pub fn prune(&self) -> usize {
        let floor = self.floor();
        let mut mints = self.mints.write();
        let before = mints.len();
        mints.retain(|height, _| *height >= floor);
        before - mints.len()
    }

    /// Cached heights in ascending order.
    pub fn heights(&self) -> Vec<u64> {
        let mut heights: Vec<u64> = self.mints.read().keys().copied().collect();
        heights.sort_unstable();
        heights
    }

    pub fn len(&self) -> usize {
        self.mints.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.mints.read().is_empty()
    }
}
