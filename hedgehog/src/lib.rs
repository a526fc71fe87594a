//! Hedgehog mint feed
//!
//! Polls the local hedgehog daemon for pending external mints and keeps
//! them in a [`MintCache`] keyed by target block height. The block path
//! only ever reads the cache; network I/O happens on the refresher task.

pub mod cache;
pub mod client;
pub mod error;
pub mod feed;
pub mod metrics;
pub mod refresher;

pub use cache::{MergeStats, MintCache};
pub use client::{FeedConfig, HedgehogClient};
pub use error::{FeedError, Result};
pub use feed::{parse_mint_key, HedgehogData, Mint, Mints};
pub use metrics::register_feed_metrics;
pub use refresher::{refresh_once, FeedRefresher};
