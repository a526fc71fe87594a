//! Unigrid devnet node
//!
//! Wires the mint module to a sled data dir, the hedgehog feed and an
//! HTTP query API.

pub mod api;
pub mod config;
pub mod node;

pub use config::{ConfigError, NodeConfig};
pub use node::{ensure_genesis, BlockProducer, GenesisStatus, NodeCoordinator};
