//! Node configuration
//!
//! ```toml
//! [hedgehog]
//! url = "https://127.0.0.1:52884"
//! refresh_interval_secs = 15
//!
//! [chain]
//! data_dir = "$HOME/.ugd/data"
//! block_interval_secs = 5
//!
//! [api]
//! listen = "127.0.0.1:52885"
//!
//! [params]
//! subsidy_halving_interval = "1000000.0"
//! ```
//!
//! Every section and key is optional.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use ugd_economics::{Dec, Params};
use ugd_hedgehog::FeedConfig;
use ugd_mint::DEFAULT_FEE_COLLECTOR;

/// Where `ugd-cli` looks for the node by default
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:52885";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub hedgehog: FeedConfig,
    pub chain: ChainConfig,
    pub api: ApiConfig,
    pub params: ParamsOverrides,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// `$HOME` is expanded
    pub data_dir: String,
    pub block_interval_secs: u64,
    pub fee_collector: String,
    /// Reported in mint events; no staking module runs on devnet
    pub bonded_ratio: Dec,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            data_dir: "$HOME/.ugd/data".to_string(),
            block_interval_secs: 5,
            fee_collector: DEFAULT_FEE_COLLECTOR.to_string(),
            bonded_ratio: Dec::with_prec(67, 2),
        }
    }
}

impl ChainConfig {
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(expand_path(&self.data_dir))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub enabled: bool,
    pub listen: SocketAddr,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            listen: SocketAddr::from(([127, 0, 0, 1], 52885)),
        }
    }
}

/// Genesis params overrides; unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsOverrides {
    pub mint_denom: Option<String>,
    pub subsidy_halving_interval: Option<Dec>,
    pub goal_bonded: Option<Dec>,
    pub blocks_per_year: Option<u64>,
}

impl ParamsOverrides {
    pub fn is_empty(&self) -> bool {
        self == &ParamsOverrides::default()
    }

    /// Applies the overrides on top of `base` and validates the result.
    pub fn apply(&self, base: Params) -> Result<Params> {
        let mut params = base;
        if let Some(denom) = &self.mint_denom {
            params.mint_denom = denom.clone();
        }
        if let Some(interval) = self.subsidy_halving_interval {
            params.subsidy_halving_interval = interval;
        }
        if let Some(goal) = self.goal_bonded {
            params.goal_bonded = goal;
        }
        if let Some(blocks) = self.blocks_per_year {
            params.blocks_per_year = blocks;
        }

        params
            .validate()
            .map_err(|e| ConfigError::InvalidParams(e.to_string()))?;
        Ok(params)
    }
}

impl NodeConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(NodeConfig::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    /// Params the node starts with.
    pub fn params(&self) -> Result<Params> {
        self.params.apply(Params::default())
    }
}

pub fn expand_path(path: &str) -> String {
    path.replace("$HOME", &std::env::var("HOME").unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path() {
        std::env::set_var("HOME", "/home/ugd");
        assert_eq!(expand_path("$HOME/.ugd/data"), "/home/ugd/.ugd/data");
        assert_eq!(expand_path("/var/lib/ugd"), "/var/lib/ugd");
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let overrides = ParamsOverrides::default();
        assert!(overrides.is_empty());
        assert_eq!(overrides.apply(Params::default()).unwrap(), Params::default());
    }
}
