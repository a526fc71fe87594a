//! Audit record of an applied external mint

use serde::{Deserialize, Serialize};
use ugd_economics::Coins;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRecord {
    pub block_height: u64,
    /// Recipient address as delivered by the feed
    pub account: String,
    /// Coins delivered to `account`
    pub amount: Coins,
    /// Base subsidy minted in the same block
    pub block_provision: Coins,
}
