use serde::{Deserialize, Serialize};
use std::fmt;
use ugd_economics::Dec;

pub const EVENT_TYPE_MINT: &str = "ugdmint";

pub const ATTRIBUTE_KEY_BONDED_RATIO: &str = "bonded_ratio";
pub const ATTRIBUTE_KEY_SUBSIDY_HALVING_INTERVAL: &str = "subsidy_halving_interval";
pub const ATTRIBUTE_KEY_AMOUNT: &str = "amount";

/// Emitted once per block after the base subsidy is minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintEvent {
    pub bonded_ratio: Dec,
    pub subsidy_halving_interval: Dec,
    /// Base units minted as block subsidy
    pub amount: u64,
}

impl MintEvent {
    pub fn event_type(&self) -> &'static str {
        EVENT_TYPE_MINT
    }

    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            (ATTRIBUTE_KEY_BONDED_RATIO, self.bonded_ratio.to_string()),
            (
                ATTRIBUTE_KEY_SUBSIDY_HALVING_INTERVAL,
                self.subsidy_halving_interval.to_string(),
            ),
            (ATTRIBUTE_KEY_AMOUNT, self.amount.to_string()),
        ]
    }
}

impl fmt::Display for MintEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", EVENT_TYPE_MINT)?;
        for (key, value) in self.attributes() {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}
