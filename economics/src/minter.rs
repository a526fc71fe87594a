//! Minter singleton kept in chain state

use crate::coin::Coin;
use crate::dec::Dec;
use crate::error::{EconomicsError, Result};
use crate::params::Params;
use crate::subsidy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mirrors the halving interval from [`Params`] every block so the
/// subsidy can be evaluated from the minter alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minter {
    pub subsidy_halving_interval: Dec,
}

impl Minter {
    pub fn new(subsidy_halving_interval: Dec) -> Self {
        Self {
            subsidy_halving_interval,
        }
    }

    pub fn initial(subsidy_halving_interval: Dec) -> Self {
        Self::new(subsidy_halving_interval)
    }

    /// Genesis minter for a new chain. The interval is overwritten from
    /// params on the first block.
    pub fn default_initial() -> Self {
        Self::initial(Dec::with_prec(13, 2))
    }

    pub fn validate(&self) -> Result<()> {
        if self.subsidy_halving_interval.is_negative() {
            return Err(EconomicsError::InvalidParameter(format!(
                "mint parameter subsidy halving interval should be positive, is {}",
                self.subsidy_halving_interval
            )));
        }
        Ok(())
    }

    /// Copies the params-owned fields into the minter.
    pub fn sync_with(&mut self, params: &Params) {
        self.subsidy_halving_interval = params.subsidy_halving_interval;
    }

    /// Provision for a block using this minter's interval and the params denom.
    pub fn block_provision(
        &self,
        params: &Params,
        height: u64,
        current_time: DateTime<Utc>,
        previous_time: DateTime<Utc>,
    ) -> Coin {
        subsidy::provision_with_interval(
            self.subsidy_halving_interval,
            &params.mint_denom,
            height,
            current_time,
            previous_time,
        )
    }
}

impl Default for Minter {
    fn default() -> Self {
        Self::default_initial()
    }
}
