//! Account representations recognized by the mint module

use crate::address::AccAddress;
use serde::{Deserialize, Serialize};
use std::fmt;
use ugd_economics::Coins;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAccount {
    pub address: AccAddress,
    /// Encoded public key, absent until the account first signs
    pub pub_key: Option<Vec<u8>>,
    pub account_number: u64,
    pub sequence: u64,
}

impl BaseAccount {
    pub fn new(address: AccAddress, account_number: u64) -> Self {
        Self {
            address,
            pub_key: None,
            account_number,
            sequence: 0,
        }
    }
}

/// Everything stays locked until `end_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedVestingAccount {
    pub base: BaseAccount,
    pub original_vesting: Coins,
    /// Unix seconds
    pub end_time: i64,
}

/// One tranche of a periodic schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Seconds after the previous period ends
    pub length: i64,
    pub amount: Coins,
}

/// Releases `periods` one after another starting at `start_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicVestingAccount {
    pub base: BaseAccount,
    pub original_vesting: Coins,
    /// Unix seconds
    pub start_time: i64,
    /// Unix seconds
    pub end_time: i64,
    pub periods: Vec<Period>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Account {
    Base(BaseAccount),
    DelayedVesting(DelayedVestingAccount),
    PeriodicVesting(PeriodicVestingAccount),
}

/// Variant tag, for logging and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    Base,
    DelayedVesting,
    PeriodicVesting,
}

impl Account {
    pub fn base(&self) -> &BaseAccount {
        match self {
            Account::Base(base) => base,
            Account::DelayedVesting(acc) => &acc.base,
            Account::PeriodicVesting(acc) => &acc.base,
        }
    }

    pub fn address(&self) -> &AccAddress {
        &self.base().address
    }

    pub fn account_number(&self) -> u64 {
        self.base().account_number
    }

    pub fn kind(&self) -> AccountKind {
        match self {
            Account::Base(_) => AccountKind::Base,
            Account::DelayedVesting(_) => AccountKind::DelayedVesting,
            Account::PeriodicVesting(_) => AccountKind::PeriodicVesting,
        }
    }

    /// Coins locked when the account entered its vesting state.
    pub fn original_vesting(&self) -> Option<&Coins> {
        match self {
            Account::Base(_) => None,
            Account::DelayedVesting(acc) => Some(&acc.original_vesting),
            Account::PeriodicVesting(acc) => Some(&acc.original_vesting),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountKind::Base => "base",
            AccountKind::DelayedVesting => "delayed_vesting",
            AccountKind::PeriodicVesting => "periodic_vesting",
        };
        f.write_str(name)
    }
}
