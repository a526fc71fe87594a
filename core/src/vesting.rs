//! Vesting lifecycle for mint recipients
//!
//! Each time a recipient is minted to, its account moves at most one step
//! along `absent -> delayed -> periodic`:
//!
//! - a new account is created as delayed vesting with nothing locked yet
//! - a plain account becomes delayed vesting, locking its current balance
//! - a delayed account becomes periodic, splitting its current balance
//!   into ten one-minute tranches
//! - a periodic account is left alone

use crate::account::{Account, BaseAccount, DelayedVestingAccount, Period, PeriodicVestingAccount};
use crate::address::AccAddress;
use crate::error::{Result, StateError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ugd_economics::Coins;

/// Delayed vesting lasts ten 365-day years
pub const VESTING_DURATION_DAYS: i64 = 10 * 365;

pub const PERIOD_COUNT: u64 = 10;

pub const PERIOD_LENGTH_SECS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// No account existed; a delayed vesting account was created
    Created,
    /// Plain account converted to delayed vesting
    Delayed,
    /// Delayed vesting account converted to periodic vesting
    Periodic,
    /// Already periodic
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub account: Account,
    pub transition: Transition,
}

/// Computes the next representation of the account at `address`.
///
/// `balance` is the account's total balance before this block's mint.
/// `next_account_number` is only called when no account exists yet.
pub fn advance<F>(
    existing: Option<Account>,
    address: &AccAddress,
    balance: &Coins,
    block_time: DateTime<Utc>,
    next_account_number: F,
) -> Result<Advance>
where
    F: FnOnce() -> Result<u64>,
{
    if let Some(account) = &existing {
        if account.address() != address {
            return Err(StateError::InvalidAddress(format!(
                "account {} does not belong to {}",
                account.address(),
                address
            )));
        }
    }

    let end_time = (block_time + Duration::days(VESTING_DURATION_DAYS)).timestamp();

    let advance = match existing {
        None => {
            let account_number = next_account_number()?;
            Advance {
                account: Account::DelayedVesting(DelayedVestingAccount {
                    base: BaseAccount::new(address.clone(), account_number),
                    original_vesting: Coins::new(),
                    end_time,
                }),
                transition: Transition::Created,
            }
        }
        Some(Account::Base(base)) => Advance {
            account: Account::DelayedVesting(DelayedVestingAccount {
                base,
                original_vesting: balance.clone(),
                end_time,
            }),
            transition: Transition::Delayed,
        },
        Some(Account::DelayedVesting(delayed)) => Advance {
            account: Account::PeriodicVesting(periodic_from(delayed.base, balance, block_time)),
            transition: Transition::Periodic,
        },
        Some(account @ Account::PeriodicVesting(_)) => Advance {
            account,
            transition: Transition::Unchanged,
        },
    };

    Ok(advance)
}

/// Splits `balance` into equal tranches. The division remainder is not
/// assigned to any period.
fn periodic_from(
    base: BaseAccount,
    balance: &Coins,
    block_time: DateTime<Utc>,
) -> PeriodicVestingAccount {
    let per_period = balance.quo(PERIOD_COUNT);
    let periods: Vec<Period> = (0..PERIOD_COUNT)
        .map(|_| Period {
            length: PERIOD_LENGTH_SECS,
            amount: per_period.clone(),
        })
        .collect();

    let start_time = block_time.timestamp();
    let end_time = start_time + periods.iter().map(|p| p.length).sum::<i64>();

    PeriodicVestingAccount {
        base,
        original_vesting: balance.clone(),
        start_time,
        end_time,
        periods,
    }
}
