//! Coin and multi-denomination coin sets

use crate::error::{EconomicsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u64,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A set of coins keyed by denomination. Zero amounts are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins(BTreeMap<String, u64>);

impl Coins {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn from_coin(coin: Coin) -> Self {
        let mut coins = Self::new();
        if !coin.is_zero() {
            coins.0.insert(coin.denom, coin.amount);
        }
        coins
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn amount_of(&self, denom: &str) -> u64 {
        self.0.get(denom).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coin> + '_ {
        self.0
            .iter()
            .map(|(denom, amount)| Coin::new(denom.clone(), *amount))
    }

    pub fn checked_add(&self, other: &Coins) -> Result<Coins> {
        let mut sum = self.clone();
        for (denom, amount) in &other.0 {
            let entry = sum.0.entry(denom.clone()).or_insert(0);
            *entry = entry
                .checked_add(*amount)
                .ok_or_else(|| EconomicsError::Overflow(format!("{} + {}", self, other)))?;
        }
        Ok(sum)
    }

    /// Subtracts `other`, returning `None` if any denomination would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut diff = self.clone();
        for (denom, amount) in &other.0 {
            let current = diff.0.get(denom).copied().unwrap_or(0);
            let remaining = current.checked_sub(*amount)?;
            if remaining == 0 {
                diff.0.remove(denom);
            } else {
                diff.0.insert(denom.clone(), remaining);
            }
        }
        Some(diff)
    }

    /// Divides every denomination by `divisor`, truncating. Denominations
    /// that round down to zero are dropped.
    pub fn quo(&self, divisor: u64) -> Coins {
        if divisor == 0 {
            return Coins::new();
        }
        Coins(
            self.0
                .iter()
                .map(|(denom, amount)| (denom.clone(), amount / divisor))
                .filter(|(_, amount)| *amount > 0)
                .collect(),
        )
    }
}

impl From<Coin> for Coins {
    fn from(coin: Coin) -> Self {
        Coins::from_coin(coin)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}
