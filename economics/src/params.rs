//! Mint module parameters

use crate::constants::{DEFAULT_BLOCKS_PER_YEAR, DEFAULT_MINT_DENOM};
use crate::dec::Dec;
use crate::error::{EconomicsError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Denomination minted by the module
    pub mint_denom: String,

    /// Block heights per decay period
    pub subsidy_halving_interval: Dec,

    /// Target bonded ratio, reported only
    pub goal_bonded: Dec,

    pub blocks_per_year: u64,
}

impl Params {
    pub fn new(
        mint_denom: impl Into<String>,
        subsidy_halving_interval: Dec,
        goal_bonded: Dec,
        blocks_per_year: u64,
    ) -> Self {
        Self {
            mint_denom: mint_denom.into(),
            subsidy_halving_interval,
            goal_bonded,
            blocks_per_year,
        }
    }

    /// Rejects parameters the subsidy formula cannot be evaluated with.
    pub fn validate(&self) -> Result<()> {
        validate_mint_denom(&self.mint_denom)?;
        validate_subsidy_halving_interval(self.subsidy_halving_interval)?;
        validate_goal_bonded(self.goal_bonded)?;
        validate_blocks_per_year(self.blocks_per_year)?;
        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            mint_denom: DEFAULT_MINT_DENOM.to_string(),
            subsidy_halving_interval: Dec::with_prec(100_000_000, 2),
            goal_bonded: Dec::with_prec(67, 2),
            blocks_per_year: DEFAULT_BLOCKS_PER_YEAR,
        }
    }
}

fn validate_mint_denom(denom: &str) -> Result<()> {
    if denom.trim().is_empty() {
        return Err(EconomicsError::InvalidParameter(
            "mint denom cannot be blank".to_string(),
        ));
    }
    validate_denom(denom)
}

/// Denominations follow `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<()> {
    let invalid = || EconomicsError::InvalidParameter(format!("invalid denom: {}", denom));

    let mut chars = denom.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return Err(invalid()),
    }
    if !(3..=128).contains(&denom.len()) {
        return Err(invalid());
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-')) {
        return Err(invalid());
    }
    Ok(())
}

fn validate_subsidy_halving_interval(interval: Dec) -> Result<()> {
    if interval.is_negative() {
        return Err(EconomicsError::InvalidParameter(format!(
            "subsidy halving interval cannot be negative: {}",
            interval
        )));
    }
    if interval.is_zero() {
        return Err(EconomicsError::InvalidParameter(
            "subsidy halving interval must be positive".to_string(),
        ));
    }
    Ok(())
}

fn validate_goal_bonded(goal_bonded: Dec) -> Result<()> {
    if !goal_bonded.is_positive() {
        return Err(EconomicsError::InvalidParameter(format!(
            "goal bonded must be positive: {}",
            goal_bonded
        )));
    }
    if goal_bonded > Dec::ONE {
        return Err(EconomicsError::InvalidParameter(format!(
            "goal bonded too large: {}",
            goal_bonded
        )));
    }
    Ok(())
}

fn validate_blocks_per_year(blocks_per_year: u64) -> Result<()> {
    if blocks_per_year == 0 {
        return Err(EconomicsError::InvalidParameter(
            "blocks per year must be positive: 0".to_string(),
        ));
    }
    Ok(())
}
