//! Block subsidy curve
//!
//! The subsidy starts at one whole coin per nominal minute and decays by
//! 1% every `subsidy_halving_interval` heights. The result is scaled by
//! the wall-clock time that passed since the previous block, so slow
//! blocks issue proportionally more and fast blocks less.

use crate::coin::Coin;
use crate::constants::{
    COIN, DECAY_DENOMINATOR, DECAY_NUMERATOR, HEIGHT_OFFSET, NOMINAL_ELAPSED_SECS,
    SUBSIDY_BASE_HEIGHT, TARGET_SECONDS_PER_UNIT,
};
use crate::dec::Dec;
use crate::params::Params;
use chrono::{DateTime, Utc};

/// Provision for the block at `height`, using the halving interval from `params`.
///
/// `params` must have passed [`Params::validate`]; an unvalidated zero
/// interval yields zero decay periods instead of dividing by zero.
pub fn provision(
    params: &Params,
    height: u64,
    current_time: DateTime<Utc>,
    previous_time: DateTime<Utc>,
) -> Coin {
    provision_with_interval(
        params.subsidy_halving_interval,
        &params.mint_denom,
        height,
        current_time,
        previous_time,
    )
}

pub fn provision_with_interval(
    halving_interval: Dec,
    denom: &str,
    height: u64,
    current_time: DateTime<Utc>,
    previous_time: DateTime<Utc>,
) -> Coin {
    let periods = decay_periods(halving_interval, height);
    let subsidy = decayed_subsidy(periods);
    let elapsed = elapsed_seconds(current_time, previous_time);

    let scaled = (subsidy * elapsed / TARGET_SECONDS_PER_UNIT).max(0.0);
    // `as` saturates, so NaN and out-of-range values cannot wrap
    let amount = (scaled * COIN as f64) as u64;

    Coin::new(denom, amount)
}

/// Number of completed decay periods at `height`. Heights that fall before
/// the schedule start count as zero periods.
pub fn decay_periods(halving_interval: Dec, height: u64) -> u64 {
    let adjusted = height as i128 + HEIGHT_OFFSET as i128;
    let distance = adjusted - SUBSIDY_BASE_HEIGHT as i128;
    if distance <= 0 {
        return 0;
    }

    match halving_interval.quo_truncate(distance) {
        Some(periods) if periods > 0 => u64::try_from(periods).unwrap_or(u64::MAX),
        _ => 0,
    }
}

/// Undecayed subsidy of 1 multiplied by 99/100 once per period.
///
/// Iterates rather than calling `powi`; live chain state depends on the
/// rounding of each step. Once the value drops into the subnormal
/// range it can no longer produce a base unit and is reported as zero.
pub fn decayed_subsidy(periods: u64) -> f64 {
    let mut subsidy = 1.0_f64;
    for _ in 0..periods {
        subsidy = subsidy * DECAY_NUMERATOR / DECAY_DENOMINATOR;
        if subsidy < f64::MIN_POSITIVE {
            return 0.0;
        }
    }
    subsidy
}

/// Seconds between the two block times, or the nominal window when the
/// clock did not move forward.
pub fn elapsed_seconds(current_time: DateTime<Utc>, previous_time: DateTime<Utc>) -> f64 {
    if current_time <= previous_time {
        return NOMINAL_ELAPSED_SECS as f64;
    }
    (current_time - previous_time).num_milliseconds() as f64 / 1000.0
}
