//! Unigrid mint economics
//!
//! Implements the issuance side of the ugdmint module:
//! - Fixed-point decimal parameters
//! - Coin arithmetic
//! - Mint parameters and the minter record
//! - The block subsidy curve

pub mod coin;
pub mod dec;
pub mod error;
pub mod minter;
pub mod params;
pub mod subsidy;

pub use coin::{Coin, Coins};
pub use dec::Dec;
pub use error::{EconomicsError, Result};
pub use minter::Minter;
pub use params::Params;
pub use subsidy::provision;

/// Economic constants
pub mod constants {
    /// UGD base unit (8 decimal places)
    pub const COIN: u64 = 100_000_000;

    /// Default mint denomination
    pub const DEFAULT_MINT_DENOM: &str = "ugd";

    /// Added to every height to continue the predecessor chain's numbering
    pub const HEIGHT_OFFSET: u64 = 2_500_000;

    /// Height (in predecessor numbering) where the decay schedule starts
    pub const SUBSIDY_BASE_HEIGHT: u64 = 100_000;

    /// Per-period decay: subsidy *= 99 / 100
    pub const DECAY_NUMERATOR: f64 = 99.0;
    pub const DECAY_DENOMINATOR: f64 = 100.0;

    /// Seconds represented by one undecayed subsidy unit
    pub const TARGET_SECONDS_PER_UNIT: f64 = 60.0;

    /// Elapsed window assumed when block time did not advance
    pub const NOMINAL_ELAPSED_SECS: i64 = 60;

    /// Default blocks per year (5 second blocks, 8766 hours)
    pub const DEFAULT_BLOCKS_PER_YEAR: u64 = 60 * 60 * 8766 / 5;
}
