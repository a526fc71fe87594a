//! Unigrid chain state
//!
//! Chain-side collaborators of the mint module: addresses, account
//! variants and their vesting lifecycle, and the sled-backed ledger.

pub mod account;
pub mod address;
pub mod db;
pub mod error;
pub mod record;
pub mod vesting;

// Re-export main types
pub use account::{
    Account, AccountKind, BaseAccount, DelayedVestingAccount, Period, PeriodicVestingAccount,
};
pub use address::{AccAddress, DEFAULT_ADDRESS_PREFIX};
pub use db::ChainDB;
pub use error::{Result, StateError};
pub use record::MintRecord;
pub use vesting::{advance, Advance, Transition};
