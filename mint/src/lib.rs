//! The ugdmint module
//!
//! Mints the decaying block subsidy every block and applies external
//! mints scheduled by hedgehog, moving their recipients into vesting
//! accounts.

pub mod coordinator;
pub mod error;
pub mod events;
pub mod genesis;
pub mod keeper;
pub mod metrics;
pub mod query;

/// Module account name; newly minted coins land here first
pub const MODULE_NAME: &str = "ugdmint";

pub use coordinator::{BlockContext, BlockOutcome, ExternalMint, MintCoordinator};
pub use error::{MintError, Result};
pub use events::MintEvent;
pub use genesis::{export_genesis, init_genesis, GenesisState};
pub use keeper::{
    AccountKeeper, BankKeeper, ChainStore, FixedBondedRatio, Keeper, MintStore, StakingKeeper,
    DEFAULT_FEE_COLLECTOR,
};
pub use metrics::register_mint_metrics;
pub use query::Querier;
