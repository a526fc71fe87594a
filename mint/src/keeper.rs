//! Collaborator seams of the mint module and the keeper built on them
//!
//! The traits name the slices of chain state the module touches. `ChainDB`
//! implements all of them; tests substitute their own.

use crate::error::{MintError, Result};
use crate::MODULE_NAME;
use ugd_core::{AccAddress, Account, ChainDB, MintRecord, Result as StateResult, StateError};
use ugd_economics::{Coins, Dec, EconomicsError, Minter, Params};

pub const DEFAULT_FEE_COLLECTOR: &str = "fee_collector";

pub trait AccountKeeper {
    fn get_account(&self, address: &AccAddress) -> StateResult<Option<Account>>;
    fn set_account(&self, account: &Account) -> StateResult<()>;
    fn next_account_number(&self) -> StateResult<u64>;
}

pub trait BankKeeper {
    fn get_all_balances(&self, address: &AccAddress) -> StateResult<Coins>;
    fn mint_coins(&self, module: &str, coins: &Coins) -> StateResult<()>;
    fn send_coins_from_module_to_module(
        &self,
        sender: &str,
        recipient: &str,
        coins: &Coins,
    ) -> StateResult<()>;
    fn send_coins_from_module_to_account(
        &self,
        sender: &str,
        recipient: &AccAddress,
        coins: &Coins,
    ) -> StateResult<()>;
}

/// Source of the bonded ratio reported in mint events.
pub trait StakingKeeper {
    fn bonded_ratio(&self) -> Dec;
}

pub trait MintStore {
    fn get_minter(&self) -> StateResult<Option<Minter>>;
    fn set_minter(&self, minter: &Minter) -> StateResult<()>;
    fn get_params(&self) -> StateResult<Option<Params>>;
    fn set_params(&self, params: &Params) -> StateResult<()>;
    fn get_mint_record(&self, height: u64) -> StateResult<Option<MintRecord>>;
    fn set_mint_record(&self, record: &MintRecord) -> StateResult<()>;
    fn all_mint_records(&self) -> StateResult<Vec<MintRecord>>;
    /// Writes the recipient account, creates `coins` in its balance and
    /// stores the record. Must apply all of it or none.
    fn commit_external_mint(
        &self,
        account: &Account,
        coins: &Coins,
        record: &MintRecord,
    ) -> StateResult<()>;
}

/// Everything the coordinator needs from chain state.
pub trait ChainStore: AccountKeeper + BankKeeper + MintStore {}

impl<T: AccountKeeper + BankKeeper + MintStore> ChainStore for T {}

impl AccountKeeper for ChainDB {
    fn get_account(&self, address: &AccAddress) -> StateResult<Option<Account>> {
        ChainDB::get_account(self, address)
    }

    fn set_account(&self, account: &Account) -> StateResult<()> {
        ChainDB::set_account(self, account)
    }

    fn next_account_number(&self) -> StateResult<u64> {
        ChainDB::next_account_number(self)
    }
}

impl BankKeeper for ChainDB {
    fn get_all_balances(&self, address: &AccAddress) -> StateResult<Coins> {
        ChainDB::get_all_balances(self, address)
    }

    fn mint_coins(&self, module: &str, coins: &Coins) -> StateResult<()> {
        ChainDB::mint_coins(self, module, coins)
    }

    fn send_coins_from_module_to_module(
        &self,
        sender: &str,
        recipient: &str,
        coins: &Coins,
    ) -> StateResult<()> {
        ChainDB::send_coins_from_module_to_module(self, sender, recipient, coins)
    }

    fn send_coins_from_module_to_account(
        &self,
        sender: &str,
        recipient: &AccAddress,
        coins: &Coins,
    ) -> StateResult<()> {
        ChainDB::send_coins_from_module_to_account(self, sender, recipient, coins)
    }
}

impl MintStore for ChainDB {
    fn get_minter(&self) -> StateResult<Option<Minter>> {
        ChainDB::get_minter(self)
    }

    fn set_minter(&self, minter: &Minter) -> StateResult<()> {
        ChainDB::set_minter(self, minter)
    }

    fn get_params(&self) -> StateResult<Option<Params>> {
        ChainDB::get_params(self)
    }

    fn set_params(&self, params: &Params) -> StateResult<()> {
        ChainDB::set_params(self, params)
    }

    fn get_mint_record(&self, height: u64) -> StateResult<Option<MintRecord>> {
        ChainDB::get_mint_record(self, height)
    }

    fn set_mint_record(&self, record: &MintRecord) -> StateResult<()> {
        ChainDB::set_mint_record(self, record)
    }

    fn all_mint_records(&self) -> StateResult<Vec<MintRecord>> {
        ChainDB::all_mint_records(self)
    }

    fn commit_external_mint(
        &self,
        account: &Account,
        coins: &Coins,
        record: &MintRecord,
    ) -> StateResult<()> {
        ChainDB::commit_external_mint(self, account, coins, record)
    }
}

/// Reports a configured ratio. Used where no staking module is wired in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBondedRatio(pub Dec);

impl StakingKeeper for FixedBondedRatio {
    fn bonded_ratio(&self) -> Dec {
        self.0
    }
}

pub(crate) fn not_initialized(what: &str) -> MintError {
    MintError::Store(StateError::Storage(format!("{} not initialized", what)))
}

pub(crate) fn invalid_parameter(e: EconomicsError) -> MintError {
    match e {
        EconomicsError::InvalidParameter(msg) => MintError::InvalidParameter(msg),
        other => MintError::Economics(other),
    }
}

/// Module-level access to chain state.
#[derive(Debug, Clone)]
pub struct Keeper<S, K> {
    store: S,
    staking: K,
    fee_collector: String,
}

impl<S: ChainStore, K: StakingKeeper> Keeper<S, K> {
    pub fn new(store: S, staking: K, fee_collector: impl Into<String>) -> Self {
        Self {
            store,
            staking,
            fee_collector: fee_collector.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fee_collector(&self) -> &str {
        &self.fee_collector
    }

    /// Stored params, validated.
    pub fn params(&self) -> Result<Params> {
        let params = self
            .store
            .get_params()
            .map_err(MintError::Store)?
            .ok_or_else(|| not_initialized("params"))?;
        params.validate().map_err(invalid_parameter)?;
        Ok(params)
    }

    pub fn set_params(&self, params: &Params) -> Result<()> {
        params.validate().map_err(invalid_parameter)?;
        self.store.set_params(params).map_err(MintError::Store)
    }

    pub fn minter(&self) -> Result<Minter> {
        self.store
            .get_minter()
            .map_err(MintError::Store)?
            .ok_or_else(|| not_initialized("minter"))
    }

    pub fn set_minter(&self, minter: &Minter) -> Result<()> {
        self.store.set_minter(minter).map_err(MintError::Store)
    }

    pub fn bonded_ratio(&self) -> Dec {
        self.staking.bonded_ratio()
    }

    /// Creates `coins` in the mint module account.
    pub fn mint_coins(&self, coins: &Coins) -> Result<()> {
        self.store
            .mint_coins(MODULE_NAME, coins)
            .map_err(MintError::Bank)
    }

    /// Moves freshly minted coins to the fee collector.
    pub fn add_collected_fees(&self, coins: &Coins) -> Result<()> {
        self.store
            .send_coins_from_module_to_module(MODULE_NAME, &self.fee_collector, coins)
            .map_err(MintError::Bank)
    }

    /// Issues an external mint to `account` together with its record.
    pub fn commit_external_mint(
        &self,
        account: &Account,
        coins: &Coins,
        record: &MintRecord,
    ) -> Result<()> {
        self.store
            .commit_external_mint(account, coins, record)
            .map_err(MintError::Bank)
    }
}
