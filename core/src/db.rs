//! Sled-based persistence for mint module state
//!
//! Holds the minter and params singletons, accounts, balances, total
//! supply and mint records. Values are bincode encoded; keys are string
//! prefixed so related entries can be scanned together.
use crate::account::Account;
use crate::address::AccAddress;
use crate::error::{Result, StateError};
use crate::record::MintRecord;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::debug;
use ugd_economics::{Coins, Minter, Params};

const MINTER_KEY: &[u8] = b"minter";
const PARAMS_KEY: &[u8] = b"params";
const SUPPLY_KEY: &[u8] = b"supply";
const NEXT_ACCOUNT_NUMBER_KEY: &[u8] = b"next_account_number";
const LAST_BLOCK_KEY: &[u8] = b"last_block";
const MINT_RECORD_PREFIX: &str = "mint_record:";

#[derive(Debug, Clone)]
pub struct ChainDB {
    db: sled::Db,
    path: String,
}

impl ChainDB {
    /// Open or create the database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let db = sled::open(&path)
            .map_err(|e| StateError::Storage(format!("Failed to open database: {}", e)))?;

        Ok(ChainDB { db, path: path_str })
    }

    /// In-memory database that is discarded on drop
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| StateError::Storage(format!("Failed to open database: {}", e)))?;

        Ok(ChainDB {
            db,
            path: String::new(),
        })
    }

    /// Get the database path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db
            .flush()
            .map_err(|e| StateError::Storage(format!("Failed to flush database: {}", e)))?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, key: &[u8], what: &str) -> Result<Option<T>> {
        match self.db.get(key) {
            Ok(Some(data)) => {
                let value = bincode::deserialize(&data).map_err(|e| {
                    StateError::Serialization(format!("Failed to deserialize {}: {}", what, e))
                })?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StateError::Storage(format!("Failed to load {}: {}", what, e))),
        }
    }

    fn put<T: Serialize>(&self, key: &[u8], value: &T, what: &str) -> Result<()> {
        let data = encode(value, what)?;
        self.db
            .insert(key, data)
            .map_err(|e| StateError::Storage(format!("Failed to save {}: {}", what, e)))?;
        Ok(())
    }

    // ---- minter & params -------------------------------------------------

    pub fn get_minter(&self) -> Result<Option<Minter>> {
        self.get(MINTER_KEY, "minter")
    }

    pub fn set_minter(&self, minter: &Minter) -> Result<()> {
        self.put(MINTER_KEY, minter, "minter")
    }

    pub fn get_params(&self) -> Result<Option<Params>> {
        self.get(PARAMS_KEY, "params")
    }

    pub fn set_params(&self, params: &Params) -> Result<()> {
        self.put(PARAMS_KEY, params, "params")
    }

    // ---- block progress --------------------------------------------------

    /// Height and unix time of the last block the host finished
    pub fn get_last_block(&self) -> Result<Option<(u64, i64)>> {
        self.get(LAST_BLOCK_KEY, "last block")
    }

    pub fn set_last_block(&self, height: u64, time: i64) -> Result<()> {
        self.put(LAST_BLOCK_KEY, &(height, time), "last block")
    }

    // ---- accounts --------------------------------------------------------

    pub fn get_account(&self, address: &AccAddress) -> Result<Option<Account>> {
        self.get(account_key(address).as_bytes(), "account")
    }

    pub fn set_account(&self, account: &Account) -> Result<()> {
        self.put(account_key(account.address()).as_bytes(), account, "account")
    }

    /// Returns the next unused account number and reserves it.
    pub fn next_account_number(&self) -> Result<u64> {
        let previous = self
            .db
            .fetch_and_update(NEXT_ACCOUNT_NUMBER_KEY, |old| {
                let next = old.map(decode_counter).unwrap_or(0).saturating_add(1);
                Some(next.to_be_bytes().to_vec())
            })
            .map_err(|e| {
                StateError::Storage(format!("Failed to allocate account number: {}", e))
            })?;

        Ok(previous.as_deref().map(decode_counter).unwrap_or(0))
    }

    // ---- bank ------------------------------------------------------------

    pub fn get_all_balances(&self, address: &AccAddress) -> Result<Coins> {
        Ok(self
            .get(balance_key(address).as_bytes(), "balance")?
            .unwrap_or_default())
    }

    pub fn module_balance(&self, module: &str) -> Result<Coins> {
        Ok(self
            .get(module_key(module).as_bytes(), "module balance")?
            .unwrap_or_default())
    }

    pub fn total_supply(&self) -> Result<Coins> {
        Ok(self.get(SUPPLY_KEY, "supply")?.unwrap_or_default())
    }

    /// Creates `coins` in `module`'s account and adds them to total supply.
    pub fn mint_coins(&self, module: &str, coins: &Coins) -> Result<()> {
        if coins.is_empty() {
            return Ok(());
        }

        let key = module_key(module);
        let balance = self.module_balance(module)?.checked_add(coins)?;
        let supply = self.total_supply()?.checked_add(coins)?;

        let mut batch = sled::Batch::default();
        batch.insert(key.as_bytes(), encode(&balance, "module balance")?);
        batch.insert(SUPPLY_KEY, encode(&supply, "supply")?);
        self.apply(batch, "mint")?;

        debug!(module, coins = %coins, "minted coins");
        Ok(())
    }

    pub fn send_coins_from_module_to_module(
        &self,
        sender: &str,
        recipient: &str,
        coins: &Coins,
    ) -> Result<()> {
        if coins.is_empty() || sender == recipient {
            return Ok(());
        }

        let sender_balance = debit(&self.module_balance(sender)?, coins, sender)?;
        let recipient_balance = self.module_balance(recipient)?.checked_add(coins)?;

        let mut batch = sled::Batch::default();
        batch.insert(module_key(sender).as_bytes(), encode(&sender_balance, "module balance")?);
        batch.insert(
            module_key(recipient).as_bytes(),
            encode(&recipient_balance, "module balance")?,
        );
        self.apply(batch, "module transfer")
    }

    pub fn send_coins_from_module_to_account(
        &self,
        sender: &str,
        recipient: &AccAddress,
        coins: &Coins,
    ) -> Result<()> {
        if coins.is_empty() {
            return Ok(());
        }

        let sender_balance = debit(&self.module_balance(sender)?, coins, sender)?;
        let recipient_balance = self.get_all_balances(recipient)?.checked_add(coins)?;

        let mut batch = sled::Batch::default();
        batch.insert(module_key(sender).as_bytes(), encode(&sender_balance, "module balance")?);
        batch.insert(
            balance_key(recipient).as_bytes(),
            encode(&recipient_balance, "balance")?,
        );
        self.apply(batch, "account transfer")
    }

    /// Stores `account`, credits it with newly created `coins` and writes
    /// `record` in a single batch. Either all of it lands or none does.
    pub fn commit_external_mint(
        &self,
        account: &Account,
        coins: &Coins,
        record: &MintRecord,
    ) -> Result<()> {
        let address = account.address();
        let balance = self.get_all_balances(address)?.checked_add(coins)?;
        let supply = self.total_supply()?.checked_add(coins)?;

        let mut batch = sled::Batch::default();
        batch.insert(account_key(address).as_bytes(), encode(account, "account")?);
        batch.insert(balance_key(address).as_bytes(), encode(&balance, "balance")?);
        batch.insert(SUPPLY_KEY, encode(&supply, "supply")?);
        batch.insert(
            mint_record_key(record.block_height).as_bytes(),
            encode(record, "mint record")?,
        );
        self.apply(batch, "external mint")?;

        debug!(address = %address, coins = %coins, "committed external mint");
        Ok(())
    }

    fn apply(&self, batch: sled::Batch, what: &str) -> Result<()> {
        self.db
            .apply_batch(batch)
            .map_err(|e| StateError::Storage(format!("Failed to apply {}: {}", what, e)))
    }

    // ---- mint records ----------------------------------------------------

    pub fn set_mint_record(&self, record: &MintRecord) -> Result<()> {
        self.put(
            mint_record_key(record.block_height).as_bytes(),
            record,
            "mint record",
        )
    }

    pub fn get_mint_record(&self, height: u64) -> Result<Option<MintRecord>> {
        self.get(mint_record_key(height).as_bytes(), "mint record")
    }

    /// All mint records in ascending height order
    pub fn all_mint_records(&self) -> Result<Vec<MintRecord>> {
        let mut records = Vec::new();

        for item in self.db.scan_prefix(MINT_RECORD_PREFIX.as_bytes()) {
            match item {
                Ok((_key, value)) => {
                    let record: MintRecord = bincode::deserialize(&value).map_err(|e| {
                        StateError::Serialization(format!(
                            "Failed to deserialize mint record: {}",
                            e
                        ))
                    })?;
                    records.push(record);
                }
                Err(e) => {
                    return Err(StateError::Storage(format!(
                        "Failed to scan mint records: {}",
                        e
                    )))
                }
            }
        }

        Ok(records)
    }
}

fn encode<T: Serialize>(value: &T, what: &str) -> Result<Vec<u8>> {
    bincode::serialize(value)
        .map_err(|e| StateError::Serialization(format!("Failed to serialize {}: {}", what, e)))
}

fn debit(balance: &Coins, coins: &Coins, holder: &str) -> Result<Coins> {
    balance
        .checked_sub(coins)
        .ok_or_else(|| StateError::InsufficientFunds {
            holder: holder.to_string(),
            requested: coins.to_string(),
            available: balance.to_string(),
        })
}

fn decode_counter(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    if bytes.len() == 8 {
        buf.copy_from_slice(bytes);
    }
    u64::from_be_bytes(buf)
}

fn account_key(address: &AccAddress) -> String {
    format!("account:{}", address)
}

fn balance_key(address: &AccAddress) -> String {
    format!("balance:{}", address)
}

fn module_key(module: &str) -> String {
    format!("module:{}", module)
}

/// Zero-padded so lexicographic key order is height order
fn mint_record_key(height: u64) -> String {
    format!("{}{:020}", MINT_RECORD_PREFIX, height)
}
