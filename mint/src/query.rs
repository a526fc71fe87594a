//! Read-only queries over mint module state

use crate::error::{MintError, Result};
use crate::keeper::{not_initialized, MintStore};
use ugd_core::MintRecord;
use ugd_economics::{Dec, Params};

pub struct Querier<'a, S> {
    store: &'a S,
}

impl<'a, S: MintStore> Querier<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn params(&self) -> Result<Params> {
        self.store
            .get_params()
            .map_err(MintError::Store)?
            .ok_or_else(|| not_initialized("params"))
    }

    /// Interval currently held by the minter.
    pub fn subsidy_halving_interval(&self) -> Result<Dec> {
        let minter = self
            .store
            .get_minter()
            .map_err(MintError::Store)?
            .ok_or_else(|| not_initialized("minter"))?;
        Ok(minter.subsidy_halving_interval)
    }

    pub fn mint_record(&self, height: u64) -> Result<Option<MintRecord>> {
        self.store.get_mint_record(height).map_err(MintError::Store)
    }

    /// Every recorded external mint, lowest height first.
    pub fn all_mint_records(&self) -> Result<Vec<MintRecord>> {
        self.store.all_mint_records().map_err(MintError::Store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genesis::{init_genesis, GenesisState};
    use ugd_core::ChainDB;
    use ugd_economics::{Coin, Coins};

    #[test]
    fn test_queries() {
        let db = ChainDB::temporary().unwrap();
        init_genesis(&db, &GenesisState::default()).unwrap();
        for height in [12u64, 3] {
            db.set_mint_record(&MintRecord {
                block_height: height,
                account: "unigrid1pk2sxhrywmxsqtnas3p7gu0t8x43hlvy4jatsg".to_string(),
                amount: Coins::from_coin(Coin::new("ugd", 7)),
                block_provision: Coins::new(),
            })
            .unwrap();
        }

        let querier = Querier::new(&db);
        assert_eq!(querier.params().unwrap(), Params::default());
        assert_eq!(
            querier.subsidy_halving_interval().unwrap(),
            Dec::with_prec(13, 2)
        );
        assert_eq!(querier.mint_record(12).unwrap().unwrap().block_height, 12);
        assert!(querier.mint_record(4).unwrap().is_none());

        let heights: Vec<u64> = querier
            .all_mint_records()
            .unwrap()
            .into_iter()
            .map(|r| r.block_height)
            .collect();
        assert_eq!(heights, vec![3, 12]);
    }
}
