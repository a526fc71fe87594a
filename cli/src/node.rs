//! Devnet block driver
//!
//! Stands in for the consensus engine: produces one block per tick and
//! runs the mint hook for it.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;
use ugd_core::{ChainDB, StateError};
use ugd_economics::{Minter, Params};
use ugd_hedgehog::MintCache;
use ugd_mint::{
    init_genesis, BlockContext, BlockOutcome, FixedBondedRatio, GenesisState, Keeper,
    MintCoordinator, MintError,
};

pub type NodeCoordinator = MintCoordinator<ChainDB, FixedBondedRatio>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenesisStatus {
    /// Fresh data dir; genesis written
    Initialized,
    /// Existing chain; configured params replaced the stored ones
    ParamsUpdated,
    Existing,
}

/// Writes genesis on first start, or brings stored params in line with
/// the configured ones.
pub fn ensure_genesis(
    keeper: &Keeper<ChainDB, FixedBondedRatio>,
    params: Params,
) -> ugd_mint::Result<GenesisStatus> {
    let stored = keeper.store().get_params().map_err(MintError::Store)?;
    match stored {
        None => {
            init_genesis(
                keeper.store(),
                &GenesisState::new(Minter::default_initial(), params),
            )?;
            Ok(GenesisStatus::Initialized)
        }
        Some(stored) if stored != params => {
            keeper.set_params(&params)?;
            info!(
                halving_interval = %params.subsidy_halving_interval,
                "stored params replaced from config"
            );
            Ok(GenesisStatus::ParamsUpdated)
        }
        Some(_) => Ok(GenesisStatus::Existing),
    }
}

pub struct BlockProducer {
    coordinator: NodeCoordinator,
    last_block: Option<(u64, DateTime<Utc>)>,
}

impl BlockProducer {
    /// Continues from the last block recorded in the coordinator's store.
    pub fn resume(coordinator: NodeCoordinator) -> ugd_mint::Result<Self> {
        let last_block = match coordinator
            .keeper()
            .store()
            .get_last_block()
            .map_err(MintError::Store)?
        {
            Some((height, time)) => {
                let time = DateTime::from_timestamp(time, 0).ok_or_else(|| {
                    MintError::Store(StateError::Serialization(format!(
                        "invalid last block time {}",
                        time
                    )))
                })?;
                Some((height, time))
            }
            None => None,
        };

        if let Some((height, _)) = last_block {
            coordinator.cache().mark_processed(height);
        }

        Ok(Self {
            coordinator,
            last_block,
        })
    }

    pub fn cache(&self) -> &Arc<MintCache> {
        self.coordinator.cache()
    }

    pub fn last_height(&self) -> Option<u64> {
        self.last_block.map(|(height, _)| height)
    }

    pub fn next_height(&self) -> u64 {
        self.last_height().map_or(1, |height| height + 1)
    }

    /// Produces the next block at `block_time`.
    pub fn produce(&mut self, block_time: DateTime<Utc>) -> ugd_mint::Result<BlockOutcome> {
        let ctx = BlockContext {
            height: self.next_height(),
            block_time,
            previous_block_time: self.last_block.map(|(_, time)| time),
        };

        let outcome = self.coordinator.begin_block(&ctx)?;

        self.coordinator
            .keeper()
            .store()
            .set_last_block(ctx.height, block_time.timestamp())
            .map_err(MintError::Store)?;
        self.last_block = Some((ctx.height, block_time));

        Ok(outcome)
    }
}
