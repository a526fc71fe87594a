//! Per-block minting
//!
//! `begin_block` runs once per block, before transactions:
//!
//! 1. sync the minter's halving interval from params
//! 2. mint the block subsidy and hand it to the fee collector
//! 3. emit a [`MintEvent`]
//! 4. apply the hedgehog mint scheduled for this height, if any
//!
//! Failures in steps 1-2 abort the block. In step 4 everything is checked
//! before anything is written, and the write itself is one atomic commit.
//! A mint that fails its checks is logged, counted and dropped; a failed
//! commit aborts the block like any other bank error.

use crate::error::{MintError, Result};
use crate::events::MintEvent;
use crate::keeper::{ChainStore, Keeper, StakingKeeper};
use crate::metrics::{BEGIN_BLOCK_SECONDS, EXTERNAL_MINTS, EXTERNAL_MINT_FAILURES, MINTED_TOKENS};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use ugd_core::{advance, AccAddress, MintRecord, Transition};
use ugd_economics::constants::COIN;
use ugd_economics::{Coin, Coins, Params};
use ugd_hedgehog::{Mint, MintCache};

/// Host-supplied facts about the block being started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockContext {
    pub height: u64,
    pub block_time: DateTime<Utc>,
    /// `None` for the first block
    pub previous_block_time: Option<DateTime<Utc>>,
}

/// What happened to the hedgehog mint for a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalMint {
    /// Nothing scheduled for this height
    None,
    Applied {
        record: MintRecord,
        transition: Transition,
    },
    /// Scheduled but dropped
    Skipped { address: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    pub height: u64,
    /// Block subsidy
    pub provision: Coin,
    pub event: MintEvent,
    pub external: ExternalMint,
}

pub struct MintCoordinator<S, K> {
    keeper: Keeper<S, K>,
    cache: Arc<MintCache>,
}

impl<S: ChainStore, K: StakingKeeper> MintCoordinator<S, K> {
    pub fn new(keeper: Keeper<S, K>, cache: Arc<MintCache>) -> Self {
        Self { keeper, cache }
    }

    pub fn keeper(&self) -> &Keeper<S, K> {
        &self.keeper
    }

    pub fn cache(&self) -> &Arc<MintCache> {
        &self.cache
    }

    /// Runs the mint hook for one block.
    ///
    /// Only fatal errors are returned; the host should stop producing
    /// blocks on them.
    pub fn begin_block(&self, ctx: &BlockContext) -> Result<BlockOutcome> {
        let _timer = BEGIN_BLOCK_SECONDS.start_timer();

        let params = self.keeper.params()?;
        let mut minter = self.keeper.minter()?;
        minter.sync_with(&params);
        self.keeper.set_minter(&minter)?;

        let previous_time = ctx.previous_block_time.unwrap_or(ctx.block_time);
        let provision = minter.block_provision(&params, ctx.height, ctx.block_time, previous_time);
        let minted = Coins::from_coin(provision.clone());

        self.keeper.mint_coins(&minted)?;
        self.keeper.add_collected_fees(&minted)?;
        MINTED_TOKENS.set(i64::try_from(provision.amount).unwrap_or(i64::MAX));

        let event = MintEvent {
            bonded_ratio: self.keeper.bonded_ratio(),
            subsidy_halving_interval: minter.subsidy_halving_interval,
            amount: provision.amount,
        };
        debug!(height = ctx.height, provision = %provision, "{}", event);

        let external = match self.cache.lookup(ctx.height) {
            None => ExternalMint::None,
            Some(mint) => match self.apply_external_mint(ctx, &params, &minted, &mint) {
                Ok((record, transition)) => {
                    EXTERNAL_MINTS.inc();
                    ExternalMint::Applied { record, transition }
                }
                Err(e) if e.is_fatal() => {
                    EXTERNAL_MINT_FAILURES.inc();
                    error!(
                        height = ctx.height,
                        address = %mint.address,
                        error = %e,
                        "hedgehog mint aborted the block"
                    );
                    return Err(e);
                }
                Err(e) => {
                    EXTERNAL_MINT_FAILURES.inc();
                    if matches!(e, MintError::AlreadyMinted(_)) {
                        warn!(
                            height = ctx.height,
                            address = %mint.address,
                            "hedgehog mint already applied, skipping"
                        );
                    } else {
                        warn!(
                            height = ctx.height,
                            address = %mint.address,
                            error = %e,
                            "dropping hedgehog mint"
                        );
                    }
                    ExternalMint::Skipped {
                        address: mint.address,
                        reason: e.to_string(),
                    }
                }
            },
        };

        // done unless a fatal error left it for a retry
        self.cache.mark_processed(ctx.height);
        self.cache.prune();

        Ok(BlockOutcome {
            height: ctx.height,
            provision,
            event,
            external,
        })
    }

    fn apply_external_mint(
        &self,
        ctx: &BlockContext,
        params: &Params,
        block_provision: &Coins,
        mint: &Mint,
    ) -> Result<(MintRecord, Transition)> {
        let store = self.keeper.store();

        if store
            .get_mint_record(ctx.height)
            .map_err(MintError::Store)?
            .is_some()
        {
            return Err(MintError::AlreadyMinted(ctx.height));
        }

        let address = AccAddress::from_bech32(&mint.address, self.cache.address_prefix())
            .map_err(|e| MintError::InvalidAddress(e.to_string()))?;
        let amount = to_base_units(mint.amount)?;
        let coins = Coins::from_coin(Coin::new(params.mint_denom.clone(), amount));

        let existing = store.get_account(&address)?;
        let balance = store.get_all_balances(&address)?;
        let step = advance(existing, &address, &balance, ctx.block_time, || {
            store.next_account_number()
        })?;

        let record = MintRecord {
            block_height: ctx.height,
            account: mint.address.clone(),
            amount: coins.clone(),
            block_provision: block_provision.clone(),
        };
        self.keeper.commit_external_mint(&step.account, &coins, &record)?;

        if step.transition != Transition::Unchanged {
            info!(
                address = %address,
                kind = %step.account.kind(),
                transition = ?step.transition,
                "vesting account advanced"
            );
        }

        info!(
            height = ctx.height,
            address = %address,
            amount = %record.amount,
            "applied hedgehog mint"
        );
        Ok((record, step.transition))
    }
}

/// Feed amounts are whole tokens.
fn to_base_units(amount: i64) -> Result<u64> {
    u64::try_from(amount)
        .ok()
        .and_then(|whole| whole.checked_mul(COIN))
        .ok_or_else(|| {
            MintError::InvalidAmount(format!("feed amount {} does not fit in base units", amount))
        })
}
