use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use ugd_core::{
    AccAddress, Account, AccountKind, ChainDB, MintRecord, Result as StateResult, StateError,
    Transition,
};
use ugd_economics::constants::COIN;
use ugd_economics::{Coin, Coins, Dec, Minter, Params};
use ugd_hedgehog::{HedgehogData, MintCache};
use ugd_mint::*;

const ADDR: &str = "unigrid1pk2sxhrywmxsqtnas3p7gu0t8x43hlvy4jatsg";

type Coordinator = MintCoordinator<ChainDB, FixedBondedRatio>;

fn setup() -> (ChainDB, Arc<MintCache>, Coordinator) {
    let db = ChainDB::temporary().unwrap();
    init_genesis(&db, &GenesisState::default()).unwrap();
    coordinator_over(db)
}

fn coordinator_over(db: ChainDB) -> (ChainDB, Arc<MintCache>, Coordinator) {
    let cache = Arc::new(MintCache::new("unigrid"));
    let keeper = Keeper::new(
        db.clone(),
        FixedBondedRatio(Dec::with_prec(67, 2)),
        DEFAULT_FEE_COLLECTOR,
    );
    let coordinator = MintCoordinator::new(keeper, cache.clone());
    (db, cache, coordinator)
}

fn feed(entries: &[(String, i64)]) -> HedgehogData {
    let mut data = HedgehogData::default();
    for (key, amount) in entries {
        data.data.mints.insert(key.clone(), *amount);
    }
    data
}

fn block(height: u64, secs_since_previous: i64) -> BlockContext {
    let block_time = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        + Duration::seconds(height as i64 * 5);
    BlockContext {
        height,
        block_time,
        previous_block_time: Some(block_time - Duration::seconds(secs_since_previous)),
    }
}

fn ugd(amount: u64) -> Coins {
    Coins::from_coin(Coin::new("ugd", amount))
}

#[test]
fn test_subsidy_goes_to_fee_collector() {
    let (db, _cache, coordinator) = setup();

    let outcome = coordinator.begin_block(&block(10, 10)).unwrap();
    let amount = outcome.provision.amount;
    assert!(amount > 0);
    assert!(amount < COIN * 10 / 60);
    assert_eq!(outcome.provision.denom, "ugd");
    assert_eq!(outcome.external, ExternalMint::None);

    assert_eq!(db.module_balance(DEFAULT_FEE_COLLECTOR).unwrap(), ugd(amount));
    assert!(db.module_balance(MODULE_NAME).unwrap().is_empty());
    assert_eq!(db.total_supply().unwrap(), ugd(amount));

    assert_eq!(outcome.event.amount, amount);
    assert_eq!(outcome.event.bonded_ratio, Dec::with_prec(67, 2));
    // minter now mirrors params
    assert_eq!(
        db.get_minter().unwrap().unwrap().subsidy_halving_interval,
        db.get_params().unwrap().unwrap().subsidy_halving_interval
    );
}

#[test]
fn test_first_block_uses_nominal_window() {
    let (_, _, first) = setup();
    let (_, _, sixty) = setup();

    let mut ctx = block(3, 60);
    let expected = sixty.begin_block(&ctx).unwrap().provision;
    ctx.previous_block_time = None;
    assert_eq!(first.begin_block(&ctx).unwrap().provision, expected);
}

#[test]
fn test_hedgehog_mint_applied_at_its_height() {
    let (db, cache, coordinator) = setup();
    cache.merge(&feed(&[(format!("{}/80", ADDR), 100)]));
    let address = AccAddress::from_bech32(ADDR, "unigrid").unwrap();

    let outcome = coordinator.begin_block(&block(79, 5)).unwrap();
    assert_eq!(outcome.external, ExternalMint::None);
    assert!(db.get_account(&address).unwrap().is_none());

    let outcome = coordinator.begin_block(&block(80, 5)).unwrap();
    let (record, transition) = match outcome.external {
        ExternalMint::Applied { record, transition } => (record, transition),
        other => panic!("expected applied mint, got {:?}", other),
    };
    assert_eq!(transition, Transition::Created);
    assert_eq!(
        record,
        MintRecord {
            block_height: 80,
            account: ADDR.to_string(),
            amount: ugd(100 * COIN),
            block_provision: ugd(outcome.provision.amount),
        }
    );

    assert_eq!(db.get_all_balances(&address).unwrap(), ugd(100 * COIN));
    let account = db.get_account(&address).unwrap().unwrap();
    assert_eq!(account.kind(), AccountKind::DelayedVesting);
    assert_eq!(db.get_mint_record(80).unwrap(), Some(record));
    assert!(cache.lookup(80).is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_second_mint_makes_account_periodic() {
    let (db, cache, coordinator) = setup();
    cache.merge(&feed(&[
        (format!("{}/20", ADDR), 100),
        (format!("{}/21", ADDR), 50),
    ]));

    coordinator.begin_block(&block(20, 5)).unwrap();
    let ctx = block(21, 5);
    let outcome = coordinator.begin_block(&ctx).unwrap();
    assert!(matches!(
        outcome.external,
        ExternalMint::Applied {
            transition: Transition::Periodic,
            ..
        }
    ));

    let address = AccAddress::from_bech32(ADDR, "unigrid").unwrap();
    match db.get_account(&address).unwrap().unwrap() {
        Account::PeriodicVesting(acc) => {
            assert_eq!(acc.original_vesting, ugd(100 * COIN));
            assert_eq!(acc.periods.len(), 10);
            assert!(acc.periods.iter().all(|p| p.length == 60));
            assert_eq!(acc.periods[0].amount, ugd(10 * COIN));
            assert_eq!(acc.start_time, ctx.block_time.timestamp());
        }
        other => panic!("expected periodic account, got {:?}", other),
    }
    assert_eq!(db.get_all_balances(&address).unwrap(), ugd(150 * COIN));
}

#[test]
fn test_no_double_mint_on_replay() {
    let (db, cache, coordinator) = setup();
    cache.merge(&feed(&[(format!("{}/80", ADDR), 100)]));
    coordinator.begin_block(&block(80, 5)).unwrap();

    // a restarted node sees the same feed entry again
    let (db, cache, coordinator) = coordinator_over(db);
    cache.merge(&feed(&[(format!("{}/80", ADDR), 100)]));
    let outcome = coordinator.begin_block(&block(80, 5)).unwrap();

    match outcome.external {
        ExternalMint::Skipped { address, reason } => {
            assert_eq!(address, ADDR);
            assert!(reason.contains("already minted"));
        }
        other => panic!("expected skipped mint, got {:?}", other),
    }
    let address = AccAddress::from_bech32(ADDR, "unigrid").unwrap();
    assert_eq!(db.get_all_balances(&address).unwrap(), ugd(100 * COIN));
}

#[test]
fn test_bad_address_does_not_abort_block() {
    let (db, cache, coordinator) = setup();
    cache.merge(&feed(&[("unigrid1NOTVALID/5".to_string(), 10)]));

    let outcome = coordinator.begin_block(&block(5, 5)).unwrap();
    assert!(matches!(outcome.external, ExternalMint::Skipped { .. }));
    assert!(db.get_mint_record(5).unwrap().is_none());
    assert_eq!(db.total_supply().unwrap(), ugd(outcome.provision.amount));
    // dropped, not retried
    assert!(cache.lookup(5).is_none());
    assert!(cache.heights().is_empty());
}

#[test]
fn test_missing_params_is_fatal() {
    let db = ChainDB::temporary().unwrap();
    let (_, _, coordinator) = coordinator_over(db);

    let err = coordinator.begin_block(&block(1, 5)).unwrap_err();
    assert!(err.is_fatal());
}

/// Chain state whose external-mint commit always fails.
struct BrokenLedger(ChainDB);

impl AccountKeeper for BrokenLedger {
    fn get_account(&self, address: &AccAddress) -> StateResult<Option<Account>> {
        self.0.get_account(address)
    }

    fn set_account(&self, account: &Account) -> StateResult<()> {
        self.0.set_account(account)
    }

    fn next_account_number(&self) -> StateResult<u64> {
        self.0.next_account_number()
    }
}

impl BankKeeper for BrokenLedger {
    fn get_all_balances(&self, address: &AccAddress) -> StateResult<Coins> {
        self.0.get_all_balances(address)
    }

    fn mint_coins(&self, module: &str, coins: &Coins) -> StateResult<()> {
        self.0.mint_coins(module, coins)
    }

    fn send_coins_from_module_to_module(
        &self,
        sender: &str,
        recipient: &str,
        coins: &Coins,
    ) -> StateResult<()> {
        self.0.send_coins_from_module_to_module(sender, recipient, coins)
    }

    fn send_coins_from_module_to_account(
        &self,
        sender: &str,
        recipient: &AccAddress,
        coins: &Coins,
    ) -> StateResult<()> {
        self.0.send_coins_from_module_to_account(sender, recipient, coins)
    }
}

impl MintStore for BrokenLedger {
    fn get_minter(&self) -> StateResult<Option<Minter>> {
        self.0.get_minter()
    }

    fn set_minter(&self, minter: &Minter) -> StateResult<()> {
        self.0.set_minter(minter)
    }

    fn get_params(&self) -> StateResult<Option<Params>> {
        self.0.get_params()
    }

    fn set_params(&self, params: &Params) -> StateResult<()> {
        self.0.set_params(params)
    }

    fn get_mint_record(&self, height: u64) -> StateResult<Option<MintRecord>> {
        self.0.get_mint_record(height)
    }

    fn set_mint_record(&self, record: &MintRecord) -> StateResult<()> {
        self.0.set_mint_record(record)
    }

    fn all_mint_records(&self) -> StateResult<Vec<MintRecord>> {
        self.0.all_mint_records()
    }

    fn commit_external_mint(
        &self,
        _account: &Account,
        _coins: &Coins,
        _record: &MintRecord,
    ) -> StateResult<()> {
        Err(StateError::Storage("disk full".to_string()))
    }
}

#[test]
fn test_failed_commit_aborts_block_without_partial_state() {
    let db = ChainDB::temporary().unwrap();
    init_genesis(&db, &GenesisState::default()).unwrap();
    let cache = Arc::new(MintCache::new("unigrid"));
    let keeper = Keeper::new(
        BrokenLedger(db.clone()),
        FixedBondedRatio(Dec::with_prec(67, 2)),
        DEFAULT_FEE_COLLECTOR,
    );
    let coordinator = MintCoordinator::new(keeper, cache.clone());
    cache.merge(&feed(&[(format!("{}/80", ADDR), 100)]));

    let err = coordinator.begin_block(&block(80, 5)).unwrap_err();
    assert!(matches!(err, MintError::Bank(StateError::Storage(_))));
    assert!(err.is_fatal());

    // nothing of the external mint was written
    let address = AccAddress::from_bech32(ADDR, "unigrid").unwrap();
    assert!(db.get_account(&address).unwrap().is_none());
    assert!(db.get_all_balances(&address).unwrap().is_empty());
    assert!(db.module_balance(MODULE_NAME).unwrap().is_empty());
    assert!(db.get_mint_record(80).unwrap().is_none());
    assert_eq!(db.total_supply().unwrap(), db.module_balance(DEFAULT_FEE_COLLECTOR).unwrap());

    // the height stays scheduled so a restarted node can retry it
    assert_eq!(cache.lookup(80).unwrap().amount, 100);
}

#[test]
fn test_oversized_amount_is_dropped() {
    let (db, cache, coordinator) = setup();
    cache.merge(&feed(&[(format!("{}/9", ADDR), i64::MAX)]));

    let outcome = coordinator.begin_block(&block(9, 5)).unwrap();
    match outcome.external {
        ExternalMint::Skipped { reason, .. } => assert!(reason.contains("Invalid mint amount")),
        other => panic!("expected skipped mint, got {:?}", other),
    }
    assert_eq!(db.total_supply().unwrap(), ugd(outcome.provision.amount));
    assert!(cache.lookup(9).is_none());
}
