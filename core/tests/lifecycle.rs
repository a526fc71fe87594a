use chrono::{DateTime, Duration, TimeZone, Utc};
use ugd_core::*;
use ugd_economics::{Coin, Coins};

const ADDR: &str = "unigrid1pk2sxhrywmxsqtnas3p7gu0t8x43hlvy4jatsg";

fn ugd(amount: u64) -> Coins {
    Coins::from_coin(Coin::new("ugd", amount))
}

/// Advances the stored account and commits the mint, the way the mint
/// coordinator does for every external mint.
fn mint_to(db: &ChainDB, address: &AccAddress, amount: u64, at: DateTime<Utc>) -> Transition {
    let existing = db.get_account(address).unwrap();
    let balance = db.get_all_balances(address).unwrap();
    let step = advance(existing, address, &balance, at, || db.next_account_number()).unwrap();

    let record = MintRecord {
        block_height: db.all_mint_records().unwrap().len() as u64 + 1,
        account: address.to_string(),
        amount: ugd(amount),
        block_provision: Coins::new(),
    };
    db.commit_external_mint(&step.account, &ugd(amount), &record).unwrap();
    step.transition
}

#[test]
fn test_recipient_walks_through_all_states() {
    let db = ChainDB::temporary().unwrap();
    let address = AccAddress::from_bech32(ADDR, DEFAULT_ADDRESS_PREFIX).unwrap();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    assert_eq!(mint_to(&db, &address, 100, start), Transition::Created);
    let account = db.get_account(&address).unwrap().unwrap();
    assert_eq!(account.kind(), AccountKind::DelayedVesting);
    assert!(account.original_vesting().unwrap().is_empty());
    assert_eq!(db.get_all_balances(&address).unwrap(), ugd(100));

    let second = start + Duration::minutes(5);
    assert_eq!(mint_to(&db, &address, 50, second), Transition::Periodic);
    match db.get_account(&address).unwrap().unwrap() {
        Account::PeriodicVesting(acc) => {
            assert_eq!(acc.original_vesting, ugd(100));
            assert_eq!(acc.periods.len(), 10);
            assert_eq!(acc.periods[0].amount, ugd(10));
            assert_eq!(acc.start_time, second.timestamp());
        }
        other => panic!("unexpected account {:?}", other),
    }

    let third = second + Duration::minutes(5);
    assert_eq!(mint_to(&db, &address, 25, third), Transition::Unchanged);
    assert_eq!(db.get_all_balances(&address).unwrap(), ugd(175));
    assert_eq!(db.total_supply().unwrap(), ugd(175));
    assert_eq!(db.all_mint_records().unwrap().len(), 3);
    // Only the first mint allocated an account number
    assert_eq!(db.next_account_number().unwrap(), 1);
}

#[test]
fn test_plain_account_locks_existing_funds() {
    let db = ChainDB::temporary().unwrap();
    let address = AccAddress::from_bech32(ADDR, DEFAULT_ADDRESS_PREFIX).unwrap();
    let number = db.next_account_number().unwrap();
    db.set_account(&Account::Base(BaseAccount::new(address.clone(), number)))
        .unwrap();
    db.mint_coins("ugdmint", &ugd(70)).unwrap();
    db.send_coins_from_module_to_account("ugdmint", &address, &ugd(70))
        .unwrap();

    let now = Utc::now();
    assert_eq!(mint_to(&db, &address, 30, now), Transition::Delayed);

    let account = db.get_account(&address).unwrap().unwrap();
    assert_eq!(account.account_number(), number);
    assert_eq!(account.original_vesting(), Some(&ugd(70)));
}
