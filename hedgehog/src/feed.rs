//! Wire format of the hedgehog `mint-storage` endpoint
//!
//! ```json
//! {
//!   "timeStamp": "2023-06-16T19:03:33.104Z",
//!   "previousTimeStamp": "2023-06-16T19:03:01.836Z",
//!   "flags": 0,
//!   "type": "MINT_STORAGE",
//!   "data": { "mints": { "unigrid1pk2s.../80": 100 } },
//!   "previousData": { "mints": {} },
//!   "signature": "MIGIAkIB..."
//! }
//! ```
//!
//! Only `data.mints` is consumed. The signature is carried along but not
//! verified; the feed is trusted by network placement.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mints {
    /// `"<address>/<height>"` -> whole-token amount
    #[serde(default)]
    pub mints: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HedgehogData {
    #[serde(default, alias = "timeStamp")]
    pub timestamp: String,
    #[serde(default)]
    pub previous_time_stamp: String,
    #[serde(default)]
    pub flags: i64,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Mints,
    #[serde(default)]
    pub previous_data: Mints,
    #[serde(default)]
    pub signature: String,
}

/// A pending mint instruction for one block height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mint {
    pub address: String,
    pub amount: i64,
    pub height: u64,
}

/// Splits a composite `"<address>/<height>"` key.
///
/// Returns `None` when the separator is missing, the address is empty or
/// the height is not an unsigned integer.
pub fn parse_mint_key(key: &str) -> Option<(&str, u64)> {
    let (address, height) = key.split_once('/')?;
    if address.is_empty() {
        return None;
    }
    let height = height.parse::<u64>().ok()?;
    Some((address, height))
}
