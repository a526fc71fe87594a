//! Chain-native account addresses
//!
//! Addresses are bech32-style strings such as
//! `unigrid1pk2sxhrywmxsqtnas3p7gu0t8x43hlvy4jatsg`. The account key is the
//! byte string that follows the human-readable prefix.

use crate::error::{Result, StateError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ADDRESS_PREFIX: &str = "unigrid";

const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const BECH32_SEPARATOR: char = '1';
const MAX_ADDRESS_LEN: usize = 90;
const MIN_DATA_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccAddress {
    encoded: String,
    bytes: Vec<u8>,
}

impl AccAddress {
    /// Parses `address`, requiring `<prefix>1<data>` with a bech32 data part.
    pub fn from_bech32(address: &str, prefix: &str) -> Result<Self> {
        let invalid = |reason: &str| StateError::InvalidAddress(format!("{}: {}", address, reason));

        if address.len() > MAX_ADDRESS_LEN {
            return Err(invalid("too long"));
        }
        if address.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(invalid("must be lowercase"));
        }

        let rest = address
            .strip_prefix(prefix)
            .ok_or_else(|| invalid("wrong prefix"))?;
        let data = rest
            .strip_prefix(BECH32_SEPARATOR)
            .ok_or_else(|| invalid("missing separator"))?;

        if data.len() < MIN_DATA_LEN {
            return Err(invalid("data part too short"));
        }
        if let Some(c) = data.chars().find(|c| !BECH32_CHARSET.contains(*c)) {
            return Err(invalid(&format!("invalid character '{}'", c)));
        }

        Ok(Self {
            encoded: address.to_string(),
            bytes: rest.as_bytes().to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl fmt::Display for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}
