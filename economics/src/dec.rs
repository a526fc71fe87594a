//! Fixed-point decimal used for chain parameters
//!
//! Values carry 18 decimal places and are serialized as strings
//! (`"0.670000000000000000"`) so they survive JSON and bincode unchanged.

use crate::error::{EconomicsError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of decimal places
pub const PRECISION: u32 = 18;

const ONE_RAW: i128 = 1_000_000_000_000_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(i128);

impl Dec {
    pub const ZERO: Dec = Dec(0);
    pub const ONE: Dec = Dec(ONE_RAW);

    pub fn from_int(value: i64) -> Self {
        Dec(value as i128 * ONE_RAW)
    }

    /// `value * 10^-prec`, so `with_prec(67, 2)` is 0.67.
    ///
    /// Precisions above 18 are clamped.
    pub fn with_prec(value: i64, prec: u32) -> Self {
        let prec = prec.min(PRECISION);
        Dec(value as i128 * 10i128.pow(PRECISION - prec))
    }

    /// Underlying value scaled by 10^18
    pub fn raw(self) -> i128 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Integer quotient `numerator / self`, truncated toward zero.
    ///
    /// Returns `None` for a zero divisor or on overflow.
    pub fn quo_truncate(self, numerator: i128) -> Option<i128> {
        if self.0 == 0 {
            return None;
        }
        numerator.checked_mul(ONE_RAW)?.checked_div(self.0)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / ONE_RAW as f64
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let one = ONE_RAW as u128;
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:018}", sign, abs / one, abs % one)
    }
}

impl FromStr for Dec {
    type Err = EconomicsError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EconomicsError::InvalidDecimal(s.to_string());

        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };

        if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !frac_part.chars().all(|c| c.is_ascii_digit()) || frac_part.len() > PRECISION as usize
        {
            return Err(invalid());
        }
        if body.contains('.') && frac_part.is_empty() {
            return Err(invalid());
        }

        let int_value: i128 = int_part.parse().map_err(|_| invalid())?;
        let frac_value: i128 = if frac_part.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", frac_part, width = PRECISION as usize);
            padded.parse().map_err(|_| invalid())?
        };

        let raw = int_value
            .checked_mul(ONE_RAW)
            .and_then(|v| v.checked_add(frac_value))
            .ok_or_else(invalid)?;

        Ok(Dec(if negative { -raw } else { raw }))
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_prec() {
        assert_eq!(Dec::with_prec(67, 2).to_string(), "0.670000000000000000");
        assert_eq!(
            Dec::with_prec(100_000_000, 2).to_string(),
            "1000000.000000000000000000"
        );
        assert_eq!(Dec::with_prec(5, 0), Dec::from_int(5));
    }

    #[test]
    fn test_parse() {
        assert_eq!("0.67".parse::<Dec>().unwrap(), Dec::with_prec(67, 2));
        assert_eq!("50000".parse::<Dec>().unwrap(), Dec::from_int(50_000));
        assert_eq!("-1.5".parse::<Dec>().unwrap(), Dec::with_prec(-15, 1));
        assert!("".parse::<Dec>().is_err());
        assert!(".5".parse::<Dec>().is_err());
        assert!("1.".parse::<Dec>().is_err());
        assert!("1.2.3".parse::<Dec>().is_err());
        assert!("abc".parse::<Dec>().is_err());
        assert!("0.1234567890123456789".parse::<Dec>().is_err());
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Dec::with_prec(-5, 1).to_string(), "-0.500000000000000000");
    }

    #[test]
    fn test_quo_truncate() {
        let interval = Dec::from_int(50_000);
        assert_eq!(interval.quo_truncate(2_400_010), Some(48));
        assert_eq!(interval.quo_truncate(49_999), Some(0));
        assert_eq!(Dec::with_prec(15, 1).quo_truncate(4), Some(2));
        assert_eq!(Dec::ZERO.quo_truncate(10), None);
    }

    #[test]
    fn test_serde_as_string() {
        let d = Dec::with_prec(13, 2);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"0.130000000000000000\"");
        let back: Dec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
