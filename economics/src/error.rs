//! Economics error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomicsError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),

    #[error("Invalid coin: {0}")]
    InvalidCoin(String),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),
}

pub type Result<T> = std::result::Result<T, EconomicsError>;
