//! Chain state errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Insufficient funds in {holder}: requested {requested}, available {available}")]
    InsufficientFunds {
        holder: String,
        requested: String,
        available: String,
    },

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),
}

impl From<ugd_economics::EconomicsError> for StateError {
    fn from(e: ugd_economics::EconomicsError) -> Self {
        StateError::Overflow(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StateError>;
