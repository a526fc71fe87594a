//! Mint module errors

use thiserror::Error;
use ugd_core::StateError;
use ugd_economics::EconomicsError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MintError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Bank operation failed: {0}")]
    Bank(#[source] StateError),

    #[error("Store operation failed: {0}")]
    Store(#[source] StateError),

    #[error("Invalid mint amount: {0}")]
    InvalidAmount(String),

    #[error("Height {0} already minted")]
    AlreadyMinted(u64),

    #[error(transparent)]
    Economics(#[from] EconomicsError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl MintError {
    /// Fatal errors abort the block: continuing would leave supply or
    /// stored parameters inconsistent.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MintError::InvalidParameter(_)
                | MintError::Bank(_)
                | MintError::Store(_)
                | MintError::Economics(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MintError>;
