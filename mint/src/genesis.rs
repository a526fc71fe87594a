//! Genesis import and export of the mint module

use crate::error::{MintError, Result};
use crate::keeper::{invalid_parameter, not_initialized, MintStore};
use serde::{Deserialize, Serialize};
use tracing::info;
use ugd_economics::{Minter, Params};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub minter: Minter,
    pub params: Params,
}

impl Default for GenesisState {
    fn default() -> Self {
        Self {
            minter: Minter::default_initial(),
            params: Params::default(),
        }
    }
}

impl GenesisState {
    pub fn new(minter: Minter, params: Params) -> Self {
        Self { minter, params }
    }

    pub fn validate(&self) -> Result<()> {
        self.params.validate().map_err(invalid_parameter)?;
        self.minter.validate().map_err(invalid_parameter)
    }
}

/// Validates `state` and writes the minter and params singletons.
pub fn init_genesis<S: MintStore>(store: &S, state: &GenesisState) -> Result<()> {
    state.validate()?;
    store.set_minter(&state.minter).map_err(MintError::Store)?;
    store.set_params(&state.params).map_err(MintError::Store)?;

    info!(
        denom = %state.params.mint_denom,
        halving_interval = %state.params.subsidy_halving_interval,
        "mint genesis initialized"
    );
    Ok(())
}

pub fn export_genesis<S: MintStore>(store: &S) -> Result<GenesisState> {
    let minter = store
        .get_minter()
        .map_err(MintError::Store)?
        .ok_or_else(|| not_initialized("minter"))?;
    let params = store
        .get_params()
        .map_err(MintError::Store)?
        .ok_or_else(|| not_initialized("params"))?;
    Ok(GenesisState { minter, params })
}
