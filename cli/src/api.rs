//! HTTP query endpoints served by the node
//!
//! `ugd-cli` talks to these; the node holds the only handle on the sled
//! database, so queries go through the running process.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use prometheus::{Encoder, Registry, TextEncoder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use ugd_core::{ChainDB, MintRecord};
use ugd_economics::{Coins, Dec, Params};
use ugd_hedgehog::MintCache;
use ugd_mint::{MintError, Querier};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Mint record not found: {0}")]
    MintRecordNotFound(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<MintError> for ApiError {
    fn from(e: MintError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::MintRecordNotFound(height) => (
                StatusCode::NOT_FOUND,
                "mint_record_not_found",
                format!("No mint record at height {}", height),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = Json(json!({
            "error": error_type,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[derive(Clone)]
pub struct ApiState {
    pub db: ChainDB,
    pub cache: Arc<MintCache>,
    pub registry: Registry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalvingIntervalResponse {
    pub subsidy_halving_interval: Dec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub height: Option<u64>,
    pub block_time: Option<i64>,
    pub total_supply: Coins,
    pub pending_mints: Vec<u64>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/params", get(get_params))
        .route("/subsidy-halving-interval", get(get_subsidy_halving_interval))
        .route("/mints", get(get_mints))
        .route("/mints/{height}", get(get_mint))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

fn internal(e: impl std::fmt::Display) -> ApiError {
    ApiError::Internal(e.to_string())
}

async fn get_status(State(state): State<ApiState>) -> ApiResult<Json<StatusResponse>> {
    let last_block = state.db.get_last_block().map_err(internal)?;
    Ok(Json(StatusResponse {
        height: last_block.map(|(height, _)| height),
        block_time: last_block.map(|(_, time)| time),
        total_supply: state.db.total_supply().map_err(internal)?,
        pending_mints: state.cache.heights(),
    }))
}

async fn get_params(State(state): State<ApiState>) -> ApiResult<Json<Params>> {
    Ok(Json(Querier::new(&state.db).params()?))
}

async fn get_subsidy_halving_interval(
    State(state): State<ApiState>,
) -> ApiResult<Json<HalvingIntervalResponse>> {
    let subsidy_halving_interval = Querier::new(&state.db).subsidy_halving_interval()?;
    Ok(Json(HalvingIntervalResponse {
        subsidy_halving_interval,
    }))
}

async fn get_mints(State(state): State<ApiState>) -> ApiResult<Json<Vec<MintRecord>>> {
    Ok(Json(Querier::new(&state.db).all_mint_records()?))
}

async fn get_mint(
    State(state): State<ApiState>,
    Path(height): Path<u64>,
) -> ApiResult<Json<MintRecord>> {
    Querier::new(&state.db)
        .mint_record(height)?
        .map(Json)
        .ok_or(ApiError::MintRecordNotFound(height))
}

async fn get_metrics(State(state): State<ApiState>) -> ApiResult<Response> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&state.registry.gather(), &mut buffer)
        .map_err(internal)?;

    Ok((
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response())
}
