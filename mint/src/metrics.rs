//! Prometheus metrics for per-block minting
//!
//! - `ugdmint_minted_tokens` - base subsidy minted in the last block (gauge)
//! - `ugdmint_external_mints_total` - hedgehog mints applied (counter)
//! - `ugdmint_external_mint_failures_total` - hedgehog mints dropped on error (counter)
//! - `ugdmint_begin_block_seconds` - time spent in begin_block (histogram)

use lazy_static::lazy_static;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref MINTED_TOKENS: IntGauge = IntGauge::new(
        "ugdmint_minted_tokens",
        "Base subsidy minted in the last block, in base units"
    ).expect("Failed to create minted_tokens metric");

    pub static ref EXTERNAL_MINTS: IntCounter = IntCounter::new(
        "ugdmint_external_mints_total",
        "Hedgehog mints applied"
    ).expect("Failed to create external_mints metric");

    pub static ref EXTERNAL_MINT_FAILURES: IntCounter = IntCounter::new(
        "ugdmint_external_mint_failures_total",
        "Hedgehog mints dropped because they could not be applied"
    ).expect("Failed to create external_mint_failures metric");

    pub static ref BEGIN_BLOCK_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "ugdmint_begin_block_seconds",
            "Time spent in the mint begin-block hook"
        ).buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0])
    ).expect("Failed to create begin_block_seconds metric");
}

pub fn register_mint_metrics(registry: &Registry) -> prometheus::Result<()> {
    registry.register(Box::new(MINTED_TOKENS.clone()))?;
    registry.register(Box::new(EXTERNAL_MINTS.clone()))?;
    registry.register(Box::new(EXTERNAL_MINT_FAILURES.clone()))?;
    registry.register(Box::new(BEGIN_BLOCK_SECONDS.clone()))?;
    Ok(())
}
