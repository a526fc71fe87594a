use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use owo_colors::OwoColorize;
use prometheus::Registry;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use ugd_core::ChainDB;
use ugd_hedgehog::{register_feed_metrics, FeedRefresher, HedgehogClient, MintCache};
use ugd_mint::{register_mint_metrics, ExternalMint, FixedBondedRatio, Keeper, MintCoordinator};
use ugd_node::api::{self, ApiState};
use ugd_node::config::expand_path;
use ugd_node::{ensure_genesis, BlockProducer, GenesisStatus, NodeConfig};

#[derive(Parser)]
#[command(name = "ugd-node")]
#[command(about = "Unigrid devnet node running the ugdmint module", version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop after producing this many blocks
    #[arg(long)]
    blocks: Option<u64>,

    /// Do not poll hedgehog; only the block subsidy is minted
    #[arg(long)]
    no_feed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(expand_path("$HOME/.ugd/config.toml")));

    println!("{}", "Unigrid Node v0.1.0".cyan().bold());
    println!("Config file: {:?}\n", config_path);

    let config = NodeConfig::load(&config_path)?;
    let params = config.params()?;

    let data_dir = config.chain.data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;
    let db = ChainDB::open(&data_dir)?;

    let keeper = Keeper::new(
        db.clone(),
        FixedBondedRatio(config.chain.bonded_ratio),
        config.chain.fee_collector.clone(),
    );
    match ensure_genesis(&keeper, params)? {
        GenesisStatus::Initialized => println!("{}", "✓ Genesis written".green()),
        GenesisStatus::ParamsUpdated => println!("{}", "✓ Params updated from config".green()),
        GenesisStatus::Existing => println!("{}", "✓ Chain state loaded".green()),
    }

    let registry = Registry::new();
    if let Err(e) =
        register_feed_metrics(&registry).and_then(|_| register_mint_metrics(&registry))
    {
        warn!(error = %e, "failed to register metrics");
    }

    // resume first so the first feed merge already skips finished heights
    let cache = Arc::new(MintCache::new(config.hedgehog.address_prefix.clone()));
    let coordinator = MintCoordinator::new(keeper, cache.clone());
    let mut producer = BlockProducer::resume(coordinator)?;

    let refresher = if cli.no_feed {
        println!("{}", "⚠ Hedgehog feed disabled".yellow());
        None
    } else {
        let client = HedgehogClient::new(&config.hedgehog)?;
        println!("{} {}", "✓ Hedgehog feed:".green(), client.endpoint());
        Some(FeedRefresher::start(
            client,
            cache.clone(),
            config.hedgehog.refresh_interval(),
        ))
    };

    if config.api.enabled {
        let state = ApiState {
            db: db.clone(),
            cache: cache.clone(),
            registry: registry.clone(),
        };
        let listener = tokio::net::TcpListener::bind(config.api.listen)
            .await
            .with_context(|| format!("Failed to bind API on {}", config.api.listen))?;
        println!("{} http://{}", "✓ API listening on".green(), config.api.listen);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, api::router(state)).await {
                error!(error = %e, "API server stopped");
            }
        });
    }

    println!("\n{}", "Node Status: ACTIVE".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    info!(next_height = producer.next_height(), "starting block production");

    let mut ticker = time::interval(Duration::from_secs(config.chain.block_interval_secs.max(1)));
    let mut produced = 0u64;
    let result = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown requested");
                break Ok(());
            }
            _ = ticker.tick() => {
                match producer.produce(Utc::now()) {
                    Ok(outcome) => {
                        info!(
                            height = outcome.height,
                            provision = %outcome.provision,
                            "block produced"
                        );
                        if let ExternalMint::Applied { record, .. } = &outcome.external {
                            println!(
                                "[{}] {} {} -> {}",
                                outcome.height,
                                "hedgehog mint".green(),
                                record.amount,
                                record.account
                            );
                        }
                    }
                    Err(e) => {
                        error!(
                            height = producer.next_height(),
                            error = %e,
                            fatal = e.is_fatal(),
                            "block production halted"
                        );
                        break Err(e);
                    }
                }

                produced += 1;
                if cli.blocks.is_some_and(|limit| produced >= limit) {
                    break Ok(());
                }
            }
        }
    };

    if let Some(refresher) = refresher {
        refresher.stop().await;
    }
    db.flush()?;
    println!("{}", "Node stopped".bright_black());

    result.map_err(Into::into)
}
