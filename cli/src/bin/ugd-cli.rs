//! Unigrid CLI - query mint module state from a running node

use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use ugd_core::MintRecord;
use ugd_economics::constants::COIN;
use ugd_economics::{Dec, Params};
use ugd_node::api::{HalvingIntervalResponse, StatusResponse};
use ugd_node::config::DEFAULT_API_URL;

#[derive(Parser)]
#[command(name = "ugd-cli")]
#[command(about = "Unigrid mint module query tool", version)]
struct Cli {
    /// Node API endpoint
    #[arg(short, long, default_value = DEFAULT_API_URL)]
    api: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show chain height, supply and pending hedgehog mints
    Status,

    /// Show the current mint parameters
    Params,

    /// Show the minter's subsidy halving interval
    SubsidyHalvingInterval,

    /// List all applied hedgehog mints
    Mints,

    /// Show the hedgehog mint applied at a height
    Mint {
        height: u64,
    },

    /// Evaluate the block subsidy offline
    Provision {
        #[arg(long)]
        height: u64,

        /// Seconds since the previous block
        #[arg(long, default_value = "60")]
        elapsed_secs: i64,

        /// Subsidy halving interval in blocks
        #[arg(long, default_value = "1000000")]
        halving_interval: Dec,
    },
}

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: String,
) -> Result<T, Box<dyn std::error::Error>> {
    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message = body["message"].as_str().unwrap_or("request failed").to_string();
        return Err(format!("{} ({})", message, status).into());
    }
    Ok(response.json().await?)
}

fn print_record(record: &MintRecord) {
    println!(
        "  {} {}  {}  {}",
        "#".bright_black(),
        record.block_height.to_string().cyan(),
        record.amount.to_string().green(),
        record.account
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = cli.api.trim_end_matches('/');

    match cli.command {
        Commands::Status => {
            let status: StatusResponse = get_json(&client, format!("{}/status", api)).await?;

            println!("\n📊 Unigrid Chain Status");
            println!("═══════════════════════════════════");
            match status.height {
                Some(height) => println!("Block Height:    {}", height),
                None => println!("Block Height:    {}", "no blocks yet".yellow()),
            }
            println!("Total Supply:    {}", status.total_supply);
            println!("Pending Mints:   {:?}", status.pending_mints);
            println!();
        }

        Commands::Params => {
            let params: Params = get_json(&client, format!("{}/params", api)).await?;

            println!("\n⚙️  Mint Params");
            println!("═══════════════════════════════════");
            println!("Mint Denom:               {}", params.mint_denom);
            println!("Subsidy Halving Interval: {}", params.subsidy_halving_interval);
            println!("Goal Bonded:              {}", params.goal_bonded);
            println!("Blocks Per Year:          {}", params.blocks_per_year);
            println!();
        }

        Commands::SubsidyHalvingInterval => {
            let response: HalvingIntervalResponse =
                get_json(&client, format!("{}/subsidy-halving-interval", api)).await?;
            println!("{}", response.subsidy_halving_interval);
        }

        Commands::Mints => {
            let records: Vec<MintRecord> = get_json(&client, format!("{}/mints", api)).await?;

            println!("\n💰 Hedgehog Mints ({})", records.len());
            println!("═══════════════════════════════════");
            for record in &records {
                print_record(record);
            }
            println!();
        }

        Commands::Mint { height } => {
            let record: MintRecord =
                get_json(&client, format!("{}/mints/{}", api, height)).await?;
            print_record(&record);
            println!("  block provision: {}", record.block_provision);
        }

        Commands::Provision {
            height,
            elapsed_secs,
            halving_interval,
        } => {
            let params = Params {
                subsidy_halving_interval: halving_interval,
                ..Params::default()
            };
            params.validate()?;

            let (current, previous) = block_window(elapsed_secs)
                .ok_or_else(|| format!("elapsed seconds out of range: {}", elapsed_secs))?;
            let coin = ugd_economics::provision(&params, height, current, previous);

            println!(
                "{} ({:.8} UGD)",
                coin.to_string().green(),
                coin.amount as f64 / COIN as f64
            );
        }
    }

    Ok(())
}

/// Block and previous-block times `elapsed_secs` apart, anchored at the
/// unix epoch. Negative spans count as zero.
fn block_window(elapsed_secs: i64) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let previous = DateTime::<Utc>::UNIX_EPOCH;
    let elapsed = Duration::try_seconds(elapsed_secs.max(0))?;
    Some((previous.checked_add_signed(elapsed)?, previous))
}
