use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::info;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_fee_sampler::config::{
    Commitment, DEFAULT_BATCH_SIZE, DEFAULT_FETCH_DELAY_SECS, DEFAULT_RPC_URL, MAX_BATCH_SIZE,
    MIN_BATCH_SIZE,
};
use solana_fee_sampler::rpc::price::DEFAULT_PRICE_URL;
use solana_fee_sampler::rpc::{HttpPriceOracle, RpcBlockSource};
use solana_fee_sampler::{FeeSampler, SamplerConfig, StorageBackend};

#[derive(Parser)]
#[command(name = "solana-fee-sampler")]
#[command(version)]
#[command(about = "Sample recent Solana blocks and record fee and compute-unit statistics", long_about = None)]
struct Cli {
    /// Number of batches to sample
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    num_batches: u64,

    /// Where to store batch summaries
    #[arg(short, long, value_enum, default_value_t = StorageBackend::Db)]
    storage: StorageBackend,

    /// Slots per batch
    #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE,
          value_parser = clap::value_parser!(u64).range(MIN_BATCH_SIZE..=MAX_BATCH_SIZE))]
    batch_size: u64,

    /// Seconds to wait after each block request
    #[arg(short, long, default_value_t = DEFAULT_FETCH_DELAY_SECS, allow_negative_numbers = true)]
    delay: f64,

    /// Solana JSON-RPC endpoint
    #[arg(long, env = "SOLANA_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,

    /// Commitment used for slot and block requests
    #[arg(long, value_enum, default_value_t = Commitment::Confirmed)]
    commitment: Commitment,

    /// Price endpoint answering `{"solana": {"usd": <price>}}`
    #[arg(long, env = "PRICE_API_URL", default_value = DEFAULT_PRICE_URL)]
    price_url: String,

    /// SQLite database used with `--storage db`
    #[arg(long, default_value = "fee_samples.db")]
    db_path: PathBuf,

    /// Output file used with `--storage csv`
    #[arg(long, default_value = "fee_samples.csv")]
    csv_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = SamplerConfig::new(cli.num_batches, cli.batch_size, cli.delay)?;

    let commitment = cli.commitment.into();
    let rpc_client = Arc::new(RpcClient::new_with_commitment(cli.rpc_url.clone(), commitment));
    let blocks = RpcBlockSource::new(rpc_client, commitment);
    let prices = HttpPriceOracle::new(cli.price_url)?;
    let sink = cli
        .storage
        .open(&cli.db_path, &cli.csv_path)
        .context("Failed to open summary storage")?;

    info!("Using RPC endpoint {}", cli.rpc_url);
    let mut sampler = FeeSampler::new(blocks, prices, sink, config);
    let report = sampler.run().await?;
    info!(
        "Sampled {} windows: {} emitted, {} skipped",
        report.windows_scanned, report.windows_emitted, report.windows_skipped
    );

    Ok(())
}
