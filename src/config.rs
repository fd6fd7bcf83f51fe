use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;
use solana_sdk::commitment_config::CommitmentConfig;
use thiserror::Error;

pub const MIN_BATCH_SIZE: u64 = 1;
pub const MAX_BATCH_SIZE: u64 = 100;
pub const DEFAULT_BATCH_SIZE: u64 = 10;
pub const DEFAULT_FETCH_DELAY_SECS: f64 = 2.0;
pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("batch size must be between 1 and 100, got {0}")]
    BatchSizeOutOfRange(u64),
    #[error("number of batches must be at least 1")]
    ZeroBatches,
    #[error("delay must be zero or more seconds, got {0}")]
    NegativeDelay(f64),
    #[error("delay is not a usable number of seconds: {0}")]
    InvalidDelay(f64),
    #[error("unknown storage backend {0:?}, expected `db` or `csv`")]
    UnknownStorage(String),
}

/// Where batch summaries are persisted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// SQLite table
    #[default]
    Db,
    /// Comma separated file
    Csv,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "db" => Ok(StorageBackend::Db),
            "csv" => Ok(StorageBackend::Csv),
            other => Err(ConfigError::UnknownStorage(other.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(value: Commitment) -> Self {
        match value {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

/// Validated run parameters for the sampler.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplerConfig {
    pub num_batches: u64,
    pub batch_size: u64,
    /// Pause after every block request
    pub fetch_delay: Duration,
}

impl SamplerConfig {
    pub fn new(num_batches: u64, batch_size: u64, delay_secs: f64) -> Result<Self, ConfigError> {
        if num_batches == 0 {
            return Err(ConfigError::ZeroBatches);
        }
        if !(MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&batch_size) {
            return Err(ConfigError::BatchSizeOutOfRange(batch_size));
        }
        if delay_secs < 0.0 {
            return Err(ConfigError::NegativeDelay(delay_secs));
        }
        let fetch_delay = Duration::try_from_secs_f64(delay_secs)
            .map_err(|_| ConfigError::InvalidDelay(delay_secs))?;
        Ok(SamplerConfig {
            num_batches,
            batch_size,
            fetch_delay,
        })
    }
}
