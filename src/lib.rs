//! Samples recent Solana blocks in fixed-width slot batches and records fee and compute-unit
//! statistics for economic (non-vote) transactions, priced in fiat.

pub mod classifier;
pub mod config;
pub mod planner;
pub mod report;
pub mod rpc;
pub mod sampler;
pub mod sink;
pub mod stats;
pub mod types;

pub use config::{SamplerConfig, StorageBackend};
pub use sampler::{FeeSampler, RunReport, SamplerError};
