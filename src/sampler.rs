//! Batch sampling loop.
//!
//! For every planned window the sampler takes a fresh price quote, walks the window's slots
//! newest first with a pause after each block request, accumulates fee and compute-unit series
//! from economic transactions and hands the resulting summary to the reporter and the sink.
//!
//! A failed price lookup ends the run. Missing blocks, windows without fees and failed sink
//! writes are logged and skipped.

use crate::classifier::is_voting_transaction;
use crate::config::SamplerConfig;
use crate::planner::BatchPlanner;
use crate::report;
use crate::rpc::price::validate_price;
use crate::rpc::{BlockSource, PriceOracle};
use crate::sink::SummarySink;
use crate::stats::{sort_ascending, ComputeUnitStats, FeeStats};
use crate::types::{BatchSummary, BatchWindow, SampledTransaction};

use log::{error, info, warn};
use solana_sdk::clock::DEFAULT_MS_PER_SLOT;
use solana_sdk::native_token::lamports_to_sol;
use thiserror::Error;

/// Assumed wall-clock duration of one slot, used for the TPS estimate.
pub const SLOT_TIME_SECS: f64 = DEFAULT_MS_PER_SLOT as f64 / 1000.0;

#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("failed to read chain head slot: {0:#}")]
    ChainHead(anyhow::Error),
    #[error("price lookup failed for window {window}: {source:#}")]
    Price {
        window: BatchWindow,
        source: anyhow::Error,
    },
}

/// Outcome of a completed run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub windows_scanned: u64,
    pub windows_emitted: u64,
    pub windows_skipped: u64,
    pub sink_failures: u64,
}

/// Series accumulated over one window.
#[derive(Debug, Default)]
struct WindowSample {
    fees: Vec<f64>,
    compute_units: Vec<u64>,
    economic_transactions: u64,
}

impl WindowSample {
    fn record(&mut self, transaction: &SampledTransaction) {
        if is_voting_transaction(transaction) {
            return;
        }
        let Some(fees) = transaction.fees else {
            return;
        };
        if let Some(fee) = fees.fee {
            if fee > 0 {
                self.fees.push(lamports_to_sol(fee));
            }
            self.economic_transactions += 1;
        }
        if let Some(compute_units) = fees.compute_units_consumed {
            self.compute_units.push(compute_units);
        }
    }

    /// `None` when no fee was observed in the window.
    fn summarize(
        mut self,
        window: BatchWindow,
        batch_size: u64,
        fiat_price: f64,
    ) -> Option<BatchSummary> {
        sort_ascending(&mut self.fees);
        self.compute_units.sort_unstable();
        let fee_stats = FeeStats::from_sorted(&self.fees)?;
        let cu_stats = ComputeUnitStats::from_sorted(&self.compute_units);

        Some(BatchSummary {
            start_slot: window.start,
            end_slot: window.end,
            total_transactions: self.economic_transactions,
            average_tps: self.economic_transactions as f64 / (batch_size as f64 * SLOT_TIME_SECS),
            max_fee_native: fee_stats.max,
            average_fee_native: fee_stats.mean,
            median_fee_native: fee_stats.median,
            percentile95_fee_native: fee_stats.p95,
            max_compute_units: cu_stats.max,
            average_compute_units: cu_stats.mean,
            median_compute_units: cu_stats.median,
            fiat_price,
        })
    }
}

pub struct FeeSampler<B, P> {
    blocks: B,
    prices: P,
    sink: Box<dyn SummarySink>,
    config: SamplerConfig,
}

impl<B: BlockSource, P: PriceOracle> FeeSampler<B, P> {
    pub fn new(blocks: B, prices: P, sink: Box<dyn SummarySink>, config: SamplerConfig) -> Self {
        FeeSampler {
            blocks,
            prices,
            sink,
            config,
        }
    }

    pub async fn run(&mut self) -> Result<RunReport, SamplerError> {
        let head = self
            .blocks
            .chain_head_slot()
            .await
            .map_err(SamplerError::ChainHead)?;
        info!(
            "Sampling {} batches of {} slots from slot {} ({} storage)",
            self.config.num_batches,
            self.config.batch_size,
            head,
            self.sink.backend_type()
        );

        let mut report = RunReport::default();
        let planner = BatchPlanner::new(head, self.config.batch_size, self.config.num_batches);
        for window in planner {
            report.windows_scanned += 1;

            let fiat_price = match self
                .prices
                .native_token_price()
                .await
                .and_then(validate_price)
            {
                Ok(price) => price,
                Err(source) => {
                    error!("Price lookup failed for window {}: {:#}", window, source);
                    return Err(SamplerError::Price { window, source });
                }
            };

            let sample = self.sample_window(window).await;
            let Some(summary) = sample.summarize(window, self.config.batch_size, fiat_price)
            else {
                warn!("No fees observed in window {}; skipping", window);
                report.windows_skipped += 1;
                continue;
            };

            report::log_summary(&summary);
            report.windows_emitted += 1;
            if let Err(e) = self.sink.append(&summary).await {
                error!(
                    "Failed to write summary for window {} to {}: {}",
                    window,
                    self.sink.backend_type(),
                    e
                );
                report.sink_failures += 1;
            }
        }

        info!(
            "Done: {} of {} windows emitted ({} skipped, {} sink failures)",
            report.windows_emitted,
            self.config.num_batches,
            report.windows_skipped,
            report.sink_failures
        );
        Ok(report)
    }

    async fn sample_window(&self, window: BatchWindow) -> WindowSample {
        let mut sample = WindowSample::default();
        for slot in window.slots() {
            match self.blocks.get_block(slot).await {
                Ok(Some(block)) => {
                    for transaction in &block.transactions {
                        sample.record(transaction);
                    }
                }
                Ok(None) => warn!("No block at slot {}", slot),
                Err(e) => warn!("Failed to fetch block at slot {}: {:#}", slot, e),
            }
            tokio::time::sleep(self.config.fetch_delay).await;
        }
        sample
    }
}
