use crate::types::BatchSummary;

use log::info;

/// One-line human readable rendering of a summary.
pub fn format_summary(summary: &BatchSummary) -> String {
    format!(
        "slots {}..{} | txs {} | tps {:.2} | fee SOL max {:.9} avg {:.9} median {:.9} p95 {:.9} \
         | CU max {} avg {:.1} median {:.1} | price {:.2}",
        summary.start_slot,
        summary.end_slot,
        summary.total_transactions,
        summary.average_tps,
        summary.max_fee_native,
        summary.average_fee_native,
        summary.median_fee_native,
        summary.percentile95_fee_native,
        summary.max_compute_units,
        summary.average_compute_units,
        summary.median_compute_units,
        summary.fiat_price,
    )
}

pub fn log_summary(summary: &BatchSummary) {
    info!("{}", format_summary(summary));
}
