mod transaction;
pub use transaction::*;

use serde::Serialize;
pub use solana_sdk::slot_history::Slot;

/// Column order shared by every summary sink.
pub const SUMMARY_COLUMNS: [&str; 12] = [
    "start_slot",
    "end_slot",
    "total_transactions",
    "average_tps",
    "max_fee_native",
    "average_fee_native",
    "median_fee_native",
    "percentile95_fee_native",
    "max_compute_units",
    "average_compute_units",
    "median_compute_units",
    "fiat_price",
];

/// A closed range of slots, walked from `start` down to `end` (both inclusive).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BatchWindow {
    pub start: Slot,
    pub end: Slot,
}

impl BatchWindow {
    pub fn width(&self) -> u64 {
        self.start - self.end + 1
    }

    /// Slots of this window, newest first.
    pub fn slots(&self) -> impl Iterator<Item = Slot> {
        (self.end..=self.start).rev()
    }
}

impl std::fmt::Display for BatchWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SampledBlock {
    pub slot: Slot,
    pub transactions: Vec<SampledTransaction>,
}

/// Per-window output record. Field names double as the persisted column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub start_slot: Slot,
    pub end_slot: Slot,
    pub total_transactions: u64,
    pub average_tps: f64,
    pub max_fee_native: f64,
    pub average_fee_native: f64,
    pub median_fee_native: f64,
    pub percentile95_fee_native: f64,
    pub max_compute_units: u64,
    pub average_compute_units: f64,
    pub median_compute_units: f64,
    pub fiat_price: f64,
}
