//! Separates economic transactions from consensus traffic.
//!
//! A transaction is treated as voting/staking when any of its account keys equals the vote or
//! stake program id. Anything we cannot read is treated as economic.

use crate::types::SampledTransaction;
use std::sync::OnceLock;

use log::debug;
use solana_sdk::{stake, vote};

fn excluded_program_ids() -> &'static [String; 2] {
    static IDS: OnceLock<[String; 2]> = OnceLock::new();
    IDS.get_or_init(|| [vote::program::id().to_string(), stake::program::id().to_string()])
}

/// Returns true if `account_keys` references the vote or stake program.
pub fn references_consensus_program<S: AsRef<str>>(account_keys: Option<&[S]>) -> bool {
    let Some(keys) = account_keys else {
        return false;
    };
    let ids = excluded_program_ids();
    keys.iter()
        .any(|key| ids.iter().any(|id| id.as_str() == key.as_ref()))
}

pub fn is_voting_transaction(transaction: &SampledTransaction) -> bool {
    match transaction.account_keys.as_deref() {
        Some(keys) => references_consensus_program(Some(keys)),
        None => {
            debug!(
                "No readable account keys for tx {}; treating it as economic",
                transaction.signature.as_deref().unwrap_or("<unknown>")
            );
            false
        }
    }
}
