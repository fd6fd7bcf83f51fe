use crate::types::{SampledBlock, Slot};
use std::sync::Arc;

use async_trait::async_trait;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcBlockConfig;
use solana_rpc_client_api::custom_error::{
    JSON_RPC_SERVER_ERROR_BLOCK_NOT_AVAILABLE, JSON_RPC_SERVER_ERROR_LONG_TERM_STORAGE_SLOT_SKIPPED,
    JSON_RPC_SERVER_ERROR_SLOT_SKIPPED,
};
use solana_rpc_client_api::request::RpcError;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_transaction_status::{TransactionDetails, UiTransactionEncoding};

/// Server error codes meaning "nothing was produced at this slot".
const MISSING_BLOCK_CODES: [i64; 3] = [
    JSON_RPC_SERVER_ERROR_BLOCK_NOT_AVAILABLE,
    JSON_RPC_SERVER_ERROR_SLOT_SKIPPED,
    JSON_RPC_SERVER_ERROR_LONG_TERM_STORAGE_SLOT_SKIPPED,
];

#[async_trait]
pub trait BlockSource: Send + Sync {
    /// The most recent slot the source has seen.
    async fn chain_head_slot(&self) -> anyhow::Result<Slot>;

    /// The block at `slot`, or `None` if the slot was skipped or is unavailable.
    async fn get_block(&self, slot: Slot) -> anyhow::Result<Option<SampledBlock>>;
}

pub struct RpcBlockSource {
    client: Arc<RpcClient>,
    commitment: CommitmentConfig,
}

impl RpcBlockSource {
    pub fn new(client: Arc<RpcClient>, commitment: CommitmentConfig) -> Self {
        RpcBlockSource { client, commitment }
    }

    fn block_config(&self) -> RpcBlockConfig {
        RpcBlockConfig {
            encoding: Some(UiTransactionEncoding::Json),
            transaction_details: Some(TransactionDetails::Full),
            rewards: Some(false),
            commitment: Some(self.commitment),
            max_supported_transaction_version: Some(0),
        }
    }
}

#[async_trait]
impl BlockSource for RpcBlockSource {
    async fn chain_head_slot(&self) -> anyhow::Result<Slot> {
        Ok(self.client.get_slot_with_commitment(self.commitment).await?)
    }

    async fn get_block(&self, slot: Slot) -> anyhow::Result<Option<SampledBlock>> {
        match self
            .client
            .get_block_with_config(slot, self.block_config())
            .await
        {
            Ok(block) => Ok(Some(SampledBlock::from_ui_block(slot, block))),
            Err(e) if is_missing_block(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn is_missing_block(err: &ClientError) -> bool {
    match err.kind() {
        ClientErrorKind::RpcError(RpcError::RpcResponseError { code, .. }) => {
            MISSING_BLOCK_CODES.contains(code)
        }
        _ => false,
    }
}
