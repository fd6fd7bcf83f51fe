use super::{SampledBlock, Slot};

use solana_transaction_status::{
    EncodedTransaction, EncodedTransactionWithStatusMeta, UiConfirmedBlock, UiMessage,
    UiTransactionStatusMeta,
};

/// Fee data carried in a transaction's status meta.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFees {
    /// Fee paid, in lamports
    pub fee: Option<u64>,

    /// Compute units consumed by this transaction
    pub compute_units_consumed: Option<u64>,
}

/// The slice of a block transaction needed for fee sampling.
#[derive(Debug, Clone, Default)]
pub struct SampledTransaction {
    /// First signature, if the encoding exposes one
    pub signature: Option<String>,

    /// Account keys referenced by the message. `None` when the payload could not be read.
    pub account_keys: Option<Vec<String>>,

    /// `None` when the transaction came without status meta
    pub fees: Option<TransactionFees>,
}

impl SampledTransaction {
    pub fn new(account_keys: Vec<String>, fee: u64, compute_units_consumed: Option<u64>) -> Self {
        SampledTransaction {
            signature: None,
            account_keys: Some(account_keys),
            fees: Some(TransactionFees {
                fee: Some(fee),
                compute_units_consumed,
            }),
        }
    }
}

impl From<EncodedTransactionWithStatusMeta> for SampledTransaction {
    fn from(encoded: EncodedTransactionWithStatusMeta) -> Self {
        let fees = encoded.meta.as_ref().map(fees_from_meta);
        SampledTransaction {
            signature: first_signature(&encoded.transaction),
            account_keys: extract_account_keys(&encoded.transaction),
            fees,
        }
    }
}

impl SampledBlock {
    pub fn from_ui_block(slot: Slot, block: UiConfirmedBlock) -> Self {
        let transactions = block
            .transactions
            .unwrap_or_default()
            .into_iter()
            .map(SampledTransaction::from)
            .collect();
        SampledBlock { slot, transactions }
    }
}

fn fees_from_meta(meta: &UiTransactionStatusMeta) -> TransactionFees {
    TransactionFees {
        fee: Some(meta.fee),
        compute_units_consumed: meta.compute_units_consumed.clone().into(),
    }
}

fn first_signature(transaction: &EncodedTransaction) -> Option<String> {
    match transaction {
        EncodedTransaction::Json(tx) => tx.signatures.first().cloned(),
        EncodedTransaction::Accounts(list) => list.signatures.first().cloned(),
        EncodedTransaction::LegacyBinary(_) | EncodedTransaction::Binary(..) => transaction
            .decode()
            .and_then(|tx| tx.signatures.first().map(|s| s.to_string())),
    }
}

fn extract_account_keys(transaction: &EncodedTransaction) -> Option<Vec<String>> {
    match transaction {
        EncodedTransaction::Json(tx) => match &tx.message {
            UiMessage::Raw(message) => Some(message.account_keys.clone()),
            UiMessage::Parsed(message) => Some(
                message
                    .account_keys
                    .iter()
                    .map(|account| account.pubkey.clone())
                    .collect(),
            ),
        },
        EncodedTransaction::Accounts(list) => Some(
            list.account_keys
                .iter()
                .map(|account| account.pubkey.clone())
                .collect(),
        ),
        EncodedTransaction::LegacyBinary(_) | EncodedTransaction::Binary(..) => {
            transaction.decode().map(|tx| {
                tx.message
                    .static_account_keys()
                    .iter()
                    .map(|key| key.to_string())
                    .collect()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_transaction_status::{TransactionBinaryEncoding, UiRawMessage, UiTransaction};

    fn raw_json_transaction(keys: &[&str]) -> EncodedTransaction {
        EncodedTransaction::Json(UiTransaction {
            signatures: vec!["sig1".to_string()],
            message: UiMessage::Raw(UiRawMessage {
                header: Default::default(),
                account_keys: keys.iter().map(|k| k.to_string()).collect(),
                recent_blockhash: String::new(),
                instructions: vec![],
                address_table_lookups: None,
            }),
        })
    }

    #[test]
    fn reads_keys_from_raw_json_message() {
        let encoded = EncodedTransactionWithStatusMeta {
            transaction: raw_json_transaction(&["a", "b"]),
            meta: None,
            version: None,
        };
        let tx = SampledTransaction::from(encoded);
        assert_eq!(tx.signature.as_deref(), Some("sig1"));
        assert_eq!(tx.account_keys, Some(vec!["a".to_string(), "b".to_string()]));
        assert!(tx.fees.is_none());
    }

    #[test]
    fn undecodable_binary_payload_has_no_keys() {
        let encoded = EncodedTransactionWithStatusMeta {
            transaction: EncodedTransaction::Binary(
                "not base64!".to_string(),
                TransactionBinaryEncoding::Base64,
            ),
            meta: None,
            version: None,
        };
        let tx = SampledTransaction::from(encoded);
        assert!(tx.account_keys.is_none());
        assert!(tx.signature.is_none());
    }
}
