//! Base64 boundary for transactions handed to browser wallets.

use serde::{Deserialize, Serialize};
use solana_sdk::{
    packet::PACKET_DATA_SIZE,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, VersionedTransaction},
};
use utoipa::ToSchema;

use crate::{
    models::TransactionError,
    utils::{base64_decode, base64_encode},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct EncodedSerializedTransaction(String);

impl EncodedSerializedTransaction {
    pub fn new(encoded: String) -> Self {
        Self(encoded)
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Serializes `transaction` to wire bytes and base64-encodes them.
    ///
    /// With `require_all_signatures` set, a transaction that still lacks a
    /// required signature is rejected with the missing signers listed.
    pub fn encode(
        transaction: &Transaction,
        require_all_signatures: bool,
    ) -> Result<Self, TransactionError> {
        if require_all_signatures {
            let missing = missing_signers(transaction);
            if !missing.is_empty() {
                let missing: Vec<String> = missing.iter().map(|key| key.to_string()).collect();
                return Err(TransactionError::SigningFailure(format!(
                    "missing signatures for: {}",
                    missing.join(", ")
                )));
            }
        }

        let bytes = bincode::serialize(transaction)
            .map_err(|e| TransactionError::Serialization(e.to_string()))?;
        Ok(Self(base64_encode(&bytes)))
    }

    fn decode_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        base64_decode(&self.0).map_err(|e| TransactionError::Serialization(e.to_string()))
    }

    /// Decodes the payload the way a wallet adapter would.
    pub fn to_versioned(&self) -> Result<VersionedTransaction, TransactionError> {
        let bytes = self.decode_bytes()?;
        bincode::deserialize(&bytes).map_err(|e| TransactionError::Serialization(e.to_string()))
    }
}

impl TryFrom<&Transaction> for EncodedSerializedTransaction {
    type Error = TransactionError;

    fn try_from(transaction: &Transaction) -> Result<Self, Self::Error> {
        Self::encode(transaction, false)
    }
}

impl TryFrom<&EncodedSerializedTransaction> for Transaction {
    type Error = TransactionError;

    fn try_from(encoded: &EncodedSerializedTransaction) -> Result<Self, Self::Error> {
        let bytes = encoded.decode_bytes()?;
        bincode::deserialize(&bytes).map_err(|e| TransactionError::Serialization(e.to_string()))
    }
}

/// Rejects a transaction whose wire form, signature slots included, does
/// not fit in a single packet.
pub fn ensure_wire_size(transaction: &Transaction) -> Result<(), TransactionError> {
    let size = bincode::serialized_size(transaction)
        .map_err(|e| TransactionError::Serialization(e.to_string()))?;
    if size > PACKET_DATA_SIZE as u64 {
        return Err(TransactionError::InvalidParameters(format!(
            "transaction is {size} bytes, limit is {PACKET_DATA_SIZE}; reduce the number of config lines"
        )));
    }
    Ok(())
}

/// Required signers whose signature slot is still empty.
pub fn missing_signers(transaction: &Transaction) -> Vec<Pubkey> {
    let required = transaction.message.header.num_required_signatures as usize;
    transaction
        .message
        .account_keys
        .iter()
        .take(required)
        .enumerate()
        .filter(|(index, _)| {
            transaction
                .signatures
                .get(*index)
                .is_none_or(|sig| *sig == Signature::default())
        })
        .map(|(_, key)| *key)
        .collect()
}
