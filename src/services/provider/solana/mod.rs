//! Solana Provider Module
//!
//! Wraps the non-blocking `RpcClient` behind [`SolanaProviderTrait`]: blockhash
//! and rent queries, account lookups, submission and signature status.
//! Read calls are retried on transient failures; `send_transaction` is not,
//! since a resend must first check whether the network already has the
//! signature.
use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
};
use solana_sdk::{
    account::Account, commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};
use thiserror::Error;

use super::{retry_with_backoff, RetryConfig};
use crate::models::{SolanaTransactionStatus, TransactionError};

/// Normalizes both strings (no spaces, lowercase) before matching, so
/// "invalid instruction data" also matches "InvalidInstructionData".
fn matches_error_pattern(error_msg: &str, pattern: &str) -> bool {
    let normalized_msg = error_msg.to_lowercase().replace(' ', "");
    let normalized_pattern = pattern.to_lowercase().replace(' ', "");
    normalized_msg.contains(&normalized_pattern)
}

/// Errors that can occur when interacting with the Solana provider.
///
/// Use `is_transient()` to determine if an error should be retried.
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum SolanaProviderError {
    /// Network/IO error (transient)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// RPC protocol error (transient: node lag, sync pending)
    #[error("RPC error: {0}")]
    RpcError(String),

    /// HTTP error; retriable depending on status code
    #[error("Request error (HTTP {status_code}): {error}")]
    RequestError { error: String, status_code: u16 },

    /// Missing data or unsupported operation (permanent)
    #[error("Network configuration error: {0}")]
    NetworkConfiguration(String),

    #[error("Insufficient funds for transaction: {0}")]
    InsufficientFunds(String),

    /// Blockhash not found or expired (transient)
    #[error("Blockhash not found or expired: {0}")]
    BlockhashNotFound(String),

    /// Invalid transaction structure or execution (permanent)
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Duplicate transaction (permanent)
    #[error("Transaction already processed: {0}")]
    AlreadyProcessed(String),
}

impl SolanaProviderError {
    /// Determines if this error is transient (can retry) or permanent.
    ///
    /// **Transient:** `NetworkError`, `RpcError`, `BlockhashNotFound`, and
    /// `RequestError` with 5xx (except 501/505), 408, 425 or 429.
    ///
    /// **Permanent:** everything else.
    pub fn is_transient(&self) -> bool {
        match self {
            SolanaProviderError::NetworkError(_) => true,
            SolanaProviderError::RpcError(_) => true,
            SolanaProviderError::BlockhashNotFound(_) => true,

            SolanaProviderError::RequestError { status_code, .. } => match *status_code {
                501 | 505 => false,
                500 | 502..=504 | 506..=599 => true,
                408 | 425 | 429 => true,
                _ => false,
            },

            SolanaProviderError::InsufficientFunds(_) => false,
            SolanaProviderError::InvalidTransaction(_) => false,
            SolanaProviderError::AlreadyProcessed(_) => false,
            SolanaProviderError::NetworkConfiguration(_) => false,
        }
    }

    /// Whether the network refused the transaction itself, as opposed to
    /// the request failing on the way.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            SolanaProviderError::InsufficientFunds(_)
                | SolanaProviderError::InvalidTransaction(_)
                | SolanaProviderError::AlreadyProcessed(_)
        )
    }

    /// Classifies a Solana RPC client error into the appropriate variant.
    pub fn from_rpc_error(error: ClientError) -> Self {
        match error.kind() {
            ClientErrorKind::Io(_) => SolanaProviderError::NetworkError(error.to_string()),

            ClientErrorKind::Reqwest(reqwest_err) => {
                if let Some(status) = reqwest_err.status() {
                    SolanaProviderError::RequestError {
                        error: error.to_string(),
                        status_code: status.as_u16(),
                    }
                } else {
                    // connection refused, timeout
                    SolanaProviderError::NetworkError(error.to_string())
                }
            }

            ClientErrorKind::RpcError(rpc_err) => {
                let rpc_err_str = format!("{rpc_err}");
                Self::from_rpc_response_error(&rpc_err_str, &error)
            }

            ClientErrorKind::TransactionError(tx_error) => {
                Self::from_transaction_error(tx_error, &error)
            }

            ClientErrorKind::Custom(msg) => Self::from_rpc_response_error(msg, &error),

            _ => SolanaProviderError::RpcError(error.to_string()),
        }
    }

    /// Classifies JSON-RPC error responses by code, then by message.
    ///
    /// Transient: -32004, -32005, -32008, -32014, -32016.
    /// Permanent: -32002 (unless the simulation failed on a stale blockhash),
    /// -32003, -32007, -32009, -32010, -32013, -32015, -32602.
    fn from_rpc_response_error(error_str: &str, full_error: &ClientError) -> Self {
        let message = full_error.to_string();

        if error_str.contains("-32002") {
            if matches_error_pattern(error_str, "blockhash not found") {
                SolanaProviderError::BlockhashNotFound(message)
            } else if matches_error_pattern(error_str, "insufficient funds") {
                SolanaProviderError::InsufficientFunds(message)
            } else {
                SolanaProviderError::InvalidTransaction(message)
            }
        } else if error_str.contains("-32003")
            || error_str.contains("-32013")
            || error_str.contains("-32015")
            || error_str.contains("-32602")
        {
            SolanaProviderError::InvalidTransaction(message)
        } else if error_str.contains("-32004")
            || error_str.contains("-32005")
            || error_str.contains("-32014")
            || error_str.contains("-32016")
        {
            SolanaProviderError::RpcError(message)
        } else if error_str.contains("-32007") || error_str.contains("-32010") {
            SolanaProviderError::NetworkConfiguration(message)
        } else if error_str.contains("-32008") {
            SolanaProviderError::BlockhashNotFound(message)
        } else if error_str.contains("-32009") {
            SolanaProviderError::AlreadyProcessed(message)
        } else if matches_error_pattern(error_str, "insufficient funds") {
            SolanaProviderError::InsufficientFunds(message)
        } else if matches_error_pattern(error_str, "blockhash not found") {
            SolanaProviderError::BlockhashNotFound(message)
        } else if matches_error_pattern(error_str, "already processed") {
            SolanaProviderError::AlreadyProcessed(message)
        } else {
            SolanaProviderError::RpcError(message)
        }
    }

    fn from_transaction_error(
        tx_error: &solana_sdk::transaction::TransactionError,
        full_error: &ClientError,
    ) -> Self {
        use solana_sdk::transaction::TransactionError as TxErr;

        match tx_error {
            TxErr::InsufficientFundsForFee | TxErr::InsufficientFundsForRent { .. } => {
                SolanaProviderError::InsufficientFunds(full_error.to_string())
            }

            TxErr::BlockhashNotFound => {
                SolanaProviderError::BlockhashNotFound(full_error.to_string())
            }

            TxErr::AlreadyProcessed => {
                SolanaProviderError::AlreadyProcessed(full_error.to_string())
            }

            TxErr::SignatureFailure
            | TxErr::MissingSignatureForFee
            | TxErr::InvalidAccountForFee
            | TxErr::AccountNotFound
            | TxErr::InvalidAccountIndex
            | TxErr::ProgramAccountNotFound
            | TxErr::InstructionError(_, _)
            | TxErr::InvalidWritableAccount => {
                SolanaProviderError::InvalidTransaction(full_error.to_string())
            }

            TxErr::AccountInUse | TxErr::AccountLoadedTwice | TxErr::ClusterMaintenance => {
                SolanaProviderError::RpcError(full_error.to_string())
            }

            _ => SolanaProviderError::RpcError(full_error.to_string()),
        }
    }
}

impl From<SolanaProviderError> for TransactionError {
    fn from(error: SolanaProviderError) -> Self {
        TransactionError::NetworkUnavailable(error.to_string())
    }
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait SolanaProviderTrait: Send + Sync {
    /// Latest blockhash at `commitment` and the last block height at which
    /// a transaction using it is still accepted.
    async fn get_latest_blockhash_with_commitment(
        &self,
        commitment: CommitmentConfig,
    ) -> Result<(Hash, u64), SolanaProviderError>;

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_size: usize,
    ) -> Result<u64, SolanaProviderError>;

    /// `None` when the account does not exist.
    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, SolanaProviderError>;

    /// Sends once, with preflight. Not retried.
    async fn send_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, SolanaProviderError>;

    /// `None` when the network has not seen the signature.
    async fn get_transaction_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<SolanaTransactionStatus>, SolanaProviderError>;
}

pub struct SolanaProvider {
    client: Arc<RpcClient>,
    commitment: CommitmentConfig,
    retry_config: RetryConfig,
}

impl std::fmt::Debug for SolanaProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolanaProvider")
            .field("url", &self.client.url())
            .field("commitment", &self.commitment)
            .field("retry_config", &self.retry_config)
            .finish()
    }
}

impl SolanaProvider {
    pub fn new(
        url: &str,
        timeout_seconds: u64,
        commitment: CommitmentConfig,
        retry_config: RetryConfig,
    ) -> Result<Self, SolanaProviderError> {
        if url.is_empty() {
            return Err(SolanaProviderError::NetworkConfiguration(
                "RPC URL must not be empty".to_string(),
            ));
        }

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SolanaProviderError::NetworkConfiguration(format!(
                "RPC URL must be http(s): {url}"
            )));
        }

        let client = RpcClient::new_with_timeout_and_commitment(
            url.to_string(),
            Duration::from_secs(timeout_seconds),
            commitment,
        );

        Ok(Self {
            client: Arc::new(client),
            commitment,
            retry_config,
        })
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.commitment
    }

    async fn retry_rpc_call<T, F, Fut>(
        &self,
        operation_name: &str,
        operation: F,
    ) -> Result<T, SolanaProviderError>
    where
        F: Fn(Arc<RpcClient>) -> Fut,
        Fut: std::future::Future<Output = Result<T, SolanaProviderError>>,
    {
        retry_with_backoff(
            operation_name,
            &self.retry_config,
            SolanaProviderError::is_transient,
            || operation(Arc::clone(&self.client)),
        )
        .await
    }
}

#[async_trait]
impl SolanaProviderTrait for SolanaProvider {
    async fn get_latest_blockhash_with_commitment(
        &self,
        commitment: CommitmentConfig,
    ) -> Result<(Hash, u64), SolanaProviderError> {
        self.retry_rpc_call("get_latest_blockhash_with_commitment", |client| async move {
            client
                .get_latest_blockhash_with_commitment(commitment)
                .await
                .map_err(SolanaProviderError::from_rpc_error)
        })
        .await
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_size: usize,
    ) -> Result<u64, SolanaProviderError> {
        self.retry_rpc_call("get_minimum_balance_for_rent_exemption", |client| async move {
            client
                .get_minimum_balance_for_rent_exemption(data_size)
                .await
                .map_err(SolanaProviderError::from_rpc_error)
        })
        .await
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, SolanaProviderError> {
        let pubkey = *pubkey;
        let commitment = self.commitment;
        self.retry_rpc_call("get_account", |client| async move {
            client
                .get_account_with_commitment(&pubkey, commitment)
                .await
                .map(|response| response.value)
                .map_err(SolanaProviderError::from_rpc_error)
        })
        .await
    }

    async fn send_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, SolanaProviderError> {
        self.client
            .send_transaction(transaction)
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn get_transaction_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<SolanaTransactionStatus>, SolanaProviderError> {
        let signature = *signature;
        let response = self
            .retry_rpc_call("get_transaction_status", |client| async move {
                client
                    .get_signature_statuses_with_history(&[signature])
                    .await
                    .map_err(SolanaProviderError::from_rpc_error)
            })
            .await?;

        let status = match response.value.into_iter().next().flatten() {
            Some(status) => status,
            None => return Ok(None),
        };

        let status = if let Some(err) = status.err.as_ref() {
            SolanaTransactionStatus::Failed(err.to_string())
        } else if status.satisfies_commitment(CommitmentConfig::finalized()) {
            SolanaTransactionStatus::Finalized
        } else if status.satisfies_commitment(CommitmentConfig::confirmed()) {
            SolanaTransactionStatus::Confirmed
        } else {
            SolanaTransactionStatus::Processed
        };

        Ok(Some(status))
    }
}
