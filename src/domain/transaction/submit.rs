//! Submission with status-checked resends and bounded confirmation polling.

use std::time::Duration;

use log::{info, warn};
use solana_sdk::{signature::Signature, transaction::Transaction};

use crate::{
    constants::{
        DEFAULT_CONFIRMATION_MAX_POLLS, DEFAULT_CONFIRMATION_POLL_INTERVAL_MS,
        DEFAULT_SUBMIT_MAX_ATTEMPTS,
    },
    models::{SolanaTransactionStatus, TransactionError},
    services::{SolanaProviderError, SolanaProviderTrait},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitConfig {
    pub max_attempts: u8,
    pub max_polls: u32,
    pub poll_interval: Duration,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_SUBMIT_MAX_ATTEMPTS,
            max_polls: DEFAULT_CONFIRMATION_MAX_POLLS,
            poll_interval: Duration::from_millis(DEFAULT_CONFIRMATION_POLL_INTERVAL_MS),
        }
    }
}

/// Sends a fully signed transaction and waits until it is confirmed.
///
/// Before every resend the signature status is queried; a signature the
/// network already knows is never sent again.
pub async fn send_and_confirm<P: SolanaProviderTrait + ?Sized>(
    provider: &P,
    transaction: &Transaction,
    config: &SubmitConfig,
) -> Result<Signature, TransactionError> {
    let signature = transaction
        .signatures
        .first()
        .copied()
        .filter(|signature| *signature != Signature::default())
        .ok_or_else(|| {
            TransactionError::SigningFailure("transaction has no fee-payer signature".to_string())
        })?;

    submit(provider, transaction, &signature, config).await?;
    confirm(provider, &signature, config).await?;
    Ok(signature)
}

async fn submit<P: SolanaProviderTrait + ?Sized>(
    provider: &P,
    transaction: &Transaction,
    signature: &Signature,
    config: &SubmitConfig,
) -> Result<(), TransactionError> {
    let max_attempts = config.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        if attempt > 1 {
            match provider.get_transaction_status(signature).await {
                Ok(Some(status)) => {
                    info!("Transaction {signature} already known ({status}), not resending");
                    return Ok(());
                }
                Ok(None) => {}
                Err(e) => warn!("Status check for {signature} failed before resend: {e}"),
            }
        }

        match provider.send_transaction(transaction).await {
            Ok(_) => {
                info!("Sent transaction {signature} (attempt {attempt}/{max_attempts})");
                return Ok(());
            }
            Err(SolanaProviderError::AlreadyProcessed(_)) => {
                info!("Transaction {signature} already processed");
                return Ok(());
            }
            Err(e) if e.is_rejection() => {
                return Err(TransactionError::SubmissionRejected(e.to_string()));
            }
            Err(e) if attempt == max_attempts => {
                return Err(TransactionError::NetworkUnavailable(format!(
                    "failed to send transaction after {max_attempts} attempts: {e}"
                )));
            }
            Err(e) => {
                warn!("Sending {signature} failed (attempt {attempt}/{max_attempts}): {e}");
                tokio::time::sleep(config.poll_interval).await;
            }
        }
    }

    Err(TransactionError::NetworkUnavailable(format!(
        "failed to send transaction {signature}"
    )))
}

async fn confirm<P: SolanaProviderTrait + ?Sized>(
    provider: &P,
    signature: &Signature,
    config: &SubmitConfig,
) -> Result<(), TransactionError> {
    for _ in 0..config.max_polls {
        match provider.get_transaction_status(signature).await {
            Ok(Some(SolanaTransactionStatus::Failed(reason))) => {
                return Err(TransactionError::SubmissionRejected(format!(
                    "transaction {signature} failed: {reason}"
                )));
            }
            Ok(Some(status)) if status.is_confirmed() => {
                info!("Transaction {signature} {status}");
                return Ok(());
            }
            Ok(_) => {}
            Err(e) => warn!("Status check for {signature} failed: {e}"),
        }
        tokio::time::sleep(config.poll_interval).await;
    }

    Err(TransactionError::NetworkUnavailable(format!(
        "transaction {signature} not confirmed after {} status checks",
        config.max_polls
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::ErrorKind, services::MockSolanaProviderTrait};
    use solana_sdk::{
        hash::Hash,
        instruction::{AccountMeta, Instruction},
        message::Message,
        pubkey::Pubkey,
        signature::Keypair,
        signer::Signer,
    };
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };

    fn config() -> SubmitConfig {
        SubmitConfig {
            max_attempts: 3,
            max_polls: 3,
            poll_interval: Duration::from_millis(1),
        }
    }

    fn signed_transaction() -> Transaction {
        let payer = Keypair::new();
        let ix = Instruction::new_with_bytes(
            Pubkey::new_unique(),
            &[1],
            vec![AccountMeta::new(payer.pubkey(), true)],
        );
        let blockhash = Hash::new_unique();
        let mut tx = Transaction::new_unsigned(Message::new_with_blockhash(
            &[ix],
            Some(&payer.pubkey()),
            &blockhash,
        ));
        tx.sign(&[&payer], blockhash);
        tx
    }

    #[tokio::test]
    async fn test_confirmed_on_first_send() {
        let tx = signed_transaction();
        let expected = tx.signatures[0];
        let mut provider = MockSolanaProviderTrait::new();
        provider
            .expect_send_transaction()
            .times(1)
            .returning(move |_| Box::pin(async move { Ok(expected) }));
        provider
            .expect_get_transaction_status()
            .returning(|_| Box::pin(async { Ok(Some(SolanaTransactionStatus::Confirmed)) }));

        let signature = send_and_confirm(&provider, &tx, &config()).await.unwrap();
        assert_eq!(signature, expected);
    }

    #[tokio::test]
    async fn test_known_signature_is_not_resent() {
        let tx = signed_transaction();
        let mut provider = MockSolanaProviderTrait::new();
        provider.expect_send_transaction().times(1).returning(|_| {
            Box::pin(async { Err(SolanaProviderError::NetworkError("timeout".to_string())) })
        });
        let checks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&checks);
        provider.expect_get_transaction_status().returning(move |_| {
            // first check happens before the resend
            let status = if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                SolanaTransactionStatus::Processed
            } else {
                SolanaTransactionStatus::Finalized
            };
            Box::pin(async move { Ok(Some(status)) })
        });

        assert!(send_and_confirm(&provider, &tx, &config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_signature_is_resent() {
        let tx = signed_transaction();
        let expected = tx.signatures[0];
        let sends = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&sends);

        let mut provider = MockSolanaProviderTrait::new();
        provider.expect_send_transaction().returning(move |_| {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if attempt == 0 {
                    Err(SolanaProviderError::RpcError("node behind".to_string()))
                } else {
                    Ok(expected)
                }
            })
        });
        let checks = Arc::new(AtomicU32::new(0));
        let check_counter = Arc::clone(&checks);
        provider.expect_get_transaction_status().returning(move |_| {
            let status = if check_counter.fetch_add(1, Ordering::SeqCst) == 0 {
                None
            } else {
                Some(SolanaTransactionStatus::Confirmed)
            };
            Box::pin(async move { Ok(status) })
        });

        send_and_confirm(&provider, &tx, &config()).await.unwrap();
        assert_eq!(sends.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rejection_is_not_retried() {
        let tx = signed_transaction();
        let mut provider = MockSolanaProviderTrait::new();
        provider.expect_send_transaction().times(1).returning(|_| {
            Box::pin(async {
                Err(SolanaProviderError::InvalidTransaction(
                    "custom program error: 0x1".to_string(),
                ))
            })
        });
        provider.expect_get_transaction_status().never();

        let err = send_and_confirm(&provider, &tx, &config()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SubmissionRejected);
    }

    #[tokio::test]
    async fn test_failed_on_chain_is_rejection() {
        let tx = signed_transaction();
        let expected = tx.signatures[0];
        let mut provider = MockSolanaProviderTrait::new();
        provider
            .expect_send_transaction()
            .returning(move |_| Box::pin(async move { Ok(expected) }));
        provider.expect_get_transaction_status().returning(|_| {
            Box::pin(async {
                Ok(Some(SolanaTransactionStatus::Failed(
                    "InstructionError".to_string(),
                )))
            })
        });

        let err = send_and_confirm(&provider, &tx, &config()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SubmissionRejected);
    }

    #[tokio::test]
    async fn test_confirmation_polls_are_bounded() {
        let tx = signed_transaction();
        let expected = tx.signatures[0];
        let mut provider = MockSolanaProviderTrait::new();
        provider
            .expect_send_transaction()
            .returning(move |_| Box::pin(async move { Ok(expected) }));
        provider
            .expect_get_transaction_status()
            .times(3)
            .returning(|_| Box::pin(async { Ok(Some(SolanaTransactionStatus::Processed)) }));

        let err = send_and_confirm(&provider, &tx, &config()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NetworkUnavailable);
    }

    #[tokio::test]
    async fn test_unsigned_transaction_rejected() {
        let mut tx = signed_transaction();
        tx.signatures[0] = Signature::default();
        let mut provider = MockSolanaProviderTrait::new();
        provider.expect_send_transaction().never();

        let err = send_and_confirm(&provider, &tx, &config()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SigningFailure);
    }
}
