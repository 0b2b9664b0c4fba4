//! Co-signing.
//!
//! Signatures are applied only to the final message, after the fee payer has
//! been rebound. The wallet's signature is the one slot left empty.

use log::{debug, info};
use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::Transaction};

use crate::{
    models::{missing_signers, TransactionError},
    services::{sign_sdk_transaction, SolanaSignTrait},
};

/// Applies the signature of every signer to `transaction` in turn.
pub async fn cosign_transaction(
    mut transaction: Transaction,
    signers: &[&dyn SolanaSignTrait],
) -> Result<Transaction, TransactionError> {
    for signer in signers {
        let (signed, signature) = sign_sdk_transaction(*signer, transaction).await?;
        debug!("Applied signature {signature}");
        transaction = signed;
    }
    Ok(transaction)
}

/// Checks every present signature against the current message.
///
/// A signature applied before the message changed (for example before a
/// fee-payer rebind) fails here.
pub fn validate_partial_signatures(transaction: &Transaction) -> Result<(), TransactionError> {
    let message_data = transaction.message_data();
    let invalid: Vec<String> = transaction
        .signatures
        .iter()
        .zip(transaction.message.account_keys.iter())
        .filter(|(signature, _)| **signature != Signature::default())
        .filter(|(signature, key)| !signature.verify(key.as_ref(), &message_data))
        .map(|(_, key)| key.to_string())
        .collect();

    if !invalid.is_empty() {
        return Err(TransactionError::SigningFailure(format!(
            "signature does not match the transaction message for: {}",
            invalid.join(", ")
        )));
    }

    Ok(())
}

/// Fails unless all present signatures verify and `expected_missing` is the
/// only required signer without one.
pub fn ensure_only_missing(
    transaction: &Transaction,
    expected_missing: &Pubkey,
) -> Result<(), TransactionError> {
    validate_partial_signatures(transaction)?;

    let missing = missing_signers(transaction);
    let unexpected: Vec<String> = missing
        .iter()
        .filter(|key| *key != expected_missing)
        .map(|key| key.to_string())
        .collect();

    if !unexpected.is_empty() {
        return Err(TransactionError::SigningFailure(format!(
            "missing signatures for: {}",
            unexpected.join(", ")
        )));
    }

    if !missing.contains(expected_missing) {
        return Err(TransactionError::SigningFailure(format!(
            "{expected_missing} is not a required signer of the transaction"
        )));
    }

    info!(
        "Transaction co-signed; awaiting signature from {}",
        expected_missing
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::rebind_fee_payer, models::AccountIdentity, services::EphemeralSigner};
    use solana_sdk::{
        hash::Hash,
        instruction::{AccountMeta, Instruction},
        message::Message,
    };

    fn transaction(payer: &Pubkey, authorities: &[Pubkey]) -> Transaction {
        let ix = Instruction::new_with_bytes(
            Pubkey::new_unique(),
            &[1],
            authorities
                .iter()
                .map(|key| AccountMeta::new(*key, true))
                .collect(),
        );
        Transaction::new_unsigned(Message::new_with_blockhash(
            &[ix],
            Some(payer),
            &Hash::new_unique(),
        ))
    }

    #[tokio::test]
    async fn test_cosign_leaves_only_wallet_missing() {
        let server = EphemeralSigner::new();
        let machine = EphemeralSigner::new();
        let wallet = Pubkey::new_unique();
        let tx = transaction(&wallet, &[server.address(), machine.address()]);

        let signed = cosign_transaction(tx, &[&server, &machine]).await.unwrap();

        assert_eq!(missing_signers(&signed), vec![wallet]);
        ensure_only_missing(&signed, &wallet).unwrap();
    }

    #[tokio::test]
    async fn test_missing_server_signature_detected() {
        let server = EphemeralSigner::new();
        let machine = EphemeralSigner::new();
        let wallet = Pubkey::new_unique();
        let tx = transaction(&wallet, &[server.address(), machine.address()]);

        let signed = cosign_transaction(tx, &[&machine]).await.unwrap();

        let err = ensure_only_missing(&signed, &wallet).unwrap_err();
        assert!(err.details().contains(&server.address().to_string()));
    }

    #[tokio::test]
    async fn test_signing_before_rebind_is_detected() {
        let server = EphemeralSigner::new();
        let wallet = Pubkey::new_unique();
        let tx = transaction(&server.address(), &[server.address()]);

        let signed = cosign_transaction(tx, &[&server]).await.unwrap();
        validate_partial_signatures(&signed).unwrap();

        // carry the stale signature over to the rebound message
        let mut rebound = rebind_fee_payer(&signed, &AccountIdentity::from(wallet)).unwrap();
        let server_index = rebound
            .message
            .account_keys
            .iter()
            .position(|key| *key == server.address())
            .unwrap();
        rebound.signatures[server_index] = signed.signatures[0];

        let err = validate_partial_signatures(&rebound).unwrap_err();
        assert_eq!(err.kind(), crate::models::ErrorKind::SigningFailure);
        assert!(err.details().contains(&server.address().to_string()));

        // re-signing after the rebind fixes it
        let resigned = cosign_transaction(rebound, &[&server]).await.unwrap();
        ensure_only_missing(&resigned, &wallet).unwrap();
    }

    #[tokio::test]
    async fn test_wallet_not_required_is_rejected() {
        let server = EphemeralSigner::new();
        let tx = transaction(&server.address(), &[]);
        let signed = cosign_transaction(tx, &[&server]).await.unwrap();

        assert!(ensure_only_missing(&signed, &Pubkey::new_unique()).is_err());
    }
}
