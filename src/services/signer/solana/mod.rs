//! Solana signing.
//!
//! Every signer exposes its public key and signs raw message bytes.
//! [`sign_sdk_transaction`] places a signature into the slot the compiled
//! message reserves for that key.
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::Transaction};

mod ephemeral_signer;
pub use ephemeral_signer::*;

mod local_signer;
pub use local_signer::*;

use crate::models::SignerError;

#[async_trait]
#[cfg_attr(test, automock)]
pub trait SolanaSignTrait: Send + Sync {
    /// Returns the public key of the signer.
    async fn pubkey(&self) -> Result<Pubkey, SignerError>;

    /// Signs `message` with the ed25519 key.
    async fn sign(&self, message: &[u8]) -> Result<Signature, SignerError>;
}

/// Signs `transaction` with `signer` and stores the signature at the
/// signer's position in the account table.
///
/// The signer must be one of the message's required signers. Signatures
/// already present in other slots are kept untouched.
pub async fn sign_sdk_transaction<T: SolanaSignTrait + ?Sized>(
    signer: &T,
    mut transaction: Transaction,
) -> Result<(Transaction, Signature), SignerError> {
    let signer_pubkey = signer.pubkey().await?;

    let signer_index = transaction
        .message
        .account_keys
        .iter()
        .position(|key| *key == signer_pubkey)
        .ok_or_else(|| {
            SignerError::SigningError(format!(
                "Signer {signer_pubkey} not found in transaction accounts"
            ))
        })?;

    let num_required = transaction.message.header.num_required_signatures as usize;
    if signer_index >= num_required {
        return Err(SignerError::SigningError(format!(
            "Signer {signer_pubkey} is not a required signer (position {signer_index} >= {num_required})"
        )));
    }

    let signature = signer.sign(&transaction.message_data()).await?;

    transaction
        .signatures
        .resize(num_required, Signature::default());
    transaction.signatures[signer_index] = signature;

    Ok((transaction, signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{
        hash::Hash,
        instruction::{AccountMeta, Instruction},
        message::Message,
    };

    fn transaction(payer: &Pubkey, cosigner: &Pubkey, readonly: &Pubkey) -> Transaction {
        let ix = Instruction::new_with_bytes(
            Pubkey::new_unique(),
            &[1],
            vec![
                AccountMeta::new(*cosigner, true),
                AccountMeta::new_readonly(*readonly, false),
            ],
        );
        Transaction::new_unsigned(Message::new_with_blockhash(
            &[ix],
            Some(payer),
            &Hash::new_unique(),
        ))
    }

    #[tokio::test]
    async fn test_signature_lands_in_signer_slot() {
        let payer = Pubkey::new_unique();
        let cosigner = Pubkey::new_unique();
        let tx = transaction(&payer, &cosigner, &Pubkey::new_unique());
        let expected = Signature::from([9u8; 64]);

        let mut signer = MockSolanaSignTrait::new();
        signer
            .expect_pubkey()
            .returning(move || Box::pin(async move { Ok(cosigner) }));
        signer
            .expect_sign()
            .returning(move |_| Box::pin(async move { Ok(expected) }));

        let (signed, signature) = sign_sdk_transaction(&signer, tx).await.unwrap();
        assert_eq!(signature, expected);
        assert_eq!(signed.signatures.len(), 2);
        assert_eq!(signed.signatures[0], Signature::default());
        assert_eq!(signed.signatures[1], expected);
    }

    #[tokio::test]
    async fn test_unknown_signer_rejected() {
        let tx = transaction(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
        );
        let mut signer = MockSolanaSignTrait::new();
        signer
            .expect_pubkey()
            .returning(|| Box::pin(async { Ok(Pubkey::new_unique()) }));
        signer.expect_sign().never();

        let err = sign_sdk_transaction(&signer, tx).await.unwrap_err();
        assert!(matches!(err, SignerError::SigningError(ref msg) if msg.contains("not found")));
    }

    #[tokio::test]
    async fn test_non_signer_account_rejected() {
        let readonly = Pubkey::new_unique();
        let tx = transaction(&Pubkey::new_unique(), &Pubkey::new_unique(), &readonly);
        let mut signer = MockSolanaSignTrait::new();
        signer
            .expect_pubkey()
            .returning(move || Box::pin(async move { Ok(readonly) }));
        signer.expect_sign().never();

        let err = sign_sdk_transaction(&signer, tx).await.unwrap_err();
        assert!(
            matches!(err, SignerError::SigningError(ref msg) if msg.contains("not a required signer"))
        );
    }
}
