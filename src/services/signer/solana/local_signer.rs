//! Server key custody.
//!
//! The public key is derived once at construction. The secret is pulled from
//! the [`SecretProvider`] for every signature and dropped (and zeroed) as
//! soon as the signature is produced.
use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    signer::keypair::keypair_from_seed,
};

use super::SolanaSignTrait;
use crate::{
    models::SignerError,
    services::signer::{SecretProvider, KEYPAIR_BYTES},
};

pub struct LocalSigner<P: SecretProvider> {
    provider: P,
    pubkey: Pubkey,
}

impl<P: SecretProvider> LocalSigner<P> {
    /// Loads the key once to validate it and learn its public key.
    pub fn new(provider: P) -> Result<Self, SignerError> {
        let secret = provider.load_secret()?;
        let pubkey = keypair_from_secret(&secret)?.pubkey();
        Ok(Self { provider, pubkey })
    }

    pub fn address(&self) -> Pubkey {
        self.pubkey
    }
}

impl<P: SecretProvider> std::fmt::Debug for LocalSigner<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner")
            .field("pubkey", &self.pubkey)
            .finish_non_exhaustive()
    }
}

/// Rebuilds a keypair from its 64-byte encoding, checking that the stored
/// public half belongs to the secret half.
fn keypair_from_secret(secret: &[u8]) -> Result<Keypair, SignerError> {
    if secret.len() != KEYPAIR_BYTES {
        return Err(SignerError::KeyError(format!(
            "expected {KEYPAIR_BYTES} key bytes, got {}",
            secret.len()
        )));
    }

    let keypair =
        keypair_from_seed(&secret[..32]).map_err(|e| SignerError::KeyError(e.to_string()))?;

    if keypair.pubkey().as_ref() != &secret[32..] {
        return Err(SignerError::KeyError(
            "public key does not match secret key".to_string(),
        ));
    }

    Ok(keypair)
}

#[async_trait]
impl<P: SecretProvider> SolanaSignTrait for LocalSigner<P> {
    async fn pubkey(&self) -> Result<Pubkey, SignerError> {
        Ok(self.pubkey)
    }

    async fn sign(&self, message: &[u8]) -> Result<Signature, SignerError> {
        let secret = self.provider.load_secret()?;
        let keypair = keypair_from_secret(&secret)?;

        if keypair.pubkey() != self.pubkey {
            return Err(SignerError::Configuration(format!(
                "key material changed: expected {}, found {}",
                self.pubkey,
                keypair.pubkey()
            )));
        }

        Ok(keypair.sign_message(message))
    }
}
