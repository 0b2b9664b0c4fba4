use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};

use super::SolanaSignTrait;
use crate::models::SignerError;

/// Per-request keypair for an account the transaction creates (candy
/// machine, collection, minted asset). Never persisted.
#[derive(Debug)]
pub struct EphemeralSigner {
    keypair: Keypair,
}

impl EphemeralSigner {
    pub fn new() -> Self {
        Self {
            keypair: Keypair::new(),
        }
    }

    pub fn address(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

impl Default for EphemeralSigner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SolanaSignTrait for EphemeralSigner {
    async fn pubkey(&self) -> Result<Pubkey, SignerError> {
        Ok(self.keypair.pubkey())
    }

    async fn sign(&self, message: &[u8]) -> Result<Signature, SignerError> {
        Ok(self.keypair.sign_message(message))
    }
}
