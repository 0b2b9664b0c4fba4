//! Sources of signing key material.
//!
//! A provider hands out the 64-byte keypair encoding (secret half followed by
//! public half) wrapped in [`Zeroizing`] so the buffer is wiped on drop.

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;
use zeroize::Zeroizing;

use crate::models::SignerError;

/// Length of a serialized ed25519 keypair.
pub const KEYPAIR_BYTES: usize = 64;

#[cfg_attr(test, automock)]
pub trait SecretProvider: Send + Sync {
    /// Loads the keypair bytes. Called on every signature; callers must not
    /// keep the returned buffer beyond the signing operation.
    fn load_secret(&self) -> Result<Zeroizing<Vec<u8>>, SignerError>;
}

/// Reads a keypair file in the Solana CLI format (a JSON array of 64 bytes).
#[derive(Debug, Clone)]
pub struct KeypairFileSecretProvider {
    path: PathBuf,
}

impl KeypairFileSecretProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SecretProvider for KeypairFileSecretProvider {
    fn load_secret(&self) -> Result<Zeroizing<Vec<u8>>, SignerError> {
        let contents = Zeroizing::new(std::fs::read_to_string(&self.path).map_err(|e| {
            SignerError::SecretUnavailable(format!(
                "cannot read keypair file {}: {e}",
                self.path.display()
            ))
        })?);

        let bytes: Zeroizing<Vec<u8>> =
            Zeroizing::new(serde_json::from_str(&contents).map_err(|e| {
                SignerError::KeyError(format!(
                    "keypair file {} is not a JSON byte array: {e}",
                    self.path.display()
                ))
            })?);

        if bytes.len() != KEYPAIR_BYTES {
            return Err(SignerError::KeyError(format!(
                "keypair file {} holds {} bytes, expected {KEYPAIR_BYTES}",
                self.path.display(),
                bytes.len()
            )));
        }

        Ok(bytes)
    }
}

/// Keeps key material in process memory. Used for generated server keys.
pub struct InMemorySecretProvider {
    secret: Zeroizing<Vec<u8>>,
}

impl InMemorySecretProvider {
    pub fn new(secret: Zeroizing<Vec<u8>>) -> Self {
        Self { secret }
    }
}

impl SecretProvider for InMemorySecretProvider {
    fn load_secret(&self) -> Result<Zeroizing<Vec<u8>>, SignerError> {
        Ok(self.secret.clone())
    }
}

/// Key source selected at startup.
pub enum ServerSecretProvider {
    File(KeypairFileSecretProvider),
    InMemory(InMemorySecretProvider),
}

impl SecretProvider for ServerSecretProvider {
    fn load_secret(&self) -> Result<Zeroizing<Vec<u8>>, SignerError> {
        match self {
            Self::File(provider) => provider.load_secret(),
            Self::InMemory(provider) => provider.load_secret(),
        }
    }
}
