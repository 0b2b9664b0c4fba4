use thiserror::Error;

use super::TransactionError;

#[derive(Error, Debug, PartialEq)]
pub enum SignerError {
    #[error("Failed to load key material: {0}")]
    SecretUnavailable(String),

    #[error("Invalid key: {0}")]
    KeyError(String),

    #[error("Failed to sign transaction: {0}")]
    SigningError(String),

    #[error("Invalid signer configuration: {0}")]
    Configuration(String),
}

impl From<SignerError> for TransactionError {
    fn from(error: SignerError) -> Self {
        TransactionError::SigningFailure(error.to_string())
    }
}
