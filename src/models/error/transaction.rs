use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Error categories reported to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, strum::Display)]
pub enum ErrorKind {
    /// Malformed request data. Rejected before any network call.
    InputValidation,
    /// The RPC endpoint could not be reached or kept failing.
    NetworkUnavailable,
    /// Key material unavailable or a signature could not be applied.
    SigningFailure,
    /// Mint requested with no prior creation, or against a machine the
    /// network does not know about.
    StateInconsistency,
    /// The network permanently rejected a submitted transaction.
    SubmissionRejected,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransactionError {
    #[error("Invalid account identity: {0}")]
    InvalidAccountIdentity(String),

    #[error("Invalid creation parameters: {0}")]
    InvalidParameters(String),

    #[error("Invalid serialized transaction: {0}")]
    Serialization(String),

    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("Signing failure: {0}")]
    SigningFailure(String),

    #[error("State inconsistency: {0}")]
    StateInconsistency(String),

    #[error("Transaction rejected: {0}")]
    SubmissionRejected(String),
}

impl TransactionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransactionError::InvalidAccountIdentity(_)
            | TransactionError::InvalidParameters(_)
            | TransactionError::Serialization(_) => ErrorKind::InputValidation,
            TransactionError::NetworkUnavailable(_) => ErrorKind::NetworkUnavailable,
            TransactionError::SigningFailure(_) => ErrorKind::SigningFailure,
            TransactionError::StateInconsistency(_) => ErrorKind::StateInconsistency,
            TransactionError::SubmissionRejected(_) => ErrorKind::SubmissionRejected,
        }
    }

    /// The message without the category prefix, as shown in `details`.
    pub fn details(&self) -> &str {
        match self {
            TransactionError::InvalidAccountIdentity(msg)
            | TransactionError::InvalidParameters(msg)
            | TransactionError::Serialization(msg)
            | TransactionError::NetworkUnavailable(msg)
            | TransactionError::SigningFailure(msg)
            | TransactionError::StateInconsistency(msg)
            | TransactionError::SubmissionRejected(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let cases = [
            (
                TransactionError::InvalidAccountIdentity("x".into()),
                ErrorKind::InputValidation,
            ),
            (
                TransactionError::InvalidParameters("x".into()),
                ErrorKind::InputValidation,
            ),
            (
                TransactionError::Serialization("x".into()),
                ErrorKind::InputValidation,
            ),
            (
                TransactionError::NetworkUnavailable("x".into()),
                ErrorKind::NetworkUnavailable,
            ),
            (
                TransactionError::SigningFailure("x".into()),
                ErrorKind::SigningFailure,
            ),
            (
                TransactionError::StateInconsistency("x".into()),
                ErrorKind::StateInconsistency,
            ),
            (
                TransactionError::SubmissionRejected("x".into()),
                ErrorKind::SubmissionRejected,
            ),
        ];
        for (error, kind) in cases {
            assert_eq!(error.kind(), kind);
        }
    }

    #[test]
    fn test_details_strips_prefix() {
        let error = TransactionError::InvalidAccountIdentity("Invalid public key format".into());
        assert_eq!(error.details(), "Invalid public key format");
        assert_eq!(
            error.to_string(),
            "Invalid account identity: Invalid public key format"
        );
    }

    #[test]
    fn test_kind_display_and_serialization() {
        assert_eq!(ErrorKind::NetworkUnavailable.to_string(), "NetworkUnavailable");
        assert_eq!(
            serde_json::to_value(ErrorKind::StateInconsistency).unwrap(),
            serde_json::json!("StateInconsistency")
        );
    }
}
