use serde::{Deserialize, Serialize};

/// Commitment-level status of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum SolanaTransactionStatus {
    Processed,
    Confirmed,
    Finalized,
    /// Landed on chain with an execution error.
    Failed(String),
}

impl SolanaTransactionStatus {
    pub fn is_confirmed(&self) -> bool {
        matches!(
            self,
            SolanaTransactionStatus::Confirmed | SolanaTransactionStatus::Finalized
        )
    }
}
