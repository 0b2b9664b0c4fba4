//! Candy machines created per wallet.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use solana_sdk::pubkey::Pubkey;

use crate::models::{MachineRecord, RepositoryError};

mod machine_in_memory;
pub use machine_in_memory::*;

#[async_trait]
#[cfg_attr(test, automock)]
pub trait MachineRepository: Send + Sync {
    /// Stores `record` unless the wallet already has a record with an equal
    /// or higher sequence. Returns whether the record was stored.
    async fn upsert_if_newer(&self, record: MachineRecord) -> Result<bool, RepositoryError>;

    /// Most recent record for `owner`.
    async fn get_latest(&self, owner: &Pubkey) -> Result<MachineRecord, RepositoryError>;
}
