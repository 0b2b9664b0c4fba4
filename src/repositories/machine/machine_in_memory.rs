//! In-memory machine store backed by a `DashMap`, keyed by wallet.

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use solana_sdk::pubkey::Pubkey;

use super::MachineRepository;
use crate::models::{MachineRecord, RepositoryError};

#[derive(Debug, Default)]
pub struct InMemoryMachineRepository {
    store: DashMap<Pubkey, MachineRecord>, // owner -> latest machine
}

impl InMemoryMachineRepository {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[async_trait]
impl MachineRepository for InMemoryMachineRepository {
    async fn upsert_if_newer(&self, record: MachineRecord) -> Result<bool, RepositoryError> {
        // the entry guard holds the shard lock, so compare and replace are atomic
        match self.store.entry(record.owner) {
            Entry::Occupied(mut existing) => {
                if existing.get().sequence >= record.sequence {
                    return Ok(false);
                }
                existing.insert(record);
                Ok(true)
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(true)
            }
        }
    }

    async fn get_latest(&self, owner: &Pubkey) -> Result<MachineRecord, RepositoryError> {
        self.store
            .get(owner)
            .map(|record| record.clone())
            .ok_or_else(|| RepositoryError::NotFound(format!("no candy machine for {owner}")))
    }
}
