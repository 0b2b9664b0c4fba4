use chrono::{DateTime, Utc};
use solana_sdk::pubkey::Pubkey;

/// A candy machine created on behalf of a wallet.
///
/// `sequence` orders creation requests by the time they started; a record
/// only replaces another record for the same wallet with a lower sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineRecord {
    pub id: String,
    pub sequence: u64,
    pub owner: Pubkey,
    pub candy_machine: Pubkey,
    pub collection: Pubkey,
    pub authority: Pubkey,
    pub items_available: u64,
    pub created_at: DateTime<Utc>,
}
