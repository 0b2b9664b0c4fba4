use solana_sdk::pubkey::Pubkey;

/// Accounts referenced by the creation instructions.
///
/// `candy_machine` and `collection` are fresh keys generated per request;
/// `authority` is the server key, which also pays account rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreationAccounts {
    pub candy_machine: Pubkey,
    pub collection: Pubkey,
    pub authority: Pubkey,
}

/// Accounts referenced by the mint instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintAccounts {
    pub candy_machine: Pubkey,
    pub collection: Pubkey,
    pub asset: Pubkey,
    /// Pays rent and guard payments and signs as minter.
    pub minter: Pubkey,
    /// Receives the minted asset.
    pub owner: Pubkey,
}
