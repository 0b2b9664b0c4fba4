use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ErrorKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandyMachineResponse {
    pub message: String,
    /// Base64 transaction signed by the server; the wallet's fee-payer
    /// signature is the only one missing.
    pub transaction: String,
    pub candy_machine: String,
    pub collection: String,
    pub last_valid_block_height: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MintedNft {
    pub minted_nft_pubkey: String,
    pub candy_machine_pubkey: String,
    pub collection_pubkey: String,
    pub minted_by: String,
    pub transaction_signature: String,
    pub minted_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MintCandyMachineResponse {
    pub message: String,
    pub minted_nft: MintedNft,
    pub transaction_signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
    pub details: String,
}
