use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of both candy machine endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandyMachineRequest {
    /// Base58 public key of the requesting wallet.
    #[schema(example = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin")]
    pub user_pubkey: Option<String>,
}
