//! Request/response types for the minting status endpoints

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaxSupplyRequest {
    pub max_supply: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMintCountResponse {
    pub address: String,
    pub mint_count: u64,
}
