//! Chain reader for the NFT contract
//!
//! Authoritative supply figures are read once at startup to seed the
//! minting statistics aggregator; the hot mint path never touches the
//! chain.

use alloy::{
    primitives::Address,
    providers::{ProviderBuilder, RootProvider},
    sol,
    transports::http::{Client, Http},
};
use std::str::FromStr;

sol! {
    #[sol(rpc)]
    interface ISimpleNft {
        function totalSupply() external view returns (uint256);
        function maxSupply() external view returns (uint256);
    }
}

#[derive(Debug)]
pub enum ChainError {
    ContractCallError(String),
    InvalidConfig(String),
}

impl std::fmt::Display for ChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainError::ContractCallError(msg) => write!(f, "Contract call error: {}", msg),
            ChainError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ChainError {}

#[derive(Clone)]
pub struct ChainReader {
    provider: RootProvider<Http<Client>>,
    contract_address: Address,
}

impl ChainReader {
    pub fn new(rpc_url: &str, contract_address: &str) -> Result<Self, ChainError> {
        let provider = ProviderBuilder::new().on_http(rpc_url.parse().map_err(|e| {
            ChainError::InvalidConfig(format!("Invalid RPC URL: {}", e))
        })?);

        let contract_address = Address::from_str(contract_address).map_err(|e| {
            ChainError::InvalidConfig(format!("Invalid contract address: {}", e))
        })?;

        Ok(Self {
            provider,
            contract_address,
        })
    }

    pub async fn total_supply(&self) -> Result<u64, ChainError> {
        let contract = ISimpleNft::new(self.contract_address, &self.provider);
        let supply = contract
            .totalSupply()
            .call()
            .await
            .map_err(|e| {
                ChainError::ContractCallError(format!("totalSupply failed: {}", e))
            })?
            ._0;

        u64::try_from(supply)
            .map_err(|_| ChainError::ContractCallError("totalSupply out of range".to_string()))
    }

    pub async fn max_supply(&self) -> Result<u64, ChainError> {
        let contract = ISimpleNft::new(self.contract_address, &self.provider);
        let supply = contract
            .maxSupply()
            .call()
            .await
            .map_err(|e| {
                ChainError::ContractCallError(format!("maxSupply failed: {}", e))
            })?
            ._0;

        u64::try_from(supply)
            .map_err(|_| ChainError::ContractCallError("maxSupply out of range".to_string()))
    }
}
