//! Request/response types for the transaction ledger

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::transactions;
use crate::models::error::ApiError;
use crate::services::address::{normalize, NormalizedAddress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Mint,
    Transfer,
    Sale,
    Approval,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Mint => "mint",
            TransactionType::Transfer => "transfer",
            TransactionType::Sale => "sale",
            TransactionType::Approval => "approval",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub hash: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub token_id: i64,
    pub from: String,
    pub to: String,
    pub price: Option<Decimal>,
    pub status: Option<TransactionStatus>,
    pub block_number: Option<i64>,
    pub gas_used: Option<i64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub contract_address: String,
}

/// Ledger entry input after validation: addresses normalized, defaults filled.
#[derive(Debug, Clone)]
pub struct LedgerEntryInput {
    pub hash: String,
    pub tx_type: TransactionType,
    pub token_id: i64,
    pub from: NormalizedAddress,
    pub to: NormalizedAddress,
    pub price: Option<Decimal>,
    pub status: TransactionStatus,
    pub block_number: Option<i64>,
    pub gas_used: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub contract_address: NormalizedAddress,
}

impl CreateTransactionRequest {
    pub fn validate(self) -> Result<LedgerEntryInput, ApiError> {
        let hash = self.hash.trim().to_string();
        if hash.is_empty() {
            return Err(ApiError::Validation(
                "Transaction hash is required".to_string(),
            ));
        }
        if self.token_id <= 0 {
            return Err(ApiError::Validation("Invalid token ID".to_string()));
        }
        if let Some(price) = self.price {
            if price < Decimal::ZERO {
                return Err(ApiError::Validation(
                    "Price cannot be negative".to_string(),
                ));
            }
        }
        Ok(LedgerEntryInput {
            hash,
            tx_type: self.tx_type,
            token_id: self.token_id,
            from: normalize(&self.from)?,
            to: normalize(&self.to)?,
            price: self.price,
            status: self.status.unwrap_or(TransactionStatus::Pending),
            block_number: self.block_number,
            gas_used: self.gas_used,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            contract_address: normalize(&self.contract_address)?,
        })
    }
}

/// Query string for `GET /api/transactions`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    #[serde(rename = "type")]
    pub tx_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub contract_address: Option<String>,
    pub token_id: Option<i64>,
    pub address: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub hash: String,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub token_id: i64,
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub contract_address: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        Self {
            hash: model.hash,
            tx_type: model.tx_type,
            token_id: model.token_id,
            from: model.from_address,
            to: model.to_address,
            price: model.price,
            status: model.status,
            block_number: model.block_number,
            gas_used: model.gas_used,
            timestamp: model.timestamp.with_timezone(&Utc),
            contract_address: model.contract_address,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub pages: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub status: String,
    pub data: Vec<TransactionResponse>,
    pub pagination: PaginationMeta,
}
