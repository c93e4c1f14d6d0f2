//! SeaORM entity for the transactions table
//!
//! Append-only ledger of chain events (mint/transfer/sale/approval).
//! `hash` is the natural key and carries a unique index.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub hash: String,
    pub tx_type: String,
    pub token_id: i64,
    pub from_address: String,
    pub to_address: String,
    pub price: Option<Decimal>,
    pub status: String,
    pub block_number: Option<i64>,
    pub gas_used: Option<i64>,
    pub timestamp: DateTimeWithTimeZone,
    pub contract_address: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
