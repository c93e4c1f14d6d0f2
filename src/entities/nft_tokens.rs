//! SeaORM entity for the nft_tokens table
//!
//! One row per minted token. `token_id` is assigned by the chain and carries
//! a unique index; `owner` is stored lower-cased (ownership at mint time).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "nft_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub token_id: i64,
    pub owner: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
