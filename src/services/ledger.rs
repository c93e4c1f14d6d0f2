//! Transaction ledger
//!
//! Append-only records of chain events. Entries are identified by their
//! transaction hash; identity fields are never rewritten after append.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use chrono::FixedOffset;

use crate::entities::{prelude::*, transactions};
use crate::models::error::{map_unique_violation, ApiError};
use crate::models::transaction::{LedgerEntryInput, TransactionListQuery};
use crate::services::address::normalize;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Append a validated entry. Fails with `DuplicateHash` when the hash is
/// already recorded; the unique index settles concurrent appends.
pub async fn append(
    db: &DatabaseConnection,
    entry: LedgerEntryInput,
) -> Result<transactions::Model, ApiError> {
    let existing = Transactions::find()
        .filter(transactions::Column::Hash.eq(&entry.hash))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::DuplicateHash);
    }

    let now = chrono::Utc::now().with_timezone(&FixedOffset::east_opt(0).unwrap());
    let model = transactions::ActiveModel {
        hash: Set(entry.hash),
        tx_type: Set(entry.tx_type.as_str().to_string()),
        token_id: Set(entry.token_id),
        from_address: Set(entry.from.into_inner()),
        to_address: Set(entry.to.into_inner()),
        price: Set(entry.price),
        status: Set(entry.status.as_str().to_string()),
        block_number: Set(entry.block_number),
        gas_used: Set(entry.gas_used),
        timestamp: Set(entry.timestamp.with_timezone(&FixedOffset::east_opt(0).unwrap())),
        contract_address: Set(entry.contract_address.into_inner()),
        created_at: Set(now),
        ..Default::default()
    };

    let inserted = model
        .insert(db)
        .await
        .map_err(|e| map_unique_violation(e, ApiError::DuplicateHash))?;
    tracing::info!(
        "recorded {} transaction {} for token {}",
        inserted.tx_type,
        inserted.hash,
        inserted.token_id
    );
    Ok(inserted)
}

pub async fn get_by_hash(
    db: &DatabaseConnection,
    hash: &str,
) -> Result<transactions::Model, ApiError> {
    Transactions::find()
        .filter(transactions::Column::Hash.eq(hash))
        .one(db)
        .await?
        .ok_or(ApiError::NotFound("Transaction"))
}

/// Filtered, timestamp-descending page plus the filtered total count.
pub async fn query(
    db: &DatabaseConnection,
    params: &TransactionListQuery,
) -> Result<(Vec<transactions::Model>, u64), ApiError> {
    let condition = build_condition(params)?;
    let (page, limit) = page_params(params);

    let total = Transactions::find()
        .filter(condition.clone())
        .count(db)
        .await?;

    let entries = Transactions::find()
        .filter(condition)
        .order_by_desc(transactions::Column::Timestamp)
        .offset((page - 1) * limit)
        .limit(limit)
        .all(db)
        .await?;

    Ok((entries, total))
}

/// Translate the query string into a SeaORM condition. The `address`
/// filter matches either side of the transfer.
pub fn build_condition(params: &TransactionListQuery) -> Result<Condition, ApiError> {
    let mut condition = Condition::all();
    if let Some(tx_type) = params.tx_type {
        condition = condition.add(transactions::Column::TxType.eq(tx_type.as_str()));
    }
    if let Some(status) = params.status {
        condition = condition.add(transactions::Column::Status.eq(status.as_str()));
    }
    if let Some(contract_address) = &params.contract_address {
        let normalized = normalize(contract_address)?;
        condition =
            condition.add(transactions::Column::ContractAddress.eq(normalized.into_inner()));
    }
    if let Some(token_id) = params.token_id {
        condition = condition.add(transactions::Column::TokenId.eq(token_id));
    }
    if let Some(address) = &params.address {
        let normalized = normalize(address)?;
        condition = condition.add(
            Condition::any()
                .add(transactions::Column::FromAddress.eq(normalized.as_str()))
                .add(transactions::Column::ToAddress.eq(normalized.as_str())),
        );
    }
    Ok(condition)
}

pub fn page_params(params: &TransactionListQuery) -> (u64, u64) {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    (page, limit)
}

/// Page count for the pagination block: ceil(total / limit).
pub fn page_count(total: u64, limit: u64) -> u64 {
    total.div_ceil(limit)
}
