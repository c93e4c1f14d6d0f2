//! Token metadata store
//!
//! CRUD over the nft_tokens table with a moka cache fronting point reads.
//! Token-id uniqueness is guarded twice: a fast-path existence check for a
//! friendly error, and the unique index for concurrent writers that both
//! pass the check.

use chrono::{FixedOffset, Utc};
use moka::future::Cache;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::time::Duration;

use crate::entities::{nft_tokens, prelude::*};
use crate::models::error::{map_unique_violation, ApiError};
use crate::models::metadata::{NewTokenRecord, UpdateTokenRecord};
use crate::services::address::NormalizedAddress;

const CACHE_CAPACITY: u64 = 10_000;
const CACHE_TTL_SECS: u64 = 300;

#[derive(Clone)]
pub struct MetadataService {
    cache: Cache<i64, nft_tokens::Model>,
}

impl Default for MetadataService {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataService {
    pub fn new() -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(Duration::from_secs(CACHE_TTL_SECS))
            .build();
        Self { cache }
    }

    /// Store metadata for a freshly minted token. Fails with
    /// `DuplicateToken` when the token id is already recorded.
    pub async fn create(
        &self,
        db: &DatabaseConnection,
        record: NewTokenRecord,
    ) -> Result<nft_tokens::Model, ApiError> {
        record.validate()?;

        // Fast-path duplicate check; the unique index settles races
        let existing = NftTokens::find()
            .filter(nft_tokens::Column::TokenId.eq(record.token_id))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ApiError::DuplicateToken);
        }

        let attributes = match &record.attributes {
            Some(attrs) => Some(serde_json::to_value(attrs).map_err(|e| {
                ApiError::Upstream(format!("failed to encode attributes: {}", e))
            })?),
            None => None,
        };

        let now = Utc::now().with_timezone(&FixedOffset::east_opt(0).unwrap());
        let model = nft_tokens::ActiveModel {
            token_id: Set(record.token_id),
            owner: Set(record.owner.into_inner()),
            name: Set(record.name.trim().to_string()),
            description: Set(record.description.trim().to_string()),
            image: Set(record.image),
            attributes: Set(attributes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model
            .insert(db)
            .await
            .map_err(|e| map_unique_violation(e, ApiError::DuplicateToken))?;

        self.cache.insert(inserted.token_id, inserted.clone()).await;
        tracing::info!("stored metadata for token {}", inserted.token_id);
        Ok(inserted)
    }

    pub async fn get(
        &self,
        db: &DatabaseConnection,
        token_id: i64,
    ) -> Result<nft_tokens::Model, ApiError> {
        if let Some(cached) = self.cache.get(&token_id).await {
            return Ok(cached);
        }

        let record = NftTokens::find()
            .filter(nft_tokens::Column::TokenId.eq(token_id))
            .one(db)
            .await?
            .ok_or(ApiError::NotFound("Metadata"))?;

        self.cache.insert(token_id, record.clone()).await;
        Ok(record)
    }

    /// All records, newest token first.
    pub async fn list(&self, db: &DatabaseConnection) -> Result<Vec<nft_tokens::Model>, ApiError> {
        let records = NftTokens::find()
            .order_by_desc(nft_tokens::Column::TokenId)
            .all(db)
            .await?;
        Ok(records)
    }

    /// Records owned at mint by the given address. Implemented as a filter
    /// over the full listing; the store stays small enough that a dedicated
    /// index is not warranted.
    pub async fn list_by_owner(
        &self,
        db: &DatabaseConnection,
        owner: &NormalizedAddress,
    ) -> Result<Vec<nft_tokens::Model>, ApiError> {
        let records = self.list(db).await?;
        Ok(records
            .into_iter()
            .filter(|record| record.owner.to_lowercase() == owner.as_str())
            .collect())
    }

    /// Partial update of the mutable fields; token id and owner-at-mint are
    /// immutable history.
    pub async fn update(
        &self,
        db: &DatabaseConnection,
        token_id: i64,
        changes: UpdateTokenRecord,
    ) -> Result<nft_tokens::Model, ApiError> {
        changes.validate()?;

        let existing = NftTokens::find()
            .filter(nft_tokens::Column::TokenId.eq(token_id))
            .one(db)
            .await?
            .ok_or(ApiError::NotFound("Metadata"))?;

        let mut active = existing.into_active_model();
        if let Some(name) = changes.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(description) = changes.description {
            active.description = Set(description.trim().to_string());
        }
        if let Some(image) = changes.image {
            active.image = Set(image);
        }
        if let Some(attributes) = changes.attributes {
            let encoded = serde_json::to_value(&attributes).map_err(|e| {
                ApiError::Upstream(format!("failed to encode attributes: {}", e))
            })?;
            active.attributes = Set(Some(encoded));
        }
        active.updated_at = Set(Utc::now().with_timezone(&FixedOffset::east_opt(0).unwrap()));

        let updated = active.update(db).await?;
        self.cache.insert(token_id, updated.clone()).await;
        Ok(updated)
    }
}
