//! Minting statistics aggregator
//!
//! Process-wide singleton reconciling three sources: authoritative chain
//! reads (once, at startup), a scan of stored token records (per-owner
//! baseline), and incremental updates applied on each successful mint.
//! The snapshot lives behind a `parking_lot::RwLock`; all counter updates
//! run under the write lock so concurrent mints cannot lose increments.
//! Reads before initialization completes (or after it fails) see zeroed
//! defaults rather than blocking.

use parking_lot::RwLock;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QuerySelect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

use crate::entities::{nft_tokens, prelude::*};
use crate::models::error::ApiError;
use crate::services::address::NormalizedAddress;
use crate::services::chain::ChainReader;

/// Aggregator snapshot exposed over the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintingStats {
    pub total_supply: u64,
    pub max_supply: u64,
    pub total_owners: u64,
    pub user_mint_counts: HashMap<String, u64>,
}

/// Cloneable handle to the shared statistics state. The aggregator is the
/// sole writer; everything else reads snapshots.
#[derive(Clone, Default)]
pub struct MintingStatsService {
    stats: Arc<RwLock<MintingStats>>,
}

impl MintingStatsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot; zero-valued defaults until initialization lands.
    pub fn get_stats(&self) -> MintingStats {
        self.stats.read().clone()
    }

    /// Apply one successful mint. The whole read-increment-write sequence
    /// runs under the write lock.
    pub fn record_mint(&self, token_id: i64, owner: &NormalizedAddress) -> MintingStats {
        let mut guard = self.stats.write();
        let stats = &mut *guard;
        stats.total_supply += 1;
        let count = stats
            .user_mint_counts
            .entry(owner.as_str().to_string())
            .or_default();
        // Entries only exist with a count >= 1, so a zero here is a fresh owner
        if *count == 0 {
            stats.total_owners += 1;
        }
        *count += 1;
        tracing::debug!(
            "recorded mint of token {} for {}, total supply now {}",
            token_id,
            owner,
            stats.total_supply
        );
        stats.clone()
    }

    /// Mint count for an owner; 0 when the owner has no recorded mints.
    pub fn get_user_mint_count(&self, owner: &NormalizedAddress) -> u64 {
        self.stats
            .read()
            .user_mint_counts
            .get(owner.as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Update the max-supply policy value. Intentionally not checked
    /// against the current total supply (mirrors the off-chain policy the
    /// contract does not share).
    pub fn set_max_supply(&self, new_max: i64) -> Result<MintingStats, ApiError> {
        if new_max <= 0 {
            return Err(ApiError::Validation(
                "Invalid max supply value".to_string(),
            ));
        }
        let mut stats = self.stats.write();
        stats.max_supply = new_max as u64;
        Ok(stats.clone())
    }

    /// Zero all counters, keeping the max-supply policy value.
    pub fn reset_stats(&self) -> MintingStats {
        let mut stats = self.stats.write();
        let max_supply = stats.max_supply;
        *stats = MintingStats {
            max_supply,
            ..Default::default()
        };
        stats.clone()
    }

    /// Install the startup baseline: authoritative supply figures plus the
    /// per-owner counts recovered from stored token records.
    pub fn apply_baseline(
        &self,
        total_supply: u64,
        max_supply: u64,
        user_mint_counts: HashMap<String, u64>,
    ) {
        let mut stats = self.stats.write();
        *stats = MintingStats {
            total_supply,
            max_supply,
            total_owners: user_mint_counts.len() as u64,
            user_mint_counts,
        };
    }

    /// One-time reconciliation against the chain and the token store.
    /// Failure leaves the zeroed defaults in place; the caller logs and
    /// moves on (no retry).
    pub async fn initialize(
        &self,
        db: &DatabaseConnection,
        chain: &ChainReader,
    ) -> Result<(), ApiError> {
        let total_supply = chain
            .total_supply()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;
        let max_supply = chain
            .max_supply()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        // Per-owner counts from ownership-at-mint, not current ownership
        let rows: Vec<(String, i64)> = NftTokens::find()
            .select_only()
            .column(nft_tokens::Column::Owner)
            .column_as(nft_tokens::Column::Id.count(), "count")
            .group_by(nft_tokens::Column::Owner)
            .into_tuple()
            .all(db)
            .await?;

        let user_mint_counts: HashMap<String, u64> = rows
            .into_iter()
            .map(|(owner, count)| (owner.to_lowercase(), count.max(0) as u64))
            .collect();

        self.apply_baseline(total_supply, max_supply, user_mint_counts);
        info!(
            "minting stats initialized from chain: supply {}/{}, {} owners",
            total_supply,
            max_supply,
            self.stats.read().total_owners
        );
        Ok(())
    }
}

/// Spawn the fire-and-forget initialization task used at startup.
pub fn spawn_initialization(
    service: MintingStatsService,
    db: DatabaseConnection,
    chain: ChainReader,
) {
    tokio::spawn(async move {
        if let Err(e) = service.initialize(&db, &chain).await {
            error!("failed to initialize minting stats, serving defaults: {}", e);
        }
    });
}
