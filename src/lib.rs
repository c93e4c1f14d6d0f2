// src/lib.rs

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use services::{metadata::MetadataService, minting_stats::MintingStatsService};

/// Upload size cap for the metadata POST (image bytes)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub metadata: MetadataService,
    pub minting_stats: MintingStatsService,
    pub public_base_url: String,
}

pub mod entities {
    pub mod prelude;

    pub mod blobs;
    pub mod nft_tokens;
    pub mod transactions;
}

pub mod services {
    pub mod address;
    pub mod blob_store;
    pub mod chain;
    pub mod ledger;
    pub mod metadata;
    pub mod minting_stats;
}

pub mod models {
    pub mod error;
    pub mod metadata;
    pub mod minting_status;
    pub mod response;
    pub mod transaction;
}

pub mod handlers {
    pub mod metadata;
    pub mod minting_status;
    pub mod transaction;
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/metadata",
            get(handlers::metadata::list_metadata).post(handlers::metadata::create_metadata),
        )
        .route("/api/metadata/file/{id}", get(handlers::metadata::get_file))
        .route(
            "/api/metadata/{token_id}",
            get(handlers::metadata::get_metadata).patch(handlers::metadata::update_metadata),
        )
        .route(
            "/api/minting-status",
            get(handlers::minting_status::get_minting_stats),
        )
        .route(
            "/api/minting-status/user/{address}",
            get(handlers::minting_status::get_user_mint_count),
        )
        .route(
            "/api/minting-status/max-supply",
            put(handlers::minting_status::update_max_supply),
        )
        .route(
            "/api/minting-status/reset",
            post(handlers::minting_status::reset_stats),
        )
        .route(
            "/api/transactions",
            get(handlers::transaction::get_transactions)
                .post(handlers::transaction::create_transaction),
        )
        .route(
            "/api/transactions/{hash}",
            get(handlers::transaction::get_transaction),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
