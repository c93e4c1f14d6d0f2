use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

use nft_mint_backend::services::metadata::MetadataService;
use nft_mint_backend::services::minting_stats::MintingStatsService;
use nft_mint_backend::AppState;

/// Mock Postgres backend; tests stub query results per scenario
#[allow(dead_code)]
pub fn mock_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

/// AppState over the given connection with fresh in-memory services
#[allow(dead_code)]
pub fn test_state(db: DatabaseConnection) -> AppState {
    AppState {
        db,
        metadata: MetadataService::new(),
        minting_stats: MintingStatsService::new(),
        public_base_url: "http://localhost:5000".to_string(),
    }
}

/// State with an empty mock database, for endpoints that never touch it
#[allow(dead_code)]
pub fn stateless_test_state() -> AppState {
    test_state(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}
