use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nft_mint_backend::services::chain::ChainReader;
use nft_mint_backend::services::metadata::MetadataService;
use nft_mint_backend::services::minting_stats::{self, MintingStatsService};
use nft_mint_backend::{router, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,nft_mint_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Connect to database
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let public_base_url =
        env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

    let state = AppState {
        db: db.clone(),
        metadata: MetadataService::new(),
        minting_stats: MintingStatsService::new(),
        public_base_url,
    };

    // Seed the statistics aggregator from the chain, fire-and-forget.
    // Missing chain config or a failed read leaves zeroed defaults in place.
    match (env::var("RPC_URL"), env::var("CONTRACT_ADDRESS")) {
        (Ok(rpc_url), Ok(contract_address)) => {
            match ChainReader::new(&rpc_url, &contract_address) {
                Ok(chain) => {
                    minting_stats::spawn_initialization(state.minting_stats.clone(), db, chain)
                }
                Err(e) => tracing::error!("chain reader unavailable, serving default stats: {}", e),
            }
        }
        _ => tracing::warn!("RPC_URL/CONTRACT_ADDRESS not set, serving default minting stats"),
    }

    let app = router(state);

    // Start server
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
