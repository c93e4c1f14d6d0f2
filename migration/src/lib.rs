pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_nft_tokens;
mod m20260801_000002_create_transactions;
mod m20260801_000003_create_blobs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_nft_tokens::Migration),
            Box::new(m20260801_000002_create_transactions::Migration),
            Box::new(m20260801_000003_create_blobs::Migration),
        ]
    }
}
