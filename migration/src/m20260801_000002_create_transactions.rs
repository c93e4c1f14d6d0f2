use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Hash)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Transactions::TxType).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::TokenId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::FromAddress)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::ToAddress).string().not_null())
                    .col(ColumnDef::new(Transactions::Price).decimal())
                    .col(ColumnDef::new(Transactions::Status).string().not_null())
                    .col(ColumnDef::new(Transactions::BlockNumber).big_integer())
                    .col(ColumnDef::new(Transactions::GasUsed).big_integer())
                    .col(
                        ColumnDef::new(Transactions::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::ContractAddress)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, col) in [
            ("idx_transactions_token_id", Transactions::TokenId),
            ("idx_transactions_from_address", Transactions::FromAddress),
            ("idx_transactions_to_address", Transactions::ToAddress),
            ("idx_transactions_contract_address", Transactions::ContractAddress),
            ("idx_transactions_timestamp", Transactions::Timestamp),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Transactions::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    Hash,
    TxType,
    TokenId,
    FromAddress,
    ToAddress,
    Price,
    Status,
    BlockNumber,
    GasUsed,
    Timestamp,
    ContractAddress,
    CreatedAt,
}
