use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NftTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NftTokens::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NftTokens::TokenId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(NftTokens::Owner).string().not_null())
                    .col(ColumnDef::new(NftTokens::Name).string().not_null())
                    .col(ColumnDef::new(NftTokens::Description).text().not_null())
                    .col(ColumnDef::new(NftTokens::Image).string().not_null())
                    .col(ColumnDef::new(NftTokens::Attributes).json())
                    .col(
                        ColumnDef::new(NftTokens::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NftTokens::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_nft_tokens_owner")
                    .table(NftTokens::Table)
                    .col(NftTokens::Owner)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NftTokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NftTokens {
    Table,
    Id,
    TokenId,
    Owner,
    Name,
    Description,
    Image,
    Attributes,
    CreatedAt,
    UpdatedAt,
}
