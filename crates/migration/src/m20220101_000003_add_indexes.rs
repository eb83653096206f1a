use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Login resolution is keyed by (provider_name, provider_identifier);
        // at most one row may hold a given pair across all users.
        manager
            .create_index(
                Index::create()
                    .name("uq_auth_identity_provider_identity")
                    .table(AuthIdentity::Table)
                    .col(AuthIdentity::ProviderName)
                    .col(AuthIdentity::ProviderIdentifier)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // One binding per provider per user; doubles as the forward-lookup index.
        manager
            .create_index(
                Index::create()
                    .name("uq_auth_identity_user_provider")
                    .table(AuthIdentity::Table)
                    .col(AuthIdentity::UserId)
                    .col(AuthIdentity::ProviderName)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uq_auth_identity_provider_identity").table(AuthIdentity::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uq_auth_identity_user_provider").table(AuthIdentity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuthIdentity { Table, UserId, ProviderName, ProviderIdentifier }
