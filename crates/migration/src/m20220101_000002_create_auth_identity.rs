//! Create `auth_identity` table binding users to provider identities.
//! Links to `user` via FK; rows follow their owner on delete.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthIdentity::Table)
                    .if_not_exists()
                    .col(pk_auto(AuthIdentity::Id))
                    .col(integer(AuthIdentity::UserId).not_null())
                    .col(string_len(AuthIdentity::ProviderName, 32).not_null().default("onsite"))
                    .col(string_len(AuthIdentity::ProviderIdentifier, 255).not_null())
                    .col(timestamp_with_time_zone(AuthIdentity::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_auth_identity_user")
                            .from(AuthIdentity::Table, AuthIdentity::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuthIdentity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuthIdentity {
    Table,
    Id,
    UserId,
    ProviderName,
    ProviderIdentifier,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
