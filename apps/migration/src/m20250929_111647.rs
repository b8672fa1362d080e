//! Initial schema: the `users` and `media` tables posts refer to.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(users_table()).await?;
        manager.create_table(media_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Media::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await
    }
}

fn users_table() -> TableCreateStatement {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
        .col(&mut timestamp(Users::CreatedAt))
        .col(&mut timestamp(Users::UpdatedAt))
        .to_owned()
}

fn media_table() -> TableCreateStatement {
    Table::create()
        .table(Media::Table)
        .if_not_exists()
        .col(ColumnDef::new(Media::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Media::Alt).string().null())
        .col(ColumnDef::new(Media::Filename).string().not_null())
        .col(ColumnDef::new(Media::Url).string().null())
        .col(&mut timestamp(Media::CreatedAt))
        .col(&mut timestamp(Media::UpdatedAt))
        .to_owned()
}

pub(crate) fn timestamp(column: impl IntoIden) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Email,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Media {
    Table,
    Id,
    Alt,
    Filename,
    Url,
    CreatedAt,
    UpdatedAt,
}
