//! The `posts` table.

use sea_orm_migration::prelude::*;

use crate::m20250929_111647::{Media, Users, timestamp};

const STATUS_PUBLISHED_AT_INDEX: &str = "idx_posts_status_published_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(posts_table()).await?;
        manager.create_index(status_index()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(STATUS_PUBLISHED_AT_INDEX)
                    .table(Posts::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).if_exists().to_owned())
            .await
    }
}

fn posts_table() -> TableCreateStatement {
    Table::create()
        .table(Posts::Table)
        .if_not_exists()
        .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Posts::Title).string().not_null())
        .col(ColumnDef::new(Posts::Slug).string().null().unique_key())
        .col(
            ColumnDef::new(Posts::Status)
                .string_len(16)
                .not_null()
                .default("draft"),
        )
        .col(ColumnDef::new(Posts::PublishedAt).timestamp_with_time_zone().null())
        .col(ColumnDef::new(Posts::HeroImageId).uuid().null())
        .col(ColumnDef::new(Posts::Body).json_binary().null())
        .col(ColumnDef::new(Posts::AuthorId).uuid().null())
        .col(&mut timestamp(Posts::CreatedAt))
        .col(&mut timestamp(Posts::UpdatedAt))
        .foreign_key(
            ForeignKey::create()
                .name("fk_posts_hero_image_id")
                .from(Posts::Table, Posts::HeroImageId)
                .to(Media::Table, Media::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .on_update(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_posts_author_id")
                .from(Posts::Table, Posts::AuthorId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn status_index() -> IndexCreateStatement {
    Index::create()
        .name(STATUS_PUBLISHED_AT_INDEX)
        .table(Posts::Table)
        .col(Posts::Status)
        .col(Posts::PublishedAt)
        .if_not_exists()
        .to_owned()
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Slug,
    Status,
    PublishedAt,
    HeroImageId,
    Body,
    AuthorId,
    CreatedAt,
    UpdatedAt,
}
