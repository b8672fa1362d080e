//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select};
use uuid::Uuid;

use quill_core::domain::PostDocument;
use quill_core::error::RepoError;
use quill_core::ports::{Page, PostRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Newest first; ties on `created_at` fall back to id order so pages are stable.
fn newest_first(select: Select<PostEntity>) -> Select<PostEntity> {
    select
        .order_by_desc(post::Column::CreatedAt)
        .order_by_asc(post::Column::Id)
}

fn into_documents(models: Vec<post::Model>) -> Result<Vec<PostDocument>, RepoError> {
    models.into_iter().map(PostDocument::try_from).collect()
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostDocument>, RepoError> {
        tracing::debug!(slug = %slug, "Finding post by slug");

        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        result.map(PostDocument::try_from).transpose()
    }

    async fn list(&self, page: Page) -> Result<Vec<PostDocument>, RepoError> {
        let result = newest_first(PostEntity::find())
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        into_documents(result)
    }

    async fn find_by_author(&self, author: Uuid) -> Result<Vec<PostDocument>, RepoError> {
        let result = newest_first(PostEntity::find())
            .filter(post::Column::AuthorId.eq(author))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        into_documents(result)
    }
}
