use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::PostDocument;
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Store a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Offset pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

/// Post repository. Slug uniqueness is enforced here, surfacing as
/// [`RepoError::Constraint`].
#[async_trait]
pub trait PostRepository: BaseRepository<PostDocument, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostDocument>, RepoError>;

    /// Newest first.
    async fn list(&self, page: Page) -> Result<Vec<PostDocument>, RepoError>;

    async fn find_by_author(&self, author: Uuid) -> Result<Vec<PostDocument>, RepoError>;
}
