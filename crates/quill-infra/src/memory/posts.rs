//! In-memory post repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::PostDocument;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, Page, PostRepository};

/// Post repository backed by a `HashMap` behind an async `RwLock`.
///
/// Enforces slug uniqueness the way the `posts.slug` unique index does.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, PostDocument>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn check_slug(
        store: &HashMap<Uuid, PostDocument>,
        doc: &PostDocument,
    ) -> Result<(), RepoError> {
        let Some(slug) = doc.slug.as_deref() else {
            return Ok(());
        };

        let taken = store
            .values()
            .any(|other| other.id != doc.id && other.slug.as_deref() == Some(slug));
        if taken {
            return Err(RepoError::Constraint(format!("slug `{slug}` is already taken")));
        }

        Ok(())
    }

    fn newest_first(mut docs: Vec<PostDocument>) -> Vec<PostDocument> {
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        docs
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<PostDocument, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostDocument>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, entity: PostDocument) -> Result<PostDocument, RepoError> {
        let mut store = self.store.write().await;

        if store.contains_key(&entity.id) {
            return Err(RepoError::Constraint(format!(
                "post {} already exists",
                entity.id
            )));
        }
        Self::check_slug(&store, &entity)?;

        store.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: PostDocument) -> Result<PostDocument, RepoError> {
        let mut store = self.store.write().await;

        if !store.contains_key(&entity.id) {
            return Err(RepoError::NotFound);
        }
        Self::check_slug(&store, &entity)?;

        store.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostDocument>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .values()
            .find(|doc| doc.slug.as_deref() == Some(slug))
            .cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<PostDocument>, RepoError> {
        let docs = {
            let store = self.store.read().await;
            Self::newest_first(store.values().cloned().collect())
        };

        Ok(docs
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn find_by_author(&self, author: Uuid) -> Result<Vec<PostDocument>, RepoError> {
        let store = self.store.read().await;
        let docs = store
            .values()
            .filter(|doc| doc.author == Some(author))
            .cloned()
            .collect();
        Ok(Self::newest_first(docs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use quill_core::domain::PostStatus;

    fn doc(slug: Option<&str>, minutes: i64) -> PostDocument {
        let at = Utc.with_ymd_and_hms(2025, 10, 18, 8, 0, 0).unwrap() + Duration::minutes(minutes);
        PostDocument {
            id: Uuid::new_v4(),
            title: "Post".to_string(),
            slug: slug.map(str::to_string),
            status: PostStatus::Draft,
            published_at: None,
            hero_image: None,
            body: None,
            author: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.insert(doc(Some("a"), 0)).await.unwrap();

        assert_eq!(repo.find_by_id(saved.id).await.unwrap(), Some(saved.clone()));
        assert_eq!(repo.find_by_slug("a").await.unwrap(), Some(saved));
        assert_eq!(repo.find_by_slug("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_a_constraint_violation() {
        let repo = InMemoryPostRepository::new();
        repo.insert(doc(Some("same"), 0)).await.unwrap();

        let err = repo.insert(doc(Some("same"), 1)).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_missing_slugs_do_not_collide() {
        let repo = InMemoryPostRepository::new();
        repo.insert(doc(None, 0)).await.unwrap();
        repo.insert(doc(None, 1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_keeps_own_slug() {
        let repo = InMemoryPostRepository::new();
        let mut saved = repo.insert(doc(Some("mine"), 0)).await.unwrap();
        saved.title = "Renamed".to_string();

        let updated = repo.update(saved).await.unwrap();
        assert_eq!(updated.title, "Renamed");
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = InMemoryPostRepository::new();
        let err = repo.update(doc(None, 0)).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_paged() {
        let repo = InMemoryPostRepository::new();
        for minutes in 0..5 {
            repo.insert(doc(Some(&format!("p{minutes}")), minutes))
                .await
                .unwrap();
        }

        let page = repo.list(Page { limit: 2, offset: 1 }).await.unwrap();
        let slugs: Vec<_> = page.iter().filter_map(|d| d.slug.as_deref()).collect();
        assert_eq!(slugs, vec!["p3", "p2"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.insert(doc(None, 0)).await.unwrap();

        repo.delete(saved.id).await.unwrap();
        assert!(matches!(repo.delete(saved.id).await, Err(RepoError::NotFound)));
    }
}
