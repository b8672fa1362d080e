//! Post operations as the host sees them.
//!
//! Writes: access check, write pipeline, validation, storage.
//! Reads: access check, storage, display projection.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::domain::{
    AccessPolicy, Actor, Operation, POSTS_COLLECTION, PostDocument, PostDraft, PostPatch, PostView,
};
use crate::error::{DomainError, RepoError};
use crate::pipeline::{DisplayProjector, WriteContext, WritePipeline};
use crate::ports::{Clock, Page, PostRepository, SystemClock};

pub struct PostService {
    repo: Arc<dyn PostRepository>,
    clock: Arc<dyn Clock>,
    pipeline: WritePipeline,
    projector: DisplayProjector,
    access: AccessPolicy,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>, config: &PipelineConfig) -> Self {
        Self {
            repo,
            clock: Arc::new(SystemClock),
            pipeline: WritePipeline::standard(config),
            projector: DisplayProjector::from_config(config),
            access: AccessPolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_access(mut self, access: AccessPolicy) -> Self {
        self.access = access;
        self
    }

    pub fn pipeline(&self) -> &WritePipeline {
        &self.pipeline
    }

    pub async fn create(
        &self,
        actor: Option<&Actor>,
        draft: PostDraft,
    ) -> Result<PostView, DomainError> {
        self.authorize(Operation::Create, actor)?;

        let ctx = WriteContext::capture(self.clock.as_ref());
        let draft = self.pipeline.run(draft, &ctx);
        let doc = PostDocument::create(Uuid::new_v4(), draft, ctx.now())?;

        let saved = self.repo.insert(doc).await?;
        tracing::info!(post_id = %saved.id, slug = ?saved.slug, status = %saved.status, "Post created");

        Ok(self.projector.project(&saved))
    }

    pub async fn update(
        &self,
        actor: Option<&Actor>,
        id: Uuid,
        patch: PostPatch,
    ) -> Result<PostView, DomainError> {
        self.authorize(Operation::Update, actor)?;

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let ctx = WriteContext::capture(self.clock.as_ref());
        let draft = self.pipeline.run(patch.apply_to(&existing), &ctx);
        let doc = existing.revise(draft, ctx.now())?;

        let saved = self.repo.update(doc).await.map_err(|e| match e {
            RepoError::NotFound => not_found(id),
            other => other.into(),
        })?;
        tracing::info!(post_id = %saved.id, status = %saved.status, "Post updated");

        Ok(self.projector.project(&saved))
    }

    pub async fn find_by_id(
        &self,
        actor: Option<&Actor>,
        id: Uuid,
    ) -> Result<Option<PostView>, DomainError> {
        self.authorize(Operation::Read, actor)?;
        let doc = self.repo.find_by_id(id).await?;
        Ok(doc.map(|doc| self.projector.project(&doc)))
    }

    pub async fn find_by_slug(
        &self,
        actor: Option<&Actor>,
        slug: &str,
    ) -> Result<Option<PostView>, DomainError> {
        self.authorize(Operation::Read, actor)?;
        let doc = self.repo.find_by_slug(slug).await?;
        Ok(doc.map(|doc| self.projector.project(&doc)))
    }

    pub async fn list(
        &self,
        actor: Option<&Actor>,
        page: Page,
    ) -> Result<Vec<PostView>, DomainError> {
        self.authorize(Operation::Read, actor)?;
        let docs = self.repo.list(page).await?;
        Ok(self.project_all(&docs))
    }

    pub async fn list_by_author(
        &self,
        actor: Option<&Actor>,
        author: Uuid,
    ) -> Result<Vec<PostView>, DomainError> {
        self.authorize(Operation::Read, actor)?;
        let docs = self.repo.find_by_author(author).await?;
        Ok(self.project_all(&docs))
    }

    pub async fn delete(&self, actor: Option<&Actor>, id: Uuid) -> Result<(), DomainError> {
        self.authorize(Operation::Delete, actor)?;

        self.repo.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => not_found(id),
            other => other.into(),
        })?;
        tracing::info!(post_id = %id, "Post deleted");

        Ok(())
    }

    fn project_all(&self, docs: &[PostDocument]) -> Vec<PostView> {
        docs.iter().map(|doc| self.projector.project(doc)).collect()
    }

    fn authorize(&self, operation: Operation, actor: Option<&Actor>) -> Result<(), DomainError> {
        if self.access.allows(operation, actor) {
            Ok(())
        } else {
            tracing::debug!(?operation, "Access denied");
            Err(DomainError::Unauthorized)
        }
    }
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: POSTS_COLLECTION,
        id,
    }
}
