//! Wiring of the post service onto the configured storage.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::ports::PostRepository;

use crate::config::AppConfig;
use crate::memory::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use crate::database::{DatabaseConnections, PostgresPostRepository};

/// Build the post service with the appropriate repository.
///
/// Falls back to the in-memory repository when no database is configured
/// or the connection fails.
pub async fn build_post_service(config: &AppConfig) -> PostService {
    let repo = post_repository(config).await;
    tracing::info!(
        route_prefix = %config.pipeline.route_prefix,
        precision = %config.pipeline.calendar_precision,
        "Post service initialized"
    );
    PostService::new(repo, &config.pipeline)
}

#[cfg(feature = "postgres")]
async fn post_repository(config: &AppConfig) -> Arc<dyn PostRepository> {
    let Some(db_config) = config.database.as_ref() else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Arc::new(InMemoryPostRepository::new());
    };

    match DatabaseConnections::init(db_config).await {
        Ok(connections) => Arc::new(PostgresPostRepository::new(connections.main)),
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            Arc::new(InMemoryPostRepository::new())
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn post_repository(_config: &AppConfig) -> Arc<dyn PostRepository> {
    tracing::info!("Running without postgres feature - using in-memory repository");
    Arc::new(InMemoryPostRepository::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::{Actor, PostDraft};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_in_memory_without_database() {
        let config = AppConfig::from_lookup(|_| None);
        let service = build_post_service(&config).await;

        let actor = Actor::new(Uuid::new_v4());
        let view = service
            .create(Some(&actor), PostDraft::titled("Hello World"))
            .await
            .unwrap();

        let found = service.find_by_slug(None, "hello-world").await.unwrap();
        assert_eq!(found.map(|v| v.document.id), Some(view.document.id));
    }
}
