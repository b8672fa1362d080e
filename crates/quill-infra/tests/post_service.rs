use std::sync::Arc;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use quill_core::config::{CalendarPrecision, PipelineConfig};
use quill_core::domain::{AccessPolicy, Actor, PostDraft, PostPatch, PostStatus};
use quill_core::ports::{FixedClock, Page};
use quill_core::{DomainError, PostService};
use quill_infra::InMemoryPostRepository;

fn service_with(config: PipelineConfig) -> PostService {
    let now = Utc.with_ymd_and_hms(2025, 10, 18, 8, 0, 0).unwrap();
    PostService::new(Arc::new(InMemoryPostRepository::new()), &config)
        .with_clock(Arc::new(FixedClock::new(now)))
}

fn service() -> PostService {
    service_with(PipelineConfig::default())
}

fn editor() -> Actor {
    Actor::new(Uuid::new_v4())
}

fn published(title: &str) -> PostDraft {
    PostDraft {
        status: PostStatus::Published,
        ..PostDraft::titled(title)
    }
}

#[tokio::test]
async fn test_publishing_stamps_date_and_derives_slug() {
    let service = service();

    let view = service
        .create(Some(&editor()), published("Hello, World!  Café"))
        .await
        .unwrap();

    assert_eq!(view.document.slug.as_deref(), Some("hello-world-cafe"));
    assert_eq!(
        view.document.published_at.as_deref(),
        Some("2025-10-18T08:00:00.000Z")
    );
    assert_eq!(view.path.as_deref(), Some("/blog/hello-world-cafe"));
    assert_eq!(view.published_at_jalali.as_deref(), Some("1404/07/26"));
}

#[tokio::test]
async fn test_draft_has_no_publish_date() {
    let service = service();

    let view = service
        .create(Some(&editor()), PostDraft::titled("Notes"))
        .await
        .unwrap();

    assert_eq!(view.document.status, PostStatus::Draft);
    assert_eq!(view.document.published_at, None);
    assert_eq!(view.published_at_jalali, None);
    assert_eq!(view.path.as_deref(), Some("/blog/notes"));
}

#[tokio::test]
async fn test_supplied_publish_date_is_kept() {
    let service = service_with(PipelineConfig {
        calendar_precision: CalendarPrecision::DateTime,
        ..PipelineConfig::default()
    });

    let draft = PostDraft {
        slug: Some("Nowruz Eve".to_string()),
        published_at: Some("2025-03-20T21:00:00.000Z".to_string()),
        ..published("Spring")
    };
    let view = service.create(Some(&editor()), draft).await.unwrap();

    assert_eq!(view.document.slug.as_deref(), Some("nowruz-eve"));
    assert_eq!(
        view.document.published_at.as_deref(),
        Some("2025-03-20T21:00:00.000Z")
    );
    assert_eq!(view.published_at_jalali.as_deref(), Some("1404/01/01 - 00:30"));
}

#[tokio::test]
async fn test_writes_require_an_actor() {
    let service = service();

    let err = service
        .create(None, PostDraft::titled("Anonymous"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));

    let err = service.delete(None, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));
}

#[tokio::test]
async fn test_reads_are_public() {
    let service = service();
    let created = service
        .create(Some(&editor()), published("Open Post"))
        .await
        .unwrap();

    let found = service.find_by_id(None, created.document.id).await.unwrap();
    assert_eq!(found, Some(created.clone()));

    let by_slug = service.find_by_slug(None, "open-post").await.unwrap();
    assert_eq!(by_slug, Some(created));
}

#[tokio::test]
async fn test_missing_title_is_rejected() {
    let service = service();

    let err = service
        .create(Some(&editor()), PostDraft::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn test_malformed_publish_date_is_rejected() {
    let service = service();

    let draft = PostDraft {
        published_at: Some("next tuesday".to_string()),
        ..published("Later")
    };
    let err = service.create(Some(&editor()), draft).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn test_duplicate_slug_is_rejected() {
    let service = service();
    let actor = editor();

    service
        .create(Some(&actor), PostDraft::titled("Same Title"))
        .await
        .unwrap();
    let err = service
        .create(Some(&actor), PostDraft::titled("same  title"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Duplicate(_)));
}

#[tokio::test]
async fn test_status_only_update_keeps_publish_date() {
    let service = service();
    let actor = editor();

    let draft = PostDraft {
        published_at: Some("2024-01-01T00:00:00.000Z".to_string()),
        ..published("Archive")
    };
    let created = service.create(Some(&actor), draft).await.unwrap();

    let patch = PostPatch {
        status: Some(PostStatus::Published),
        ..PostPatch::default()
    };
    let updated = service
        .update(Some(&actor), created.document.id, patch)
        .await
        .unwrap();

    assert_eq!(
        updated.document.published_at.as_deref(),
        Some("2024-01-01T00:00:00.000Z")
    );
    assert_eq!(updated.document.created_at, created.document.created_at);
}

#[tokio::test]
async fn test_publishing_a_draft_stamps_the_update_time() {
    let service = service();
    let actor = editor();

    let created = service
        .create(Some(&actor), PostDraft::titled("Pending"))
        .await
        .unwrap();
    assert_eq!(created.document.published_at, None);

    let patch = PostPatch {
        status: Some(PostStatus::Published),
        ..PostPatch::default()
    };
    let updated = service
        .update(Some(&actor), created.document.id, patch)
        .await
        .unwrap();

    assert_eq!(
        updated.document.published_at.as_deref(),
        Some("2025-10-18T08:00:00.000Z")
    );
}

#[tokio::test]
async fn test_unpublishing_keeps_publish_date() {
    let service = service();
    let actor = editor();

    let created = service
        .create(Some(&actor), published("Retracted"))
        .await
        .unwrap();

    let patch = PostPatch {
        status: Some(PostStatus::Draft),
        ..PostPatch::default()
    };
    let updated = service
        .update(Some(&actor), created.document.id, patch)
        .await
        .unwrap();

    assert_eq!(updated.document.status, PostStatus::Draft);
    assert_eq!(updated.document.published_at, created.document.published_at);
}

#[tokio::test]
async fn test_retitled_post_keeps_its_slug() {
    let service = service();
    let actor = editor();

    let created = service
        .create(Some(&actor), PostDraft::titled("First Title"))
        .await
        .unwrap();

    let patch = PostPatch {
        title: Some("Second Title".to_string()),
        ..PostPatch::default()
    };
    let updated = service
        .update(Some(&actor), created.document.id, patch)
        .await
        .unwrap();

    assert_eq!(updated.document.title, "Second Title");
    assert_eq!(updated.document.slug.as_deref(), Some("first-title"));
}

#[tokio::test]
async fn test_missing_post_is_not_found() {
    let service = service();
    let actor = editor();
    let id = Uuid::new_v4();

    let err = service
        .update(Some(&actor), id, PostPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { id: missing, .. } if missing == id));

    let err = service.delete(Some(&actor), id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    assert_eq!(service.find_by_id(None, id).await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_removes_post() {
    let service = service();
    let actor = editor();

    let created = service
        .create(Some(&actor), PostDraft::titled("Short Lived"))
        .await
        .unwrap();
    service
        .delete(Some(&actor), created.document.id)
        .await
        .unwrap();

    assert_eq!(service.find_by_slug(None, "short-lived").await.unwrap(), None);
}

#[tokio::test]
async fn test_list_and_list_by_author_are_projected() {
    let service = service();
    let writer = editor();
    let other = editor();

    for title in ["One", "Two"] {
        let draft = PostDraft {
            author: Some(writer.user_id),
            ..published(title)
        };
        service.create(Some(&writer), draft).await.unwrap();
    }
    service
        .create(Some(&other), PostDraft::titled("Three"))
        .await
        .unwrap();

    let all = service.list(None, Page::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|view| view.path.is_some()));

    let mine = service.list_by_author(None, writer.user_id).await.unwrap();
    let mut slugs: Vec<_> = mine
        .iter()
        .filter_map(|view| view.document.slug.as_deref())
        .collect();
    slugs.sort_unstable();
    assert_eq!(slugs, vec!["one", "two"]);
    assert!(mine.iter().all(|view| view.published_at_jalali.is_some()));
}

#[tokio::test]
async fn test_view_serializes_display_fields() {
    let service = service();

    let view = service
        .create(Some(&editor()), published("Wire Shape"))
        .await
        .unwrap();
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["slug"], "wire-shape");
    assert_eq!(json["status"], "published");
    assert_eq!(json["publishedAt"], "2025-10-18T08:00:00.000Z");
    assert_eq!(json["publishedAtJalali"], "1404/07/26");
    assert_eq!(json["path"], "/blog/wire-shape");
}

#[tokio::test]
async fn test_cleared_publish_date_on_draft_is_absent() {
    let service = service();

    let draft = PostDraft {
        published_at: Some(String::new()),
        ..PostDraft::titled("Cleared")
    };
    let view = service.create(Some(&editor()), draft).await.unwrap();

    assert_eq!(view.document.status, PostStatus::Draft);
    assert_eq!(view.document.published_at, None);
    assert_eq!(view.published_at_jalali, None);
}

#[tokio::test]
async fn test_unpublish_patch_clearing_the_date() {
    let service = service();
    let actor = editor();

    let created = service
        .create(Some(&actor), published("Withdrawn"))
        .await
        .unwrap();

    let patch = PostPatch {
        status: Some(PostStatus::Draft),
        published_at: Some(String::new()),
        ..PostPatch::default()
    };
    let updated = service
        .update(Some(&actor), created.document.id, patch)
        .await
        .unwrap();

    assert_eq!(updated.document.status, PostStatus::Draft);
    assert_eq!(updated.document.published_at, None);
}

#[tokio::test]
async fn test_private_collection_requires_actor_for_reads() {
    let service = service().with_access(AccessPolicy { public_read: false });
    let actor = editor();

    let created = service
        .create(Some(&actor), PostDraft::titled("Members Only"))
        .await
        .unwrap();

    let err = service
        .find_by_id(None, created.document.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));

    let err = service.list(None, Page::default()).await.unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));

    let found = service
        .find_by_slug(Some(&actor), "members-only")
        .await
        .unwrap();
    assert_eq!(found, Some(created));
}

#[tokio::test]
async fn test_service_runs_the_standard_pipeline() {
    let service = service();
    assert_eq!(service.pipeline().stage_names(), vec!["slug", "publish-default"]);
}
