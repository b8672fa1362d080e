use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::pipeline::instant::parse_instant;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(format!("unknown post status `{other}`")),
        }
    }
}

/// Field mapping under construction for a single create or update.
///
/// `published_at` stays as the ISO-8601 text the host supplied; it is only
/// checked when the draft is turned into a [`PostDocument`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(default)]
    pub status: PostStatus,
    pub published_at: Option<String>,
    pub hero_image: Option<Uuid>,
    pub body: Option<serde_json::Value>,
    pub author: Option<Uuid>,
}

impl PostDraft {
    /// Draft with just a title, everything else at its default.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Partial update. Keys left as `None` keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub status: Option<PostStatus>,
    pub published_at: Option<String>,
    pub hero_image: Option<Uuid>,
    pub body: Option<serde_json::Value>,
    pub author: Option<Uuid>,
}

impl PostPatch {
    /// Lay the patch over a stored document, producing the full draft the
    /// write pipeline sees.
    pub fn apply_to(self, existing: &PostDocument) -> PostDraft {
        PostDraft {
            title: self.title.or_else(|| Some(existing.title.clone())),
            slug: self.slug.or_else(|| existing.slug.clone()),
            status: self.status.unwrap_or(existing.status),
            published_at: self.published_at.or_else(|| existing.published_at.clone()),
            hero_image: self.hero_image.or(existing.hero_image),
            body: self.body.or_else(|| existing.body.clone()),
            author: self.author.or(existing.author),
        }
    }
}

/// A post as storage holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    pub id: Uuid,
    pub title: String,
    pub slug: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<String>,
    pub hero_image: Option<Uuid>,
    pub body: Option<serde_json::Value>,
    pub author: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostDocument {
    /// Build a new document from a draft that has been through the write
    /// pipeline.
    pub fn create(id: Uuid, draft: PostDraft, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let (title, published_at) = validate(&draft)?;
        Ok(Self {
            id,
            title,
            slug: draft.slug,
            status: draft.status,
            published_at,
            hero_image: draft.hero_image,
            body: draft.body,
            author: draft.author,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the field values with `draft`, keeping identity and creation time.
    pub fn revise(&self, draft: PostDraft, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let (title, published_at) = validate(&draft)?;
        Ok(Self {
            id: self.id,
            title,
            slug: draft.slug,
            status: draft.status,
            published_at,
            hero_image: draft.hero_image,
            body: draft.body,
            author: draft.author,
            created_at: self.created_at,
            updated_at: now,
        })
    }
}

/// Checks the draft and returns the title and publish instant to store.
/// A blank `published_at` is stored as absent.
fn validate(draft: &PostDraft) -> Result<(String, Option<String>), DomainError> {
    let title = match draft.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => return Err(DomainError::Validation("title is required".to_string())),
    };

    let published_at = match draft.published_at.as_deref() {
        Some(raw) if raw.trim().is_empty() => None,
        Some(raw) if parse_instant(raw).is_none() => {
            return Err(DomainError::Validation(format!(
                "publishedAt `{raw}` is not a valid instant"
            )));
        }
        other => other.map(str::to_string),
    };

    Ok((title, published_at))
}

/// A document enriched with display-only fields. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(flatten)]
    pub document: PostDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at_jalali: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}
