use super::instant::format_instant;
use super::{DraftTransform, WriteContext};
use crate::domain::{PostDraft, PostStatus};

/// Stamp `published_at` on a published draft that has none.
///
/// An existing value is never touched, whatever the status; moving back to
/// draft keeps the timestamp.
pub fn apply_publish_default(mut draft: PostDraft, ctx: &WriteContext) -> PostDraft {
    let missing = draft
        .published_at
        .as_deref()
        .is_none_or(|raw| raw.trim().is_empty());

    if draft.status == PostStatus::Published && missing {
        let stamp = format_instant(ctx.now());
        tracing::debug!(published_at = %stamp, "Defaulted publish date");
        draft.published_at = Some(stamp);
    }

    draft
}

/// Pipeline stage wrapping [`apply_publish_default`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishDefault;

impl DraftTransform for PublishDefault {
    fn name(&self) -> &'static str {
        "publish-default"
    }

    fn apply(&self, draft: PostDraft, ctx: &WriteContext) -> PostDraft {
        apply_publish_default(draft, ctx)
    }
}
