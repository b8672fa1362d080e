//! Write and read stages applied around storage.
//!
//! Writes run an explicit, ordered list of `PostDraft -> PostDraft`
//! transforms. The standard order is slug normalization followed by the
//! publish-date default. Reads go through [`DisplayProjector`], which builds a
//! [`PostView`](crate::domain::PostView) without touching the stored document.

mod display;
pub mod instant;
mod publish;
mod slug;

use chrono::{DateTime, Utc};

use crate::config::PipelineConfig;
use crate::domain::PostDraft;
use crate::ports::Clock;

pub use display::DisplayProjector;
pub use publish::{PublishDefault, apply_publish_default};
pub use slug::SlugNormalizer;

/// Per-write state shared by every stage.
///
/// The clock is read once, when the context is captured, so every stage and
/// every repeated call within the same write sees the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteContext {
    now: DateTime<Utc>,
}

impl WriteContext {
    pub fn capture(clock: &dyn Clock) -> Self {
        Self { now: clock.now() }
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// One stage of the write pipeline.
pub trait DraftTransform: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, draft: PostDraft, ctx: &WriteContext) -> PostDraft;
}

/// Ordered write stages.
#[derive(Default)]
pub struct WritePipeline {
    stages: Vec<Box<dyn DraftTransform>>,
}

impl WritePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug first, then the publish-date default.
    pub fn standard(config: &PipelineConfig) -> Self {
        Self::new()
            .with_stage(SlugNormalizer::from_config(config))
            .with_stage(PublishDefault)
    }

    pub fn with_stage(mut self, stage: impl DraftTransform + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub fn run(&self, draft: PostDraft, ctx: &WriteContext) -> PostDraft {
        self.stages
            .iter()
            .fold(draft, |draft, stage| stage.apply(draft, ctx))
    }
}
