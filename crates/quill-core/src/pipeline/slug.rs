use unicode_normalization::UnicodeNormalization;

use super::{DraftTransform, WriteContext};
use crate::config::PipelineConfig;
use crate::domain::PostDraft;

/// Derives a URL-safe slug from an explicit slug or, failing that, the title.
///
/// Output holds only `a-z`, `0-9`, `_`, single hyphens between words and,
/// when enabled, Persian letters. Normalizing an already normalized slug
/// returns it unchanged. Uniqueness is left to storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugNormalizer {
    allow_persian: bool,
}

impl SlugNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variant that keeps Persian letters.
    pub fn with_persian() -> Self {
        Self {
            allow_persian: true,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            allow_persian: config.allow_persian_slugs,
        }
    }

    pub fn normalize(&self, input: &str) -> String {
        // Compatibility decomposition can reintroduce capitals (e.g. U+210C), so
        // lowercase again once it is done.
        let decomposed = input.to_lowercase().nfkd().collect::<String>().to_lowercase();
        let kept: String = decomposed.chars().filter(|&c| self.keeps(c)).collect();

        let joined = kept.split_whitespace().collect::<Vec<_>>().join("-");
        let mut slug = String::with_capacity(joined.len());
        for c in joined.chars() {
            if c == '-' && slug.ends_with('-') {
                continue;
            }
            slug.push(c);
        }

        slug.trim_matches('-').to_string()
    }

    fn keeps(&self, c: char) -> bool {
        c.is_ascii_lowercase()
            || c.is_ascii_digit()
            || c == '_'
            || c == '-'
            || c.is_whitespace()
            || (self.allow_persian && is_persian_letter(c))
    }
}

fn is_persian_letter(c: char) -> bool {
    matches!(
        c,
        '\u{0621}'..='\u{063A}'
            | '\u{0641}'..='\u{064A}'
            | '\u{067E}'
            | '\u{0686}'
            | '\u{0698}'
            | '\u{06A9}'
            | '\u{06AF}'
            | '\u{06CC}'
    )
}

impl DraftTransform for SlugNormalizer {
    fn name(&self) -> &'static str {
        "slug"
    }

    fn apply(&self, mut draft: PostDraft, _ctx: &WriteContext) -> PostDraft {
        let source = draft
            .slug
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| draft.title.as_deref().filter(|t| !t.is_empty()));

        let Some(source) = source else {
            return draft;
        };

        let slug = self.normalize(source);
        if slug.is_empty() {
            tracing::debug!(source = %source, "Slug source reduced to nothing");
        } else {
            tracing::debug!(slug = %slug, "Derived slug");
        }

        draft.slug = Some(slug);
        draft
    }
}
