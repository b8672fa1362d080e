use chrono::FixedOffset;

use super::instant::parse_instant;
use crate::calendar::JalaliDate;
use crate::config::{CalendarPrecision, PipelineConfig};
use crate::domain::{PostDocument, PostView};

/// Read-time projection: attaches `publishedAtJalali` and `path`.
///
/// Pure and deterministic. Any failure to derive the calendar string just
/// leaves it out.
#[derive(Debug, Clone)]
pub struct DisplayProjector {
    route_prefix: String,
    precision: CalendarPrecision,
    offset_minutes: i32,
}

impl DisplayProjector {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            route_prefix: config.route_prefix.trim_end_matches('/').to_string(),
            precision: config.calendar_precision,
            offset_minutes: config.display_offset_minutes,
        }
    }

    pub fn project(&self, doc: &PostDocument) -> PostView {
        PostView {
            document: doc.clone(),
            published_at_jalali: doc
                .published_at
                .as_deref()
                .and_then(|raw| self.jalali_label(raw)),
            path: doc
                .slug
                .as_deref()
                .filter(|slug| !slug.is_empty())
                .map(|slug| self.path_for(slug)),
        }
    }

    pub fn path_for(&self, slug: &str) -> String {
        format!("{}/{}", self.route_prefix, slug)
    }

    /// Jalali rendering of an ISO-8601 instant in the display offset.
    pub fn jalali_label(&self, raw: &str) -> Option<String> {
        let Some(at) = parse_instant(raw) else {
            tracing::debug!(published_at = %raw, "Skipping Jalali projection: unparsable instant");
            return None;
        };

        let Some(offset) = self
            .offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
        else {
            tracing::debug!(
                offset_minutes = self.offset_minutes,
                "Skipping Jalali projection: invalid display offset"
            );
            return None;
        };

        let local = at.with_timezone(&offset);
        let Some(date) = JalaliDate::from_gregorian(local.date_naive()) else {
            tracing::debug!(published_at = %raw, "Skipping Jalali projection: outside calendar range");
            return None;
        };

        Some(match self.precision {
            CalendarPrecision::Date => date.to_string(),
            CalendarPrecision::DateTime => format!("{date} - {}", local.format("%H:%M")),
        })
    }
}

impl Default for DisplayProjector {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}
