//! Pipeline settings. Loading from the environment happens in `quill-infra`.

use std::fmt;
use std::str::FromStr;

/// How much of the publish instant the Jalali display string carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarPrecision {
    /// `YYYY/MM/DD`
    #[default]
    Date,
    /// `YYYY/MM/DD - HH:mm`
    DateTime,
}

impl FromStr for CalendarPrecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "datetime" | "date-time" | "date_time" => Ok(Self::DateTime),
            other => Err(format!("unknown calendar precision `{other}`")),
        }
    }
}

impl fmt::Display for CalendarPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => f.write_str("date"),
            Self::DateTime => f.write_str("datetime"),
        }
    }
}

/// Tehran, +03:30.
pub const DEFAULT_DISPLAY_OFFSET_MINUTES: i32 = 3 * 60 + 30;

/// Settings shared by the write pipeline and the display projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Keep Persian letters in slugs instead of stripping them.
    pub allow_persian_slugs: bool,
    /// Prefix of the front-end route, `path` becomes `{route_prefix}/{slug}`.
    pub route_prefix: String,
    pub calendar_precision: CalendarPrecision,
    /// UTC offset the Jalali rendering is shown in, in minutes east of UTC.
    pub display_offset_minutes: i32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            allow_persian_slugs: false,
            route_prefix: "/blog".to_string(),
            calendar_precision: CalendarPrecision::Date,
            display_offset_minutes: DEFAULT_DISPLAY_OFFSET_MINUTES,
        }
    }
}

/// Parse a `+HH:MM` / `-HH:MM` offset into minutes east of UTC.
pub fn parse_utc_offset(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Some(0);
    }

    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => (1, raw),
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }

    Some(sign * (hours * 60 + minutes))
}
