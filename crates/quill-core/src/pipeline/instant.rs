//! ISO-8601 helpers shared by the write and read stages.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Parse an RFC 3339 instant, or a bare `YYYY-MM-DD` date taken as UTC midnight.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `2025-10-18T08:00:00.000Z`
pub fn format_instant(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
