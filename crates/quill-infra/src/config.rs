//! Application configuration loaded from environment variables.

use std::env;

use quill_core::config::{CalendarPrecision, PipelineConfig, parse_utc_offset};

use crate::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: Option<DatabaseConfig>,
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Load configuration from environment variables, reading `.env` first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Unset keys take their defaults. Values that do not parse are logged
    /// and also fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", str::parse).unwrap_or(100),
                min_connections: parsed(&lookup, "DB_MIN_CONNECTIONS", str::parse).unwrap_or(10),
            });

        let defaults = PipelineConfig::default();
        let pipeline = PipelineConfig {
            allow_persian_slugs: parsed(&lookup, "SLUG_ALLOW_PERSIAN", parse_flag)
                .unwrap_or(defaults.allow_persian_slugs),
            route_prefix: lookup("BLOG_ROUTE_PREFIX")
                .map(|prefix| prefix.trim().to_string())
                .filter(|prefix| !prefix.is_empty())
                .unwrap_or(defaults.route_prefix),
            calendar_precision: parsed(&lookup, "JALALI_PRECISION", str::parse::<CalendarPrecision>)
                .unwrap_or(defaults.calendar_precision),
            display_offset_minutes: parsed(&lookup, "DISPLAY_UTC_OFFSET", |raw| {
                parse_utc_offset(raw).ok_or(())
            })
            .unwrap_or(defaults.display_offset_minutes),
        };

        Self { database, pipeline }
    }
}

fn parsed<T, E>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Result<T, E>,
) -> Option<T> {
    let raw = lookup(key)?;
    match parse(raw.trim()) {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring invalid configuration value");
            None
        }
    }
}

fn parse_flag(raw: &str) -> Result<bool, ()> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(()),
    }
}
