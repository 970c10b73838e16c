use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use thiserror::Error;

use super::level::Level;
use super::timestamp::LogTimezone;

/// Context key holding the environment tag of the header (`local`, `production`)
pub const ENVIRONMENT_KEY: &str = "environment";

/// Context key holding the JSON value extracted from the body
pub const LARAVEL_CONTEXT_KEY: &str = "laravel_context";

#[derive(Debug, Error)]
pub enum ParseError {
    /// The header timestamp has the right shape but names no real instant
    #[error("Invalid timestamp {timestamp}: {reason}")]
    InvalidTimestamp { timestamp: String, reason: String },
}

/// One parsed log entry.
///
/// Built once by [`super::LaravelLogParser`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub(crate) index: usize,
    pub(crate) file_identifier: String,
    pub(crate) file_position: u64,
    pub(crate) level: Level,
    pub(crate) datetime: Option<DateTime<FixedOffset>>,
    pub(crate) timezone: Option<LogTimezone>,
    pub(crate) context: Map<String, Value>,
    pub(crate) message: String,
    pub(crate) original_text: String,
}

impl LogEntry {
    /// Ordinal of the entry within its source, as given by the caller
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn file_identifier(&self) -> &str {
        &self.file_identifier
    }

    /// Offset of the entry within its source, as given by the caller
    pub fn file_position(&self) -> u64 {
        self.file_position
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Timestamp of the header, `None` when the entry had no header
    pub fn datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.datetime
    }

    pub fn timezone(&self) -> Option<LogTimezone> {
        self.timezone
    }

    /// `+02:00` for explicit offsets, the zone name otherwise
    pub fn timezone_name(&self) -> Option<String> {
        self.timezone.map(|tz| tz.name())
    }

    pub fn context(&self) -> &Map<String, Value> {
        &self.context
    }

    pub fn environment(&self) -> Option<&str> {
        self.context.get(ENVIRONMENT_KEY).and_then(Value::as_str)
    }

    pub fn laravel_context(&self) -> Option<&Value> {
        self.context.get(LARAVEL_CONTEXT_KEY)
    }

    /// First line of the body, trimmed
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Body without the header and without the extracted JSON
    pub fn original_text(&self) -> &str {
        &self.original_text
    }
}
