use chrono_tz::Tz;
use serde_json::{Map, Value};

use super::header::split_header;
use super::json::extract_json;
use super::level::Level;
use super::model::{LogEntry, ParseError, ENVIRONMENT_KEY, LARAVEL_CONTEXT_KEY};
use super::traits::LogParser;
use crate::config::{ConfigError, ParserConfig};

/// Parser for entries written by Laravel's default Monolog line formatter:
///
/// ```text
/// [2022-08-25 11:16:17.125000+02:00] production.ERROR: Message {"json":"context"}
/// ```
///
/// Holds nothing but the default timezone, so a single instance can be
/// shared freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaravelLogParser {
    default_timezone: Option<Tz>,
}

impl LaravelLogParser {
    pub fn new(default_timezone: Option<Tz>) -> Self {
        Self { default_timezone }
    }

    pub fn from_config(config: &ParserConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.resolve_timezone()?))
    }

    pub fn default_timezone(&self) -> Option<Tz> {
        self.default_timezone
    }

    /// Parse one complete entry.
    ///
    /// Text without a leading timestamp is kept whole as the body. The only
    /// error is a timestamp that has the right shape but is not a real
    /// instant, e.g. `[2022-02-30 10:00:00]`.
    pub fn parse(
        &self,
        text: &str,
        file_identifier: &str,
        file_position: u64,
        index: usize,
    ) -> Result<LogEntry, ParseError> {
        let Some(header) = split_header(text) else {
            tracing::debug!(file_identifier, file_position, "No Laravel header found, keeping raw text");
            return Ok(LogEntry {
                index,
                file_identifier: file_identifier.to_string(),
                file_position,
                level: Level::None,
                datetime: None,
                timezone: None,
                context: Map::new(),
                message: first_line(text),
                original_text: text.to_string(),
            });
        };

        let (datetime, timezone) = header
            .timestamp
            .resolve(self.default_timezone)
            .inspect_err(|e| tracing::warn!(file_identifier, file_position, "{}", e))?;

        let mut context = Map::new();
        let level = match header.marker {
            Some(marker) => {
                context.insert(ENVIRONMENT_KEY.to_string(), Value::String(marker.environment.to_string()));
                Level::from_token(marker.token)
            }
            None => Level::None,
        };

        let original_text = match extract_json(&header.body) {
            Some(json) => {
                let text = json.strip_from(&header.body);
                context.insert(LARAVEL_CONTEXT_KEY.to_string(), json.value);
                text
            }
            None => header.body.into_owned(),
        };

        Ok(LogEntry {
            index,
            file_identifier: file_identifier.to_string(),
            file_position,
            level,
            datetime: Some(datetime),
            timezone: Some(timezone),
            context,
            message: first_line(&original_text),
            original_text,
        })
    }
}

impl LogParser for LaravelLogParser {
    fn parse(
        &self,
        text: &str,
        file_identifier: &str,
        file_position: u64,
        index: usize,
    ) -> Result<LogEntry, ParseError> {
        LaravelLogParser::parse(self, text, file_identifier, file_position, index)
    }
}

/// Parse `text` with an explicit default timezone.
pub fn parse(
    text: &str,
    file_identifier: &str,
    file_position: u64,
    index: usize,
    default_timezone: Option<Tz>,
) -> Result<LogEntry, ParseError> {
    LaravelLogParser::new(default_timezone).parse(text, file_identifier, file_position, index)
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or("").trim().to_string()
}
