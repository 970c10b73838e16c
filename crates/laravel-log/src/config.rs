use std::fs::File;
use std::io::Read;
use std::path::Path;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Env var naming the TOML config file
pub const CONFIG_FILE_ENV: &str = "LARAVEL_LOG_CONFIG_FILE";
/// Env var overriding the default timezone
pub const TIMEZONE_ENV: &str = "LARAVEL_LOG_TIMEZONE";

const DEFAULT_CONFIG_FILE: &str = "laravel-log.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// IANA timezone used for timestamps that carry no offset.
    /// Unset means UTC.
    pub timezone: Option<String>,
}

impl ParserConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var(CONFIG_FILE_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using environment variables", config_path);
            Self::default()
        };

        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (normally the process environment)
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(timezone) = lookup(TIMEZONE_ENV) {
            self.timezone = Some(timezone);
        }
        self
    }

    /// Check that the configured timezone is a known IANA name
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve_timezone().map(|_| ())
    }

    /// Timezone to use for offset-less timestamps. Empty strings count as unset.
    pub fn resolve_timezone(&self) -> Result<Option<Tz>, ConfigError> {
        match self.timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => name
                .parse::<Tz>()
                .map(Some)
                .map_err(|_| ConfigError::UnknownTimezone(name.to_string())),
        }
    }
}
