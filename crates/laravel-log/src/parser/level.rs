use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Serializer};

/// Severity of a log entry.
///
/// Laravel writes the Monolog level name in upper case after the environment
/// tag (`local.DEBUG:`). The two queue-worker levels `PROCESSING` and
/// `PROCESSED` are not Monolog levels but show up in the same position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Processing,
    Processed,
    Info,
    Debug,
    /// No recognizable severity token
    #[default]
    None,
}

/// Display grouping of levels (badge colour in a viewer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelClass {
    Success,
    Info,
    Warning,
    Danger,
    None,
}

impl Level {
    pub const ALL: [Level; 10] = [
        Level::Emergency,
        Level::Alert,
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Processing,
        Level::Processed,
        Level::Info,
        Level::Debug,
        Level::None,
    ];

    /// Map a severity token to a level, ignoring case.
    /// Unknown and empty tokens map to `Level::None`.
    pub fn from_token(token: &str) -> Self {
        const TOKENS: [(&str, Level); 9] = [
            ("emergency", Level::Emergency),
            ("alert", Level::Alert),
            ("critical", Level::Critical),
            ("error", Level::Error),
            ("warning", Level::Warning),
            ("processing", Level::Processing),
            ("processed", Level::Processed),
            ("info", Level::Info),
            ("debug", Level::Debug),
        ];

        TOKENS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map(|(_, level)| *level)
            .unwrap_or(Level::None)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Level::Emergency => "Emergency",
            Level::Alert => "Alert",
            Level::Critical => "Critical",
            Level::Error => "Error",
            Level::Warning => "Warning",
            Level::Processing => "Processing",
            Level::Processed => "Processed",
            Level::Info => "Info",
            Level::Debug => "Debug",
            Level::None => "None",
        }
    }

    pub fn class(&self) -> LevelClass {
        match self {
            Level::Processed => LevelClass::Success,
            Level::Debug | Level::Info | Level::Processing => LevelClass::Info,
            Level::Warning => LevelClass::Warning,
            Level::Error | Level::Critical | Level::Alert | Level::Emergency => LevelClass::Danger,
            Level::None => LevelClass::None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Level::from_token(s))
    }
}

impl Serialize for Level {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_upper_case() {
        assert_eq!(Level::from_token("INFO"), Level::Info);
        assert_eq!(Level::from_token("DEBUG"), Level::Debug);
        assert_eq!(Level::from_token("ERROR"), Level::Error);
        assert_eq!(Level::from_token("WARNING"), Level::Warning);
        assert_eq!(Level::from_token("CRITICAL"), Level::Critical);
        assert_eq!(Level::from_token("ALERT"), Level::Alert);
        assert_eq!(Level::from_token("EMERGENCY"), Level::Emergency);
        assert_eq!(Level::from_token("PROCESSING"), Level::Processing);
        assert_eq!(Level::from_token("PROCESSED"), Level::Processed);
    }

    #[test]
    fn test_from_token_ignores_case() {
        assert_eq!(Level::from_token("info"), Level::Info);
        assert_eq!(Level::from_token("iNfO"), Level::Info);
        assert_eq!(Level::from_token("Processed"), Level::Processed);
    }

    #[test]
    fn test_from_token_unknown() {
        assert_eq!(Level::from_token(""), Level::None);
        assert_eq!(Level::from_token("NOTICE"), Level::None);
        assert_eq!(Level::from_token("INFO "), Level::None);
    }

    #[test]
    fn test_names_round_trip_through_from_token() {
        for level in Level::ALL {
            if level == Level::None {
                continue;
            }
            assert_eq!(Level::from_token(level.name()), level);
        }
        assert_eq!("warning".parse::<Level>(), Ok(Level::Warning));
    }

    #[test]
    fn test_level_classes() {
        assert_eq!(Level::Processed.class(), LevelClass::Success);
        assert_eq!(Level::Processing.class(), LevelClass::Info);
        assert_eq!(Level::Debug.class(), LevelClass::Info);
        assert_eq!(Level::Warning.class(), LevelClass::Warning);
        assert_eq!(Level::Emergency.class(), LevelClass::Danger);
        assert_eq!(Level::None.class(), LevelClass::None);
    }

    #[test]
    fn test_serializes_as_name() {
        assert_eq!(serde_json::to_string(&Level::Critical).unwrap(), "\"Critical\"");
        assert_eq!(serde_json::to_string(&LevelClass::Danger).unwrap(), "\"danger\"");
    }
}
