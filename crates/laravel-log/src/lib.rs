// Laravel log entry parser.

pub mod config;
pub mod parser;

pub use config::{ConfigError, ParserConfig};
pub use parser::{parse, LaravelLogParser, Level, LevelClass, LogEntry, LogParser, LogTimezone, ParseError};
