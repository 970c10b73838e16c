/// Laravel log entry parsing
///
/// Turns one raw, possibly multi-line, log entry into a [`LogEntry`].
/// Splitting a file into entries happens upstream; this module only ever
/// sees a single entry together with its position in the source.
///
/// # Architecture
///
/// - `header.rs`: timestamp and `env.LEVEL:` marker extraction
/// - `timestamp.rs`: timestamp resolution against the default timezone
/// - `json.rs`: embedded JSON location and decoding
/// - `level.rs`: severity token normalization
/// - `laravel.rs`: the parser tying the stages together
/// - `model.rs`: output types and errors
/// - `traits.rs`: the `LogParser` seam

pub mod header;
pub mod json;
pub mod laravel;
pub mod level;
pub mod model;
pub mod timestamp;
pub mod traits;
mod serde_utils;

// Re-export commonly used types
pub use laravel::{parse, LaravelLogParser};
pub use level::{Level, LevelClass};
pub use model::{LogEntry, ParseError, ENVIRONMENT_KEY, LARAVEL_CONTEXT_KEY};
pub use timestamp::LogTimezone;
pub use traits::LogParser;
