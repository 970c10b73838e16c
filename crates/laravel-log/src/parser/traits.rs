pub use super::model::{LogEntry, ParseError};

pub trait LogParser: Send + Sync {
    /// Parse one complete raw entry, tagged with where it came from
    fn parse(
        &self,
        text: &str,
        file_identifier: &str,
        file_position: u64,
        index: usize,
    ) -> Result<LogEntry, ParseError>;
}
