use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::model::LogEntry;

/// Flat view for display/search collaborators. The timezone goes out as its
/// name and the level class is added next to the level.
impl Serialize for LogEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut entry = serializer.serialize_struct("LogEntry", 10)?;
        entry.serialize_field("index", &self.index)?;
        entry.serialize_field("file_identifier", &self.file_identifier)?;
        entry.serialize_field("file_position", &self.file_position)?;
        entry.serialize_field("level", &self.level)?;
        entry.serialize_field("level_class", &self.level.class())?;
        entry.serialize_field("datetime", &self.datetime)?;
        entry.serialize_field("timezone", &self.timezone_name())?;
        entry.serialize_field("context", &self.context)?;
        entry.serialize_field("message", &self.message)?;
        entry.serialize_field("original_text", &self.original_text)?;
        entry.end()
    }
}
