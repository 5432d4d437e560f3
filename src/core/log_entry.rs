//! Log entry structure

use super::error::Result;
use super::log_level::LogLevel;
use super::metadata::{display_value, to_payload, Metadata};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display hints for console rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFormat {
    /// Blank lines emitted after the rendered line
    pub lines_after: usize,
}

impl EntryFormat {
    pub const fn lines_after(lines_after: usize) -> Self {
        Self { lines_after }
    }
}

/// One structured log record
///
/// Entries are built by the sink at submission time and are not mutated
/// afterwards; the queue path hands ownership to the consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: DateTime<Local>,
    pub level: LogLevel,
    pub event: Value,
    pub message: String,
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub format: EntryFormat,
}

impl LogEntry {
    pub fn new<E>(
        level: LogLevel,
        event: &E,
        message: impl Into<String>,
        actor: impl Into<String>,
    ) -> Self
    where
        E: Serialize + ?Sized,
    {
        Self {
            time: Local::now(),
            level,
            event: to_payload(event),
            message: message.into(),
            actor: actor.into(),
            metadata: None,
            format: EntryFormat::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_format(mut self, format: EntryFormat) -> Self {
        self.format = format;
        self
    }

    /// Event payload as display text
    pub fn event_text(&self) -> String {
        display_value(&self.event)
    }

    /// Encode the entry as a single JSON line
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
