//! Declarative sink configuration
//!
//! `SinkConfig` can be deserialized from any serde format the host
//! application already uses; missing fields take the defaults below.

use super::dispatch::DEFAULT_QUEUE_CAPACITY;
use super::error::{Result, SinkError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Capacity of the dispatch queue
    pub capacity: usize,
    /// Render entries to stdout
    pub write_to_console: bool,
    /// Hand entries to the dispatch queue
    pub write_to_queue: bool,
    /// Color name for labels ("reset" for none)
    pub key_color: String,
    /// Color name for values
    pub value_color: String,
}

impl SinkConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(SinkError::config("SinkConfig", "capacity must be at least 1"));
        }
        Ok(())
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_QUEUE_CAPACITY,
            write_to_console: false,
            write_to_queue: true,
            key_color: "reset".to_string(),
            value_color: "gray".to_string(),
        }
    }
}
