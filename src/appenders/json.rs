//! JSON lines consumer for shipping entries off the dispatch queue

use crate::core::{Consumer, LogEntry, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes each dequeued entry as a single-line JSON object (JSONL format)
pub struct JsonLinesConsumer<W: Write + Send> {
    writer: W,
    pretty: bool,
}

impl JsonLinesConsumer<BufWriter<File>> {
    /// Append to the file at `path`, creating it if needed
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonLinesConsumer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Write each entry as indented JSON spanning several lines
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Consumer for JsonLinesConsumer<W> {
    fn consume(&mut self, entry: &LogEntry) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(entry)?
        } else {
            entry.to_json()?
        };

        writeln!(self.writer, "{}", json)?;
        // Flushed per entry: the entry counts as handled once it is acknowledged
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}
