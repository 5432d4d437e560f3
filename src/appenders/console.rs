//! Console writer implementation

use crate::core::{LogEntry, Result, SinkError};
use colored::{Color, Colorize};
use parking_lot::{Mutex, RwLock};
use std::io::{self, Write};

/// Timestamp layout used on the console, second precision in local time
pub const CONSOLE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A color for console labels or values
///
/// The plain token applies no styling at all. Unrecognised color names
/// parse to the plain token instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorToken(Option<Color>);

impl ColorToken {
    pub const PLAIN: ColorToken = ColorToken(None);
    pub const GRAY: ColorToken = ColorToken(Some(Color::White));

    pub const fn new(color: Color) -> Self {
        Self(Some(color))
    }

    /// Parse a color name such as `"blue"`, `"bright black"` or `"gray"`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "" | "reset" | "none" | "plain" => Self::PLAIN,
            "gray" | "grey" => Self::GRAY,
            other => Self(other.parse::<Color>().ok()),
        }
    }

    pub fn color(&self) -> Option<Color> {
        self.0
    }

    pub fn is_plain(&self) -> bool {
        self.0.is_none()
    }

    fn paint(&self, text: &str) -> String {
        match self.0 {
            Some(color) => text.color(color).to_string(),
            None => text.to_string(),
        }
    }
}

impl From<Color> for ColorToken {
    fn from(color: Color) -> Self {
        Self::new(color)
    }
}

impl From<&str> for ColorToken {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

/// Key and value colors shared by every render
///
/// Each field is read at render time and may be replaced at any time from
/// any thread. Updates are last-write-wins per field; a render racing an
/// update may mix old and new colors.
#[derive(Debug)]
pub struct ConsoleSettings {
    key_color: RwLock<ColorToken>,
    value_color: RwLock<ColorToken>,
}

impl ConsoleSettings {
    pub fn new(key_color: impl Into<ColorToken>, value_color: impl Into<ColorToken>) -> Self {
        Self {
            key_color: RwLock::new(key_color.into()),
            value_color: RwLock::new(value_color.into()),
        }
    }

    pub fn key_color(&self) -> ColorToken {
        *self.key_color.read()
    }

    pub fn value_color(&self) -> ColorToken {
        *self.value_color.read()
    }

    pub fn set_key_color(&self, token: impl Into<ColorToken>) {
        *self.key_color.write() = token.into();
    }

    pub fn set_value_color(&self, token: impl Into<ColorToken>) {
        *self.value_color.write() = token.into();
    }

    pub fn set_colors(&self, key_color: impl Into<ColorToken>, value_color: impl Into<ColorToken>) {
        self.set_key_color(key_color);
        self.set_value_color(value_color);
    }
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self::new(ColorToken::PLAIN, ColorToken::GRAY)
    }
}

/// Synchronous, best-effort renderer of entries to a text stream
pub struct ConsoleWriter {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleWriter {
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Build the console text for an entry
    ///
    /// `YYYY-MM-DD HH:MM:SS  <Level>\tEvent:"..." Message:"..." Actor:"..." [More Info:"..."] `
    /// followed by `1 + lines_after` newlines. The "More Info" segment is
    /// present whenever metadata is present, even if it is empty.
    pub fn format(entry: &LogEntry, settings: &ConsoleSettings) -> String {
        let key_color = settings.key_color();
        let value_color = settings.value_color();

        let mut line = format!(
            "{}  {}\t",
            entry.time.format(CONSOLE_TIMESTAMP_FORMAT),
            entry.level
        );

        let mut push_pair = |label: &str, value: &str| {
            line.push_str(&key_color.paint(label));
            line.push_str(&value_color.paint(&format!("\"{}\" ", value)));
        };

        push_pair("Event:", &entry.event_text());
        push_pair("Message:", &entry.message);
        push_pair("Actor:", &entry.actor);
        if let Some(ref metadata) = entry.metadata {
            push_pair("More Info:", &metadata.format_fields());
        }

        for _ in 0..=entry.format.lines_after {
            line.push('\n');
        }

        line
    }

    /// Render an entry with the colors in effect right now
    pub fn render(&self, entry: &LogEntry, settings: &ConsoleSettings) -> Result<()> {
        let text = Self::format(entry, settings);

        // One write per entry keeps concurrent renders from interleaving
        let mut writer = self.writer.lock();
        writer
            .write_all(text.as_bytes())
            .map_err(|e| SinkError::io_operation("rendering log entry", "console write failed", e))?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::stdout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntryFormat, LogLevel, Metadata};
    use chrono::{Local, TimeZone};
    use std::sync::Arc;

    fn plain_settings() -> ConsoleSettings {
        ConsoleSettings::new(ColorToken::PLAIN, ColorToken::PLAIN)
    }

    fn fixed_entry() -> LogEntry {
        let mut entry = LogEntry::new(
            LogLevel::Information,
            "Hello World 1",
            "Database Initialized",
            "system",
        );
        entry.time = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        entry
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_format_without_metadata() {
        let text = ConsoleWriter::format(&fixed_entry(), &plain_settings());
        assert_eq!(
            text,
            "2024-03-09 14:05:07  Information\tEvent:\"Hello World 1\" \
             Message:\"Database Initialized\" Actor:\"system\" \n"
        );
    }

    #[test]
    fn test_format_empty_metadata_still_rendered() {
        let entry = fixed_entry().with_metadata(Metadata::new());
        let text = ConsoleWriter::format(&entry, &plain_settings());
        assert!(text.ends_with("Actor:\"system\" More Info:\"\" \n"));
    }

    #[test]
    fn test_format_metadata_and_trailing_lines() {
        let metadata = Metadata::new()
            .with_field("test", "test")
            .with_field("test2", "test2");
        let entry = fixed_entry()
            .with_metadata(metadata)
            .with_format(EntryFormat::lines_after(2));
        let text = ConsoleWriter::format(&entry, &plain_settings());
        assert!(text.contains("More Info:\"test=test test2=test2\" "));
        assert!(text.ends_with("\" \n\n\n"));
    }

    #[test]
    fn test_colored_pairs_emit_ansi_sequences() {
        colored::control::set_override(true);
        let settings = ConsoleSettings::new("blue", "green");
        let text = ConsoleWriter::format(&fixed_entry(), &settings);

        assert!(text.contains("\u{1b}[34mEvent:\u{1b}[0m"));
        assert!(text.contains("\u{1b}[32m\"Hello World 1\" \u{1b}[0m"));
        assert!(text.starts_with("2024-03-09 14:05:07  Information\t"));

        let plain = ConsoleWriter::format(&fixed_entry(), &plain_settings());
        assert!(!plain.contains('\u{1b}'));
    }

    #[test]
    fn test_color_token_parsing() {
        assert_eq!(ColorToken::parse("blue"), ColorToken::new(Color::Blue));
        assert_eq!(ColorToken::parse("Bright Black"), ColorToken::new(Color::BrightBlack));
        assert_eq!(ColorToken::parse("gray"), ColorToken::GRAY);
        assert!(ColorToken::parse("reset").is_plain());
        assert!(ColorToken::parse("not-a-color").is_plain());
    }

    #[test]
    fn test_settings_update_per_field() {
        let settings = ConsoleSettings::default();
        assert!(settings.key_color().is_plain());
        assert_eq!(settings.value_color(), ColorToken::GRAY);

        settings.set_key_color(Color::Blue);
        assert_eq!(settings.key_color(), ColorToken::new(Color::Blue));
        assert_eq!(settings.value_color(), ColorToken::GRAY);

        settings.set_colors("green", "red");
        assert_eq!(settings.value_color(), ColorToken::new(Color::Red));
    }

    #[test]
    fn test_render_writes_whole_entry() {
        let buffer = SharedBuffer::default();
        let writer = ConsoleWriter::with_writer(Box::new(buffer.clone()));

        writer.render(&fixed_entry(), &plain_settings()).unwrap();
        writer.render(&fixed_entry(), &plain_settings()).unwrap();

        let output = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert!(output.starts_with("2024-03-09 14:05:07  Information\t"));
    }

    #[test]
    fn test_render_failure_is_reported() {
        let writer = ConsoleWriter::with_writer(Box::new(BrokenPipe));
        let err = writer.render(&fixed_entry(), &plain_settings()).err().unwrap();
        assert!(matches!(err, SinkError::IoOperation { .. }));
    }
}
