//! Output implementations: the console writer and a ready-made consumer

pub mod console;
pub mod json;

pub use console::{ColorToken, ConsoleSettings, ConsoleWriter, CONSOLE_TIMESTAMP_FORMAT};
pub use json::JsonLinesConsumer;
