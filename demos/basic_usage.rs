//! Basic sink usage example
//!
//! Demonstrates console output, a queue consumer and the blocking shutdown.
//!
//! Run with: cargo run --example basic_usage

use colored::Color;
use rust_log_sink::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Log Sink - Basic Usage Example ===\n");

    let sink = LogSink::new().write_to_console();
    sink.set_console_colors(Color::Blue, Color::Green);

    // The consumer prints what it receives; each entry is acknowledged
    // once the closure returns.
    let consumer = sink.receiver().spawn(consumer_fn("printer", |entry| {
        println!(
            "Event Received | Event: {} | Message: {} | Actor: {} | MoreInfo: {}",
            entry.event_text(),
            entry.message,
            entry.actor,
            entry
                .metadata
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_default()
        );
        Ok(())
    }))?;

    sink.submit(
        LogLevel::Information,
        "Hello World 1",
        "Service Manager Database Initialized",
        "system",
    );

    sink.submit_with_metadata(
        LogLevel::Information,
        "Hello World 2",
        "Service Manager Network Initialized",
        "system",
        Metadata::new()
            .with_field("test", "test")
            .with_field("test2", "test2"),
    );

    sink.submit_with_format(
        LogLevel::Success,
        "Hello World 3",
        "Service Manager Network Initialized",
        "system",
        Some(Metadata::new().with_field("test", "test")),
        EntryFormat::lines_after(1),
    );

    sink.submit(
        LogLevel::Information,
        "Hello World 4",
        "Service Manager Database Initialized",
        "system",
    );

    println!("Waiting for log entries to be processed at end of program");
    sink.shutdown();

    let handled = consumer.join().unwrap_or(0);
    println!("\n=== {} entries drained, queue closed: {} ===", handled, sink.is_closed());

    Ok(())
}
