//! Concurrent producers example
//!
//! A background producer floods the sink while the main thread keeps
//! submitting; shutdown still waits for every entry to be consumed.
//!
//! Run with: cargo run --example concurrent_producers

use rust_log_sink::prelude::*;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== Rust Log Sink - Concurrent Producers Example ===\n");

    let sink = Arc::new(LogSink::from_config(&SinkConfig {
        capacity: 16,
        ..SinkConfig::default()
    })?);

    let consumer = sink
        .receiver()
        .spawn(JsonLinesConsumer::new(std::io::stdout()))?;

    let big_logger = {
        let sink = Arc::clone(&sink);
        thread::spawn(move || {
            for i in 0..1000 {
                sink.submit(
                    LogLevel::Information,
                    &format!("Hello World {}", i),
                    "Service Manager Database Initialized",
                    "big-logger",
                );
            }
        })
    };

    for i in 0..10 {
        sink.submit(LogLevel::Debug, &i, "main thread entry", "main");
    }

    // Producers must finish before shutdown begins
    big_logger.join().unwrap_or_default();
    sink.shutdown();

    let handled = consumer.join().unwrap_or(0);
    eprintln!(
        "\n=== {} entries handled, {} producer waits on a full queue ===",
        handled,
        sink.metrics().block_events()
    );

    Ok(())
}
