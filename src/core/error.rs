//! Error types for the log sink
//!
//! Submission and console rendering never surface errors to the caller.
//! These variants cover the edges: writer I/O, JSON encoding, receiving
//! from the dispatch queue, thread spawning and configuration.

pub type Result<T> = std::result::Result<T, SinkError>;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The dispatch queue was closed and fully drained
    #[error("Dispatch queue closed")]
    QueueClosed,

    /// No entry arrived within the receive timeout
    #[error("Timed out waiting for a log entry")]
    ReceiveTimeout,

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A consumer rejected an entry
    #[error("Consumer '{consumer}' failed: {message}")]
    ConsumerFailed { consumer: String, message: String },
}

impl SinkError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        SinkError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        SinkError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a consumer failure
    pub fn consumer(consumer: impl Into<String>, message: impl Into<String>) -> Self {
        SinkError::ConsumerFailed {
            consumer: consumer.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SinkError::config("DispatchQueue", "capacity must be at least 1");
        assert!(matches!(err, SinkError::InvalidConfiguration { .. }));

        let err = SinkError::consumer("json", "disk full");
        assert!(matches!(err, SinkError::ConsumerFailed { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = SinkError::config("DispatchQueue", "capacity must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for DispatchQueue: capacity must be at least 1"
        );

        let err = SinkError::consumer("json", "disk full");
        assert_eq!(err.to_string(), "Consumer 'json' failed: disk full");

        assert_eq!(SinkError::QueueClosed.to_string(), "Dispatch queue closed");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = SinkError::io_operation("rendering entry", "console write failed", io_err);

        assert!(matches!(err, SinkError::IoOperation { .. }));
        assert!(err.to_string().contains("rendering entry"));
        assert!(err.to_string().contains("console write failed"));
    }
}
