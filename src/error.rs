//! Error handling for Torque Wizard
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application.

use thiserror::Error;

/// Main error type for Torque Wizard operations
#[derive(Error, Debug)]
pub enum TorqueError {
    /// Errors raised by the serial port layer
    #[error("Serial error: {0}")]
    Serial(#[from] serialport::Error),

    /// Errors related to CSV import/export
    #[error("CSV error: {0}")]
    Csv(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// Attempted an operation that requires an open port
    #[error("Not connected")]
    NotConnected,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<TorqueError>,
    },
}

impl TorqueError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        TorqueError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for Torque Wizard operations
pub type Result<T> = std::result::Result<T, TorqueError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    TorqueError: From<E>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| TorqueError::from(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| TorqueError::from(e).with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TorqueError::Csv("row has fewer than two columns".to_string());
        assert_eq!(err.to_string(), "CSV error: row has fewer than two columns");
    }

    #[test]
    fn test_error_with_context() {
        let err = TorqueError::Config("missing data dir".to_string());
        let with_ctx = err.with_context("Failed to load app state");
        assert!(with_ctx.to_string().contains("Failed to load app state"));
    }

    #[test]
    fn test_not_connected_display() {
        assert_eq!(TorqueError::NotConnected.to_string(), "Not connected");
    }
}
