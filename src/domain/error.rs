//! Error types for the application shell.
//!
//! This module defines the centralized error type [`ShellError`] and a type alias
//! [`Result`] used throughout the crate. These are the errors the shell itself
//! raises; the failures it *observes* are described by
//! [`ErrorRecord`](crate::domain::ErrorRecord) instead.

use thiserror::Error;

/// The main error type for application shell operations.
///
/// Classification and logging never fail for malformed input, with the single
/// exception of [`ShellError::EmptyMessage`]. That variant signals a programmer
/// error and is expected to surface immediately during development.
#[derive(Debug, Error)]
pub enum ShellError {
    /// An error record was constructed with an empty or whitespace-only message.
    ///
    /// Callers must supply a fallback message when the failure they observed
    /// carries no text.
    #[error("Error message cannot be empty")]
    EmptyMessage,

    /// A connection probe failed.
    ///
    /// Raised by [`ConnectionMonitor::check`](crate::store::ConnectionMonitor::check)
    /// after the failure was recorded in the connection state and reported.
    /// `record_id` is the id of the reported record, when reporting succeeded.
    #[error("Connection check failed: {message}")]
    ConnectionCheck {
        /// Message extracted from the probe failure.
        message: String,
        /// Id of the error record created for this failure.
        record_id: Option<String>,
    },

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for application shell operations.
pub type Result<T> = std::result::Result<T, ShellError>;
