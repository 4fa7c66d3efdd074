//! Failure classification.
//!
//! Pure functions that turn a [`RawError`](crate::domain::RawError) into a
//! typed, severity-tagged [`ErrorRecord`](crate::domain::ErrorRecord), plus the
//! user-facing text derived from a record.
//!
//! # Modules
//!
//! - [`classifier`]: Heuristic kind/severity detection and record construction
//! - [`display`]: Notification text per error kind

pub mod classifier;
pub mod display;

pub use classifier::{
    classify, classify_backend_failure, classify_network_failure, create_app_error, ErrorOptions,
    BACKEND_ERROR_KEY, NETWORK_FAILURE_DETAILS, NETWORK_FAILURE_MESSAGE,
    UNKNOWN_BACKEND_ERROR_MESSAGE, UNKNOWN_ERROR_MESSAGE,
};
pub use display::display_message;
