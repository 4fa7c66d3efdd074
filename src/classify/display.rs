//! User-facing text for error records.

use crate::domain::{ErrorKind, ErrorRecord};

/// Generic, kind-appropriate text shown in notifications by default.
///
/// Kinds without a canned message (client, unknown) fall back to the record's
/// own message.
#[must_use]
pub fn display_message(record: &ErrorRecord) -> &str {
    match record.kind() {
        ErrorKind::Network => {
            "Connection problem. Please check your internet connection and try again."
        }
        ErrorKind::Authentication => "Authentication failed. Please log in again.",
        ErrorKind::Authorization => "You don't have permission to perform this action.",
        ErrorKind::Validation => "Please check your input and try again.",
        ErrorKind::Server => "Server error. Please try again later.",
        ErrorKind::Client | ErrorKind::Unknown => record.message(),
    }
}
