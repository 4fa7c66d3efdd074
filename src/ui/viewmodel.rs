//! Display-ready view models.
//!
//! View models are computed from [`AppState`](crate::app::AppState) and carry
//! no logic; the components only format them.

use crate::classify::display_message;
use crate::domain::{ConnectionState, ConnectionStatus, ErrorRecord, Severity};

/// Hint shown under the status line while the backend is unreachable.
pub const DISCONNECTED_HINT: &str =
    "Make sure the backend URL and API key are set in your configuration.";

/// Everything the renderer draws in one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellViewModel {
    pub notifications: NotificationsViewModel,
    pub status: StatusViewModel,
}

/// The visible notification stack, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationsViewModel {
    pub alerts: Vec<AlertItem>,
    /// Records that pass the filter but did not fit in the stack.
    pub hidden_count: usize,
}

impl NotificationsViewModel {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// One rendered alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertItem {
    /// Id of the record, passed back on dismiss.
    pub id: String,
    pub severity: Severity,
    pub title: &'static str,
    pub message: String,
    /// Present only when details are enabled and the record has them.
    pub details: Option<String>,
    /// Present only when details are enabled and the record has one.
    pub code: Option<String>,
}

impl AlertItem {
    #[must_use]
    pub fn from_record(record: &ErrorRecord, show_details: bool) -> Self {
        let (details, code) = if show_details {
            (
                record.details().map(String::from),
                record.code().map(ToString::to_string),
            )
        } else {
            (None, None)
        };

        Self {
            id: record.id().to_string(),
            severity: record.severity(),
            title: record.severity().title(),
            message: display_message(record).to_string(),
            details,
            code,
        }
    }
}

/// The connection status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusViewModel {
    pub service: String,
    pub status: ConnectionStatus,
    pub label: &'static str,
    pub hint: Option<&'static str>,
}

impl StatusViewModel {
    #[must_use]
    pub fn new(service: &str, state: &ConnectionState) -> Self {
        let status = state.status();
        let (label, hint) = match status {
            ConnectionStatus::Unchecked => ("Not checked", None),
            ConnectionStatus::Checking => ("Checking...", None),
            ConnectionStatus::Connected => ("Connected", None),
            ConnectionStatus::Disconnected => ("Disconnected", Some(DISCONNECTED_HINT)),
        };

        Self {
            service: service.to_string(),
            status,
            label,
            hint,
        }
    }
}
