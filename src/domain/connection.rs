//! Reachability state of the external backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of what the [`ConnectionMonitor`](crate::store::ConnectionMonitor)
/// knows about the backend.
///
/// Values are always replaced as a whole, so a snapshot is internally
/// consistent: while `checking` is true, `error` is cleared and `connected`
/// still holds the last known result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionState {
    pub connected: bool,
    /// True only while a probe is in flight.
    pub checking: bool,
    /// Message from the last failed probe.
    pub error: Option<String>,
    /// Completion time of the most recent probe, success or failure.
    pub last_checked: Option<DateTime<Utc>>,
}

/// Phase of the connection state machine, derived from [`ConnectionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Unchecked,
    Checking,
    Connected,
    Disconnected,
}

impl ConnectionState {
    /// State entered when a probe starts. Keeps the last known `connected`
    /// value and completion time.
    #[must_use]
    pub fn begin_check(&self) -> Self {
        Self {
            connected: self.connected,
            checking: true,
            error: None,
            last_checked: self.last_checked,
        }
    }

    #[must_use]
    pub const fn succeeded(at: DateTime<Utc>) -> Self {
        Self {
            connected: true,
            checking: false,
            error: None,
            last_checked: Some(at),
        }
    }

    #[must_use]
    pub const fn failed(message: String, at: DateTime<Utc>) -> Self {
        Self {
            connected: false,
            checking: false,
            error: Some(message),
            last_checked: Some(at),
        }
    }

    #[must_use]
    pub const fn status(&self) -> ConnectionStatus {
        if self.checking {
            ConnectionStatus::Checking
        } else if self.last_checked.is_none() {
            ConnectionStatus::Unchecked
        } else if self.connected {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }
}
