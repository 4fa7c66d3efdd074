//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) only mutates [`AppState`](super::AppState);
//! anything that touches a store is returned as an [`Action`] and executed by
//! [`AppShell`](super::AppShell).

/// Commands executed against the shared stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Dismisses one record from the error log.
    RemoveRecord {
        /// Id of the record to remove.
        id: String,
    },

    /// Dismisses every record.
    ClearRecords,

    /// Runs a connection probe.
    CheckConnection,

    /// Returns the connection monitor to its initial state.
    ResetConnection,
}
