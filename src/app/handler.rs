//! Event handling and state transitions.
//!
//! Events come from two sources: user input (dismiss, toggles, filters,
//! connection commands) and store subscriptions (`LogChanged`,
//! `ConnectionChanged`). The handler updates [`AppState`] and returns
//! `(needs_render, actions)`.
//!
//! Dismissals do not touch the cached records directly. The resulting
//! `LogChanged` event carries the new snapshot, so the cache always mirrors
//! the log.

use crate::app::{Action, AppState};
use crate::domain::{ConnectionState, Result, Severity};
use crate::store::LogSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Dismisses the record with this id.
    Dismiss {
        id: String,
    },
    /// Dismisses the alert shown at a 1-based stack position.
    DismissAt(usize),
    /// Dismisses every record.
    DismissAll,
    /// Shows or hides `details` and `code` in alerts.
    ToggleDetails,
    /// Restricts the stack to the given severities; `None` shows all.
    SetSeverityFilter(Option<Vec<Severity>>),
    CheckConnection,
    ResetConnection,

    /// The error log changed.
    LogChanged(LogSnapshot),
    /// The connection monitor changed.
    ConnectionChanged(ConnectionState),
}

/// Processes an event and returns whether a re-render is needed plus the
/// actions to execute.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the signature stable for
/// handlers that may fail.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Dismiss { id } => Ok((false, vec![Action::RemoveRecord { id: id.clone() }])),
        Event::DismissAt(position) => {
            let Some(id) = state.alert_id_at(*position) else {
                tracing::debug!(position, "no alert at position");
                return Ok((false, vec![]));
            };
            Ok((false, vec![Action::RemoveRecord { id }]))
        }
        Event::DismissAll => Ok((false, vec![Action::ClearRecords])),
        Event::ToggleDetails => {
            state.detail_level = state.detail_level.toggled();
            tracing::debug!(detail_level = ?state.detail_level, "detail level changed");
            Ok((true, vec![]))
        }
        Event::SetSeverityFilter(filter) => {
            if state.severity_filter == *filter {
                return Ok((false, vec![]));
            }
            state.severity_filter = filter.clone();
            Ok((true, vec![]))
        }
        Event::CheckConnection => Ok((false, vec![Action::CheckConnection])),
        Event::ResetConnection => Ok((false, vec![Action::ResetConnection])),
        Event::LogChanged(snapshot) => {
            tracing::debug!(records = snapshot.records.len(), "log snapshot received");
            state.records.clone_from(&snapshot.records);
            Ok((true, vec![]))
        }
        Event::ConnectionChanged(connection) => {
            if state.connection == *connection {
                return Ok((false, vec![]));
            }
            state.connection = connection.clone();
            Ok((true, vec![]))
        }
    }
}

/// Variant name only; snapshots are too large for a span field.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Dismiss { .. } => "Dismiss",
        Event::DismissAt(_) => "DismissAt",
        Event::DismissAll => "DismissAll",
        Event::ToggleDetails => "ToggleDetails",
        Event::SetSeverityFilter(_) => "SetSeverityFilter",
        Event::CheckConnection => "CheckConnection",
        Event::ResetConnection => "ResetConnection",
        Event::LogChanged(_) => "LogChanged",
        Event::ConnectionChanged(_) => "ConnectionChanged",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DetailLevel;
    use crate::domain::{ErrorDraft, ErrorKind};
    use crate::ui::Theme;
    use crate::Config;

    fn state() -> AppState {
        AppState::new(&Config::default(), Theme::default())
    }

    fn snapshot(count: usize) -> LogSnapshot {
        let records: Vec<_> = (0..count)
            .map(|i| {
                ErrorDraft::new(ErrorKind::Client, Severity::Low, format!("error {i}"))
                    .unwrap()
                    .finalize()
            })
            .collect();
        LogSnapshot {
            last_record: records.last().cloned(),
            records,
        }
    }

    #[test]
    fn dismiss_emits_remove_without_rendering() {
        let mut state = state();
        let (render, actions) =
            handle_event(&mut state, &Event::Dismiss { id: "error_1_abc".into() }).unwrap();

        assert!(!render);
        assert_eq!(actions, vec![Action::RemoveRecord { id: "error_1_abc".into() }]);
    }

    #[test]
    fn dismiss_at_resolves_the_visible_alert() {
        let mut state = state();
        let snap = snapshot(2);
        let newest = snap.records[1].id().to_string();
        handle_event(&mut state, &Event::LogChanged(snap)).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::DismissAt(1)).unwrap();
        assert_eq!(actions, vec![Action::RemoveRecord { id: newest }]);

        let (_, actions) = handle_event(&mut state, &Event::DismissAt(9)).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn dismiss_all_clears_regardless_of_the_cache() {
        let mut state = state();
        assert_eq!(handle_event(&mut state, &Event::DismissAll).unwrap().1, vec![Action::ClearRecords]);

        handle_event(&mut state, &Event::LogChanged(snapshot(1))).unwrap();
        assert_eq!(handle_event(&mut state, &Event::DismissAll).unwrap().1, vec![Action::ClearRecords]);
    }

    #[test]
    fn toggle_details_flips_and_renders() {
        let mut state = state();
        let (render, _) = handle_event(&mut state, &Event::ToggleDetails).unwrap();
        assert!(render);
        assert_eq!(state.detail_level, DetailLevel::Full);
    }

    #[test]
    fn unchanged_filter_does_not_render() {
        let mut state = state();
        let (render, _) = handle_event(&mut state, &Event::SetSeverityFilter(None)).unwrap();
        assert!(!render);

        let filter = Some(vec![Severity::High]);
        let (render, _) = handle_event(&mut state, &Event::SetSeverityFilter(filter.clone())).unwrap();
        assert!(render);
        assert_eq!(state.severity_filter, filter);
    }

    #[test]
    fn store_events_refresh_the_cache() {
        let mut state = state();
        handle_event(&mut state, &Event::LogChanged(snapshot(3))).unwrap();
        assert_eq!(state.records.len(), 3);

        let checking = ConnectionState::default().begin_check();
        let (render, _) = handle_event(&mut state, &Event::ConnectionChanged(checking.clone())).unwrap();
        assert!(render);
        assert_eq!(state.connection, checking);
    }
}
