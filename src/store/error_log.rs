//! Ordered store of error records.
//!
//! [`ErrorLog`] is created once at application start and shared through an
//! `Arc`. Only its own operations (`add`, `remove`, `clear`) write to it; every
//! write is a single step under one lock, so callers never observe a
//! half-applied change.
//!
//! # Example
//!
//! ```
//! use app_shell::domain::{ErrorDraft, ErrorKind, Severity};
//! use app_shell::store::ErrorLog;
//!
//! let log = ErrorLog::new();
//! let record = log.add(ErrorDraft::new(ErrorKind::Validation, Severity::Low, "Name is required")?);
//! assert_eq!(log.last_record().map(|r| r.id().to_string()), Some(record.id().to_string()));
//!
//! log.remove(record.id());
//! assert!(log.is_empty());
//! # Ok::<(), app_shell::ShellError>(())
//! ```

use super::diagnostics::{DiagnosticSink, StderrDiagnostics};
use super::lock;
use super::subscription::{Listeners, Subscription};
use crate::domain::{ErrorDraft, ErrorKind, ErrorRecord, Severity};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Point-in-time copy of the log, delivered to subscribers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogSnapshot {
    /// Records in arrival order.
    pub records: Vec<ErrorRecord>,
    /// Most recently added record still present in the log.
    pub last_record: Option<ErrorRecord>,
}

#[derive(Debug, Default)]
struct LogState {
    records: Vec<ErrorRecord>,
    /// Id of the most recently added record. Always absent or present in `records`.
    last_record_id: Option<String>,
}

impl LogState {
    fn last_record(&self) -> Option<&ErrorRecord> {
        let id = self.last_record_id.as_deref()?;
        self.records.iter().rev().find(|record| record.id() == id)
    }

    fn snapshot(&self) -> LogSnapshot {
        LogSnapshot {
            records: self.records.clone(),
            last_record: self.last_record().cloned(),
        }
    }
}

/// Process-wide ordered log of error records.
pub struct ErrorLog {
    state: Mutex<LogState>,
    listeners: Listeners<LogSnapshot>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl ErrorLog {
    /// Creates an empty log whose critical records also go to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_diagnostics(Arc::new(StderrDiagnostics))
    }

    /// Creates an empty log with a custom sink for critical records.
    #[must_use]
    pub fn with_diagnostics(diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            state: Mutex::new(LogState::default()),
            listeners: Listeners::new(),
            diagnostics,
        }
    }

    /// Stores a draft, assigning its id and creation time.
    ///
    /// Emits a log line whose level follows the record's severity. Critical
    /// records are also passed to the diagnostic sink. Identical drafts are
    /// stored as independent records.
    pub fn add(&self, draft: ErrorDraft) -> ErrorRecord {
        let record = draft.finalize();
        emit_log_line(&record);

        let snapshot = {
            let mut state = lock(&self.state);
            state.records.push(record.clone());
            state.last_record_id = Some(record.id().to_string());
            self.snapshot_for_listeners(&state)
        };

        if record.severity() == Severity::Critical {
            self.diagnostics.emit_critical(&record);
        }

        if let Some(snapshot) = snapshot {
            self.listeners.notify(&snapshot);
        }

        record
    }

    /// Removes the record with `id`. Returns whether a record was removed.
    ///
    /// Removing an unknown id is a no-op.
    pub fn remove(&self, id: &str) -> bool {
        let snapshot = {
            let mut state = lock(&self.state);
            let before = state.records.len();
            state.records.retain(|record| record.id() != id);
            if state.records.len() == before {
                return false;
            }
            if state.last_record_id.as_deref() == Some(id) {
                state.last_record_id = None;
            }
            self.snapshot_for_listeners(&state)
        };

        tracing::debug!(error_id = %id, "error record removed");
        if let Some(snapshot) = snapshot {
            self.listeners.notify(&snapshot);
        }
        true
    }

    /// Removes every record.
    pub fn clear(&self) {
        let snapshot = {
            let mut state = lock(&self.state);
            let had_records = !state.records.is_empty();
            *state = LogState::default();
            if !had_records {
                return;
            }
            self.snapshot_for_listeners(&state)
        };

        tracing::debug!("error log cleared");
        if let Some(snapshot) = snapshot {
            self.listeners.notify(&snapshot);
        }
    }

    /// All records in arrival order.
    #[must_use]
    pub fn records(&self) -> Vec<ErrorRecord> {
        lock(&self.state).records.clone()
    }

    #[must_use]
    pub fn last_record(&self) -> Option<ErrorRecord> {
        lock(&self.state).last_record().cloned()
    }

    #[must_use]
    pub fn snapshot(&self) -> LogSnapshot {
        lock(&self.state).snapshot()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.state).records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.state).records.is_empty()
    }

    /// Records of the given kind, in arrival order.
    #[must_use]
    pub fn query_by_kind(&self, kind: ErrorKind) -> Vec<ErrorRecord> {
        self.query(|record| record.kind() == kind)
    }

    /// Records of the given severity, in arrival order.
    #[must_use]
    pub fn query_by_severity(&self, severity: Severity) -> Vec<ErrorRecord> {
        self.query(|record| record.severity() == severity)
    }

    fn query(&self, predicate: impl Fn(&ErrorRecord) -> bool) -> Vec<ErrorRecord> {
        lock(&self.state)
            .records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Registers a listener called with a fresh snapshot after every change.
    pub fn subscribe<F>(self: &Arc<Self>, listener: F) -> Subscription
    where
        F: Fn(&LogSnapshot) + Send + Sync + 'static,
    {
        let id = self.listeners.add(Arc::new(listener));
        let log = Arc::downgrade(self);
        Subscription::new(move || {
            if let Some(log) = log.upgrade() {
                log.listeners.remove(id);
            }
        })
    }

    fn snapshot_for_listeners(&self, state: &LogState) -> Option<LogSnapshot> {
        if self.listeners.is_empty() {
            None
        } else {
            Some(state.snapshot())
        }
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorLog")
            .field("records", &self.len())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

fn emit_log_line(record: &ErrorRecord) {
    let line = format!("[{}] {}", record.kind().as_str().to_uppercase(), record.message());

    match record.severity() {
        Severity::Critical | Severity::High => tracing::error!(
            error_id = %record.id(),
            kind = %record.kind(),
            severity = %record.severity(),
            details = ?record.details(),
            "{line}"
        ),
        Severity::Medium => tracing::warn!(
            error_id = %record.id(),
            kind = %record.kind(),
            severity = %record.severity(),
            details = ?record.details(),
            "{line}"
        ),
        Severity::Low => tracing::info!(
            error_id = %record.id(),
            kind = %record.kind(),
            severity = %record.severity(),
            "{line}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingSink {
        ids: Mutex<Vec<String>>,
    }

    impl DiagnosticSink for RecordingSink {
        fn emit_critical(&self, record: &ErrorRecord) {
            self.ids.lock().unwrap().push(record.id().to_string());
        }
    }

    fn draft(kind: ErrorKind, severity: Severity, message: &str) -> ErrorDraft {
        ErrorDraft::new(kind, severity, message).unwrap()
    }

    #[test]
    fn add_then_remove_leaves_log_empty() {
        let log = ErrorLog::new();
        let record = log.add(draft(ErrorKind::Client, Severity::Medium, "boom"));

        assert_eq!(log.last_record().as_ref().map(ErrorRecord::id), Some(record.id()));
        assert!(log.remove(record.id()));
        assert!(log.is_empty());
        assert!(log.last_record().is_none());
    }

    #[test]
    fn removing_unknown_id_is_a_noop() {
        let log = ErrorLog::new();
        let record = log.add(draft(ErrorKind::Client, Severity::Medium, "boom"));

        assert!(!log.remove("error_0_missing"));
        assert_eq!(log.len(), 1);
        assert_eq!(log.last_record(), Some(record));
    }

    #[test]
    fn removing_an_older_record_keeps_last_record() {
        let log = ErrorLog::new();
        let first = log.add(draft(ErrorKind::Client, Severity::Low, "first"));
        let second = log.add(draft(ErrorKind::Client, Severity::Low, "second"));

        log.remove(first.id());
        assert_eq!(log.last_record(), Some(second));
    }

    #[test]
    fn last_record_is_not_restored_after_removal() {
        let log = ErrorLog::new();
        log.add(draft(ErrorKind::Client, Severity::Low, "first"));
        let second = log.add(draft(ErrorKind::Client, Severity::Low, "second"));

        log.remove(second.id());
        assert_eq!(log.len(), 1);
        assert!(log.last_record().is_none());
    }

    #[test]
    fn clear_empties_log_for_any_count() {
        for n in 0..5 {
            let log = ErrorLog::new();
            for i in 0..n {
                log.add(draft(ErrorKind::Unknown, Severity::Low, &format!("error {i}")));
            }
            log.clear();
            assert_eq!(log.len(), 0);
            assert!(log.last_record().is_none());
        }
    }

    #[test]
    fn identical_drafts_get_independent_ids() {
        let log = ErrorLog::new();
        let a = log.add(draft(ErrorKind::Network, Severity::High, "offline"));
        let b = log.add(draft(ErrorKind::Network, Severity::High, "offline"));

        assert_ne!(a.id(), b.id());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn severity_query_preserves_insertion_order() {
        let log = ErrorLog::new();
        let c1 = log.add(draft(ErrorKind::Server, Severity::Critical, "c1"));
        log.add(draft(ErrorKind::Client, Severity::Low, "low"));
        let c2 = log.add(draft(ErrorKind::Network, Severity::Critical, "c2"));
        log.add(draft(ErrorKind::Client, Severity::High, "high"));

        let critical = log.query_by_severity(Severity::Critical);
        assert_eq!(critical, vec![c1, c2]);
    }

    #[test]
    fn kind_query_returns_snapshot() {
        let log = ErrorLog::new();
        let net = log.add(draft(ErrorKind::Network, Severity::High, "offline"));
        log.add(draft(ErrorKind::Validation, Severity::Low, "bad input"));

        let snapshot = log.query_by_kind(ErrorKind::Network);
        log.clear();

        assert_eq!(snapshot, vec![net]);
        assert!(log.query_by_kind(ErrorKind::Network).is_empty());
    }

    #[test]
    fn only_critical_records_reach_the_diagnostic_sink() {
        let sink = Arc::new(RecordingSink::default());
        let log = ErrorLog::with_diagnostics(sink.clone());

        log.add(draft(ErrorKind::Network, Severity::High, "offline"));
        let critical = log.add(draft(ErrorKind::Server, Severity::Critical, "corrupted"));

        assert_eq!(*sink.ids.lock().unwrap(), vec![critical.id().to_string()]);
    }

    #[test]
    fn subscribers_see_each_change_until_dropped() {
        let log = Arc::new(ErrorLog::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let subscription = log.subscribe(move |snapshot| {
            sink.lock().unwrap().push(snapshot.records.len());
        });

        let record = log.add(draft(ErrorKind::Client, Severity::Low, "one"));
        log.add(draft(ErrorKind::Client, Severity::Low, "two"));
        log.remove(record.id());
        log.remove("missing");
        drop(subscription);
        log.clear();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 1]);
    }

    #[test]
    fn listeners_may_read_the_log() {
        let log = Arc::new(ErrorLog::new());
        let reads = Arc::new(AtomicUsize::new(0));

        let reader = Arc::clone(&log);
        let counter = Arc::clone(&reads);
        let _subscription = log.subscribe(move |_| {
            counter.store(reader.len(), Ordering::SeqCst);
        });

        log.add(draft(ErrorKind::Client, Severity::Low, "one"));
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }
}
