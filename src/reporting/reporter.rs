//! Single entry point for recording failures.
//!
//! [`ErrorReporter`] classifies a raw failure, stores the resulting record in
//! the shared [`ErrorLog`], and hands the record back. It also re-exposes the
//! log's read and dismiss operations so UI code needs only one handle.

use crate::classify::classifier::{
    backend_failure_draft, build_draft, classify_draft, looks_like_network_failure,
    network_failure_draft,
};
use crate::classify::ErrorOptions;
use crate::domain::{Context, ErrorKind, ErrorRecord, RawError, Result, Severity};
use crate::store::{ErrorLog, LogSnapshot, Subscription};
use std::sync::Arc;

/// Optional fields for [`ErrorReporter::report_typed`].
pub type ReportOptions = ErrorOptions;

/// Cheap, clonable handle over the shared error log.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    log: Arc<ErrorLog>,
}

impl ErrorReporter {
    #[must_use]
    pub const fn new(log: Arc<ErrorLog>) -> Self {
        Self { log }
    }

    /// The underlying log.
    #[must_use]
    pub const fn log(&self) -> &Arc<ErrorLog> {
        &self.log
    }

    /// Classifies and stores a raw failure.
    ///
    /// Native errors and objects whose message mentions `network` or `fetch`
    /// take the network path and become a `network`/`high` record with a
    /// fixed message; everything else goes through the generic classifier. `context` is merged over the
    /// classifier's own context, caller keys winning.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::EmptyMessage`](crate::ShellError::EmptyMessage)
    /// when the failure's message text is blank.
    pub fn report(&self, raw: &RawError, context: Option<Context>) -> Result<ErrorRecord> {
        let _span = tracing::debug_span!("report_error").entered();

        let draft = if looks_like_network_failure(raw) {
            network_failure_draft(raw)?
        } else {
            classify_draft(raw)?
        };
        Ok(self.log.add(draft.merge_context(context)))
    }

    /// Reports a native error value. Its source chain becomes `details`.
    ///
    /// # Errors
    ///
    /// See [`report`](Self::report).
    pub fn report_error<E>(&self, error: &E, context: Option<Context>) -> Result<ErrorRecord>
    where
        E: std::error::Error + ?Sized,
    {
        self.report(&RawError::from_error(error), context)
    }

    /// Reports a failure as a connectivity problem regardless of its message.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the stored message is a fixed constant.
    pub fn report_network(&self, raw: &RawError, context: Option<Context>) -> Result<ErrorRecord> {
        let _span = tracing::debug_span!("report_network_error").entered();
        Ok(self.log.add(network_failure_draft(raw)?.merge_context(context)))
    }

    /// Reports a failure returned by the backend client, keeping its message.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::EmptyMessage`](crate::ShellError::EmptyMessage)
    /// when the backend message is only whitespace.
    pub fn report_backend(&self, raw: &RawError, context: Option<Context>) -> Result<ErrorRecord> {
        let _span = tracing::debug_span!("report_backend_error").entered();
        Ok(self.log.add(backend_failure_draft(raw)?.merge_context(context)))
    }

    /// Stores a record with a caller-chosen classification.
    ///
    /// No substring matching runs on `message`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::EmptyMessage`](crate::ShellError::EmptyMessage)
    /// if the trimmed message is empty.
    pub fn report_typed(
        &self,
        kind: ErrorKind,
        severity: Severity,
        message: &str,
        options: ReportOptions,
    ) -> Result<ErrorRecord> {
        Ok(self.log.add(build_draft(kind, severity, message, options)?))
    }

    #[must_use]
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.log.records()
    }

    #[must_use]
    pub fn last_record(&self) -> Option<ErrorRecord> {
        self.log.last_record()
    }

    #[must_use]
    pub fn snapshot(&self) -> LogSnapshot {
        self.log.snapshot()
    }

    /// Dismisses one record. Unknown ids are ignored.
    pub fn remove(&self, id: &str) -> bool {
        self.log.remove(id)
    }

    /// Dismisses every record.
    pub fn clear(&self) {
        self.log.clear();
    }

    #[must_use]
    pub fn query_by_kind(&self, kind: ErrorKind) -> Vec<ErrorRecord> {
        self.log.query_by_kind(kind)
    }

    #[must_use]
    pub fn query_by_severity(&self, severity: Severity) -> Vec<ErrorRecord> {
        self.log.query_by_severity(severity)
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&LogSnapshot) + Send + Sync + 'static,
    {
        self.log.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{NETWORK_FAILURE_DETAILS, NETWORK_FAILURE_MESSAGE};
    use crate::domain::{ErrorPayload, ShellError};
    use serde_json::json;

    fn reporter() -> ErrorReporter {
        ErrorReporter::new(Arc::new(ErrorLog::new()))
    }

    #[derive(Debug, thiserror::Error)]
    #[error("request to /profile failed")]
    struct RequestFailed;

    #[test]
    fn report_stores_and_returns_the_record() {
        let reporter = reporter();
        let record = reporter.report(&RawError::from("oops"), None).unwrap();

        assert_eq!(reporter.records(), vec![record.clone()]);
        assert_eq!(reporter.last_record(), Some(record));
    }

    #[test]
    fn network_messages_take_the_network_path() {
        let reporter = reporter();
        let raw = RawError::Native(ErrorPayload::new("network request failed"));
        let record = reporter.report(&raw, None).unwrap();

        assert_eq!(record.kind(), ErrorKind::Network);
        assert_eq!(record.severity(), Severity::High);
        assert_eq!(record.message(), NETWORK_FAILURE_MESSAGE);
        assert_eq!(record.details(), Some("network request failed"));
        assert!(record.context_value("originalError").is_some());
    }

    #[test]
    fn plain_strings_never_take_the_network_path() {
        let reporter = reporter();
        let record = reporter.report(&RawError::from("auth expired"), None).unwrap();
        assert_eq!((record.kind(), record.severity()), (ErrorKind::Unknown, Severity::Low));

        let record = reporter.report(&RawError::from("network down"), None).unwrap();
        assert_eq!(record.kind(), ErrorKind::Unknown);
        assert_eq!(record.message(), "network down");
    }

    #[test]
    fn other_messages_use_the_generic_classifier() {
        let reporter = reporter();
        let raw = RawError::Native(ErrorPayload::new("auth session expired"));
        let record = reporter.report(&raw, None).unwrap();

        assert_eq!(record.kind(), ErrorKind::Authentication);
        assert_eq!(record.message(), "auth session expired");
    }

    #[test]
    fn caller_context_wins_over_classifier_context() {
        let reporter = reporter();
        let mut context = Context::new();
        context.insert("originalError".into(), json!("replaced"));
        context.insert("screen".into(), json!("settings"));

        let record = reporter.report(&RawError::Opaque(json!(42)), Some(context)).unwrap();

        assert_eq!(record.context_value("originalError"), Some(&json!("replaced")));
        assert_eq!(record.context_value("screen"), Some(&json!("settings")));
    }

    #[test]
    fn report_error_captures_native_errors() {
        let reporter = reporter();
        let record = reporter.report_error(&RequestFailed, None).unwrap();

        assert_eq!(record.kind(), ErrorKind::Client);
        assert_eq!(record.message(), "request to /profile failed");
    }

    #[test]
    fn report_network_ignores_message_content() {
        let reporter = reporter();
        let record = reporter.report_network(&RawError::Opaque(json!(null)), None).unwrap();

        assert_eq!(record.kind(), ErrorKind::Network);
        assert_eq!(record.details(), Some(NETWORK_FAILURE_DETAILS));
    }

    #[test]
    fn report_backend_marks_and_stores_the_record() {
        let reporter = reporter();
        let mut context = Context::new();
        context.insert("table".into(), json!("profiles"));

        let raw = RawError::decode(json!({ "message": "permission denied for table profiles" }));
        let record = reporter.report_backend(&raw, Some(context)).unwrap();

        assert_eq!(record.kind(), ErrorKind::Authorization);
        assert_eq!(record.message(), "permission denied for table profiles");
        assert_eq!(record.context_value("backendError"), Some(&json!(true)));
        assert_eq!(record.context_value("table"), Some(&json!("profiles")));
        assert_eq!(reporter.last_record(), Some(record));
    }

    #[test]
    fn report_typed_bypasses_markers() {
        let reporter = reporter();
        let record = reporter
            .report_typed(
                ErrorKind::Validation,
                Severity::Low,
                "network name must be unique",
                ErrorOptions::default(),
            )
            .unwrap();

        assert_eq!(record.kind(), ErrorKind::Validation);
        assert_eq!(record.severity(), Severity::Low);
        assert_eq!(reporter.query_by_kind(ErrorKind::Validation).len(), 1);
    }

    #[test]
    fn blank_messages_are_rejected_and_not_stored() {
        let reporter = reporter();
        let result = reporter.report(&RawError::from("  "), None);

        assert!(matches!(result, Err(ShellError::EmptyMessage)));
        assert!(reporter.records().is_empty());
    }

    #[test]
    fn dismiss_operations_delegate_to_the_log() {
        let reporter = reporter();
        let first = reporter.report(&RawError::from("one"), None).unwrap();
        reporter.report(&RawError::from("two"), None).unwrap();

        assert!(reporter.remove(first.id()));
        assert_eq!(reporter.records().len(), 1);
        reporter.clear();
        assert!(reporter.records().is_empty());
        assert!(reporter.last_record().is_none());
    }
}
