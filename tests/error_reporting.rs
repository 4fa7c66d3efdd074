//! End-to-end behavior of classification, the error log and the reporter.

use app_shell::domain::ConnectionStatus;
use app_shell::{
    create_app_error, ConnectionMonitor, ConnectionState, Context, DiagnosticSink, ErrorKind,
    ErrorLog, ErrorOptions, ErrorPayload, ErrorRecord, ErrorReporter, RawError, Severity,
    ShellError,
};
use futures::executor::block_on;
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct CollectingSink {
    records: Mutex<Vec<ErrorRecord>>,
}

impl DiagnosticSink for CollectingSink {
    fn emit_critical(&self, record: &ErrorRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

fn reporter() -> (ErrorReporter, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::default());
    let log = Arc::new(ErrorLog::with_diagnostics(sink.clone()));
    (ErrorReporter::new(log), sink)
}

#[test]
fn repeated_identical_records_have_distinct_ids() {
    let ids: Vec<String> = (0..50)
        .map(|_| {
            create_app_error(ErrorKind::Client, Severity::Low, "x", ErrorOptions::default())
                .unwrap()
                .id()
                .to_string()
        })
        .collect();

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
    assert!(ids.iter().all(|id| id.starts_with("error_")));
}

#[test]
fn blank_messages_are_programmer_errors() {
    for message in ["", "   ", "\t\n"] {
        let result = create_app_error(ErrorKind::Server, Severity::High, message, ErrorOptions::default());
        assert!(matches!(result, Err(ShellError::EmptyMessage)));
    }
}

#[test]
fn reported_records_are_classified_by_message() {
    let (reporter, _) = reporter();

    let auth = reporter
        .report(&RawError::Native(ErrorPayload::new("auth session expired")), None)
        .unwrap();
    let plain = reporter.report(&RawError::from("oops"), None).unwrap();
    let decoded = reporter
        .report(&RawError::decode(json!({ "message": "permission denied", "code": 403 })), None)
        .unwrap();

    assert_eq!(auth.kind(), ErrorKind::Authentication);
    assert_eq!((plain.kind(), plain.severity(), plain.message()), (ErrorKind::Unknown, Severity::Low, "oops"));
    assert_eq!(decoded.kind(), ErrorKind::Authorization);
    assert_eq!(decoded.code().map(ToString::to_string).as_deref(), Some("403"));
}

#[test]
fn severity_query_returns_critical_records_in_order() {
    let (reporter, sink) = reporter();
    let mut critical_ids = Vec::new();

    for (i, severity) in [Severity::Critical, Severity::Low, Severity::Critical, Severity::Medium, Severity::Critical]
        .into_iter()
        .enumerate()
    {
        let record = reporter
            .report_typed(ErrorKind::Server, severity, &format!("failure {i}"), ErrorOptions::default())
            .unwrap();
        if severity == Severity::Critical {
            critical_ids.push(record.id().to_string());
        }
    }

    let queried: Vec<String> = reporter
        .query_by_severity(Severity::Critical)
        .iter()
        .map(|r| r.id().to_string())
        .collect();
    assert_eq!(queried, critical_ids);

    let emitted: Vec<String> = sink.records.lock().unwrap().iter().map(|r| r.id().to_string()).collect();
    assert_eq!(emitted, critical_ids);
}

#[test]
fn add_remove_and_clear_keep_last_record_consistent() {
    let (reporter, _) = reporter();

    let record = reporter.report(&RawError::from("one"), None).unwrap();
    assert!(reporter.remove(record.id()));
    assert!(reporter.records().is_empty());
    assert!(reporter.last_record().is_none());
    assert!(!reporter.remove(record.id()));

    for i in 0..4 {
        reporter.report(&RawError::from(format!("error {i}")), None).unwrap();
    }
    reporter.clear();
    assert!(reporter.records().is_empty());
    assert!(reporter.last_record().is_none());
}

#[test]
fn caller_context_is_preserved_on_reported_records() {
    let (reporter, _) = reporter();
    let mut context = Context::new();
    context.insert("operation".into(), json!("load_profile"));

    let record = reporter
        .report(&RawError::Native(ErrorPayload::new("Failed to fetch")), Some(context))
        .unwrap();

    assert_eq!(record.kind(), ErrorKind::Network);
    assert_eq!(record.details(), Some("Failed to fetch"));
    assert_eq!(record.context_value("operation"), Some(&json!("load_profile")));
    assert!(record.context_value("originalError").is_some());
}

#[test]
fn plain_strings_are_never_matched_against_markers() {
    let (reporter, _) = reporter();

    for text in ["network down", "auth expired", "permission denied"] {
        let record = reporter.report(&RawError::from(text), None).unwrap();
        assert_eq!((record.kind(), record.severity()), (ErrorKind::Unknown, Severity::Low));
        assert_eq!(record.message(), text);
    }
}

#[test]
fn failed_probe_is_reported_once_and_reset_restores_initial_state() {
    let (reporter, _) = reporter();
    let monitor = ConnectionMonitor::new(
        Arc::new(|| async { Err::<(), _>(RawError::Native(ErrorPayload::new("503 Service Unavailable"))) }),
        reporter.clone(),
    );

    let result = block_on(monitor.check());
    assert!(matches!(result, Err(ShellError::ConnectionCheck { .. })));

    let state = monitor.state();
    assert!(!state.connected && !state.checking);
    assert_eq!(state.error.as_deref(), Some("503 Service Unavailable"));
    assert_eq!(state.status(), ConnectionStatus::Disconnected);

    let reported: Vec<_> = reporter
        .records()
        .into_iter()
        .filter(|r| r.context_value("source") == Some(&json!("connection_check")))
        .collect();
    assert_eq!(reported.len(), 1);

    monitor.reset();
    assert_eq!(monitor.state(), ConnectionState::default());
}
