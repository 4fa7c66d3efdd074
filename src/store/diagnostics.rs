//! Secondary emission channel for critical records.
//!
//! Every record added to the [`ErrorLog`](super::ErrorLog) produces a normal
//! `tracing` event. Critical records are additionally handed to a
//! [`DiagnosticSink`], which writes somewhere that does not depend on the
//! tracing subscriber's filter.

use crate::domain::ErrorRecord;
use crate::observability::file_writer::FileWriter;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

/// Receives critical records after they were stored.
pub trait DiagnosticSink: Send + Sync {
    fn emit_critical(&self, record: &ErrorRecord);
}

fn diagnostic_line(record: &ErrorRecord) -> String {
    json!({
        "event": "critical_error",
        "record": record,
    })
    .to_string()
}

/// Writes critical records straight to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrDiagnostics;

impl DiagnosticSink for StderrDiagnostics {
    fn emit_critical(&self, record: &ErrorRecord) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "Critical error detected: {}", diagnostic_line(record));
    }
}

/// Appends critical records as JSON lines to a size-rotated file.
///
/// Falls back to stderr when the file cannot be written.
#[derive(Debug)]
pub struct FileDiagnostics {
    writer: FileWriter,
}

impl FileDiagnostics {
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            writer: FileWriter::new(file_path),
        }
    }
}

impl DiagnosticSink for FileDiagnostics {
    fn emit_critical(&self, record: &ErrorRecord) {
        if let Err(e) = self.writer.write_line(&diagnostic_line(record)) {
            tracing::warn!(error = %e, "failed to write critical diagnostic, using stderr");
            StderrDiagnostics.emit_critical(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{create_app_error, ErrorOptions};
    use crate::domain::{ErrorKind, Severity};

    #[test]
    fn file_diagnostics_append_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("critical-errors.jsonl");
        let sink = FileDiagnostics::new(path.clone());

        let record = create_app_error(
            ErrorKind::Server,
            Severity::Critical,
            "database unreachable",
            ErrorOptions::default(),
        )
        .unwrap();
        sink.emit_critical(&record);
        sink.emit_critical(&record);

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["event"], "critical_error");
        assert_eq!(parsed["record"]["id"], record.id());
        assert_eq!(parsed["record"]["severity"], "critical");
    }
}
