//! Tracer provider backed by a local OTLP/JSON file.

use super::file_writer::FileWriter;
use super::otlp;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::future::ready;
use std::path::PathBuf;

/// Instrumentation scope written into every exported batch.
pub(super) const SCOPE_NAME: &str = "app-shell";

/// Writes each exported batch as one JSON line.
struct OtlpFileExporter {
    writer: FileWriter,
    resource: Resource,
    shut_down: bool,
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.shut_down {
            return Box::pin(ready(Err(TraceError::from("exporter is shut down"))));
        }

        let line = otlp::encode_batch(&self.resource, SCOPE_NAME, &batch).to_string();
        let result = self
            .writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

impl std::fmt::Debug for OtlpFileExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtlpFileExporter")
            .field("writer", &self.writer)
            .field("shut_down", &self.shut_down)
            .finish_non_exhaustive()
    }
}

/// Builds a provider that exports every finished span straight to `trace_file`.
pub(super) fn file_tracer_provider(trace_file: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter {
        writer: FileWriter::new(trace_file),
        resource: resource.clone(),
        shut_down: false,
    };

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
