//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → OtlpFileExporter → app-shell-otlp.json
//!                ↘ fmt layer → stderr (optional)
//! ```
//!
//! Exported batches are OTLP/JSON documents, one per line, in a file that
//! rotates at 10 MB and keeps three backups. The same rotating writer backs
//! the critical-error diagnostics file.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider with the file exporter
//! - `otlp`: OTLP/JSON span encoding
//! - `file_writer`: Rotating line writer

pub(crate) mod file_writer;
mod init;
mod otlp;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
