//! Subscriber setup.

use super::tracer::{self, SCOPE_NAME};
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `service.name` resource attribute on exported spans.
const SERVICE_NAME: &str = "AppShell";

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "app-shell-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber.
///
/// Spans and events go to `<data_dir>/app-shell-otlp.json` as OTLP/JSON, and
/// additionally to stderr when `log_to_stderr` is set. `RUST_LOG` overrides
/// the configured `trace_level`.
///
/// Returns the trace file path, or `None` when the data directory could not
/// be created or a global subscriber was already installed. Observability is
/// optional, so neither case is an error.
///
/// ```no_run
/// use app_shell::observability::init_tracing;
/// use app_shell::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// };
/// if let Some(path) = init_tracing(&config) {
///     tracing::debug!(path = %path.display(), "tracing enabled");
/// }
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let data_dir = paths::data_dir(config.data_dir.as_deref());
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }

    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let trace_file = data_dir.join(TRACE_FILE_NAME);
    let provider = tracer::file_tracer_provider(trace_file.clone(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));

    let stderr_layer = config.log_to_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(stderr_layer)
        .try_init()
        .ok()
        .map(|()| trace_file)
}
