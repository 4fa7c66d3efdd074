//! App Shell: error management core for a client application shell.
//!
//! The crate provides:
//! - Heuristic classification of heterogeneous failures into typed records
//! - A shared, ordered error log with subscriptions
//! - A reporting facade application code calls on every failure
//! - Backend reachability monitoring through an injected probe
//! - Notification and status rendering with theme support
//! - OpenTelemetry tracing with file-based OTLP export

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Event handling
//! │  - AppShell runtime, AppState, actions              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌────────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Reporting      │   │ Stores        │
//! │ (ui/)         │   │ (reporting/)   │   │ (store/)      │
//! │ - Alerts      │   │ - ErrorReporter│   │ - ErrorLog    │
//! │ - Status line │   │ - AsyncOp      │   │ - Connection  │
//! │ - Theming     │   │ - Cancellation │   │ - Diagnostics │
//! └───────────────┘   └────────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Classification & Domain (classify/, domain/)       │
//! │  - RawError decoding, ErrorRecord, ShellError       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability & Infrastructure                     │  ← Optional
//! │  - OTLP file export, data directory resolution      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Notification state, events, actions and the [`AppShell`] runtime
//! - [`classify`]: Failure classification and display text
//! - [`domain`]: Records, raw failures, connection state, crate errors
//! - [`reporting`]: The [`ErrorReporter`] facade and tracked async operations
//! - [`store`]: [`ErrorLog`] and [`ConnectionMonitor`]
//! - [`ui`]: Notification rendering with theme support
//! - [`infrastructure`]: Data directory resolution
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```toml
//! max_visible = 3
//! show_details = false
//! severity_filter = ["critical", "high"]
//! service_name = "Backend"
//! theme = "dark"
//! trace_level = "debug"
//! data_dir = "~/.local/share/app-shell"
//! log_to_stderr = false
//! ```
//!
//! # Example
//!
//! ```
//! use app_shell::{initialize, Config, Event, RawError};
//! use futures::executor::block_on;
//! use std::sync::Arc;
//!
//! let probe = Arc::new(|| async { Err::<(), _>(RawError::from("Failed to fetch")) });
//! let mut shell = initialize(&Config::default(), probe);
//!
//! let needs_render = block_on(shell.dispatch(Event::CheckConnection))?;
//! assert!(needs_render);
//! assert_eq!(shell.state().compute_status().label, "Disconnected");
//! assert_eq!(shell.state().compute_notifications().alerts.len(), 1);
//! # Ok::<(), app_shell::ShellError>(())
//! ```

pub mod app;
pub mod classify;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod reporting;
pub mod store;
pub mod ui;

pub use app::{handle_event, Action, AppShell, AppState, DetailLevel, Event};
pub use classify::{
    classify, classify_backend_failure, classify_network_failure, create_app_error,
    display_message, ErrorOptions,
};
pub use domain::{
    ConnectionState, ConnectionStatus, Context, ErrorCode, ErrorDraft, ErrorKind, ErrorPayload,
    ErrorRecord, RawError, Result, Severity, ShellError,
};
pub use reporting::{AsyncOperation, AsyncState, CancellationToken, ErrorReporter, ReportOptions};
pub use store::{
    ConnectionMonitor, DiagnosticSink, ErrorLog, FileDiagnostics, LogSnapshot, Probe,
    StderrDiagnostics, Subscription,
};
pub use ui::Theme;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the critical-error diagnostics log inside the data directory.
pub const CRITICAL_ERRORS_FILE: &str = "critical-errors.jsonl";

/// Shell configuration.
///
/// Loaded from a TOML file, a TOML string, or a flat string map such as
/// command-line `key=value` pairs. Unknown keys in TOML are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum notifications shown at once. Default: 3
    pub max_visible: usize,

    /// Show `details` and `code` in notifications. Default: false
    pub show_details: bool,

    /// Severities shown in the notification stack. `None` shows all.
    pub severity_filter: Option<Vec<Severity>>,

    /// Name of the monitored service in the status line. Default: `"Backend"`
    pub service_name: String,

    /// Built-in theme name: `dark` or `light`. Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme. See [`ui::theme`] for the format.
    pub theme_file: Option<PathBuf>,

    /// Trace level: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Directory for the trace file and, when set, the critical-error log.
    pub data_dir: Option<PathBuf>,

    /// Mirror log output to stderr. Default: false
    pub log_to_stderr: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_visible: 3,
            show_details: false,
            severity_filter: None,
            service_name: "Backend".to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            data_dir: None,
            log_to_stderr: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Parses configuration from a flat string map.
    ///
    /// Values that fail to parse fall back to their defaults.
    /// `severity_filter` is a comma-separated list; unknown names are skipped,
    /// and a list with no valid names means no filter.
    ///
    /// ```
    /// use app_shell::{Config, Severity};
    /// use std::collections::BTreeMap;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("max_visible".to_string(), "5".to_string());
    /// map.insert("severity_filter".to_string(), "critical, high".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.max_visible, 5);
    /// assert_eq!(config.severity_filter, Some(vec![Severity::Critical, Severity::High]));
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let max_visible = map
            .get("max_visible")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(defaults.max_visible);

        let severity_filter = map
            .get("severity_filter")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .filter_map(|name| {
                        let severity = Severity::parse(name);
                        if severity.is_none() {
                            tracing::debug!(severity = %name, "ignoring unknown severity in filter");
                        }
                        severity
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|severities| !severities.is_empty());

        Self {
            max_visible,
            show_details: map
                .get("show_details")
                .and_then(|v| parse_flag(v))
                .unwrap_or(defaults.show_details),
            severity_filter,
            service_name: text("service_name").unwrap_or(defaults.service_name),
            theme_name: text("theme"),
            theme_file: text("theme_file").map(PathBuf::from),
            trace_level: text("trace_level"),
            data_dir: text("data_dir").map(PathBuf::from),
            log_to_stderr: map
                .get("log_to_stderr")
                .and_then(|v| parse_flag(v))
                .unwrap_or(defaults.log_to_stderr),
        }
    }

    /// Parses configuration from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Config`] for invalid TOML, unknown keys, or
    /// mistyped values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ShellError::Config(e.to_string()))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Io`] if the file cannot be read and
    /// [`ShellError::Config`] if it cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Resolves the configured theme, falling back to the default theme.
    #[must_use]
    pub fn resolve_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path.display(), error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_deref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }

    fn diagnostics(&self) -> Arc<dyn DiagnosticSink> {
        if self.data_dir.is_none() {
            return Arc::new(StderrDiagnostics);
        }
        let dir = infrastructure::data_dir(self.data_dir.as_deref());
        Arc::new(FileDiagnostics::new(dir.join(CRITICAL_ERRORS_FILE)))
    }
}

/// Creates the shared stores and the shell runtime.
///
/// Builds one [`ErrorLog`], one [`ErrorReporter`] over it, and one
/// [`ConnectionMonitor`] around `probe`, then wires them into an [`AppShell`].
/// Critical records go to `<data_dir>/critical-errors.jsonl` when `data_dir`
/// is configured, and to stderr otherwise.
///
/// Tracing is not installed here; call
/// [`observability::init_tracing`] first to capture initialization events.
pub fn initialize(config: &Config, probe: Arc<dyn Probe>) -> AppShell {
    tracing::debug!(
        max_visible = config.max_visible,
        show_details = config.show_details,
        "initializing app shell"
    );

    let log = Arc::new(ErrorLog::with_diagnostics(config.diagnostics()));
    let reporter = ErrorReporter::new(log);
    let monitor = Arc::new(ConnectionMonitor::new(probe, reporter.clone()));
    let state = AppState::new(config, config.resolve_theme());

    AppShell::new(state, reporter, monitor)
}
