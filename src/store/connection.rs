//! Reachability tracking for the external backend.
//!
//! The monitor runs an injected [`Probe`] and records the outcome as a
//! [`ConnectionState`]. It does not know the probe's transport.
//!
//! # State Machine
//!
//! ```text
//! unchecked ──check()──▶ checking ──ok──▶ connected
//!                            │  ▲
//!                            │  └──check()── connected | disconnected
//!                            └──err──▶ disconnected (reported, re-raised)
//! ```
//!
//! `check()` holds no lock across the probe. Concurrent checks race on the
//! terminal write; each write is a complete state, so the result of whichever
//! probe resolves last wins, with its own completion time.

use super::lock;
use super::subscription::{Listeners, Subscription};
use crate::domain::{
    ConnectionState, Context, ErrorKind, ErrorRecord, RawError, Result, Severity, ShellError,
};
use crate::reporting::{ErrorReporter, ReportOptions};
use chrono::Utc;
use futures_util::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Value of `context.source` on records reported for failed probes.
pub const CONNECTION_CHECK_SOURCE: &str = "connection_check";

/// Fallback state message when a probe fails without text.
const UNKNOWN_PROBE_ERROR: &str = "Unknown error";

/// A single reachability check against the backend.
///
/// Implemented for any `Fn() -> impl Future<Output = Result<(), RawError>>`,
/// so a closure wrapping the real client call is enough.
pub trait Probe: Send + Sync {
    fn probe(&self) -> BoxFuture<'static, std::result::Result<(), RawError>>;
}

impl<F, Fut> Probe for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = std::result::Result<(), RawError>> + Send + 'static,
{
    fn probe(&self) -> BoxFuture<'static, std::result::Result<(), RawError>> {
        Box::pin(self())
    }
}

/// Tracks the reachability of one external dependency.
pub struct ConnectionMonitor {
    state: Mutex<ConnectionState>,
    probe: Arc<dyn Probe>,
    reporter: ErrorReporter,
    listeners: Listeners<ConnectionState>,
}

impl ConnectionMonitor {
    #[must_use]
    pub fn new(probe: Arc<dyn Probe>, reporter: ErrorReporter) -> Self {
        Self {
            state: Mutex::new(ConnectionState::default()),
            probe,
            reporter,
            listeners: Listeners::new(),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        lock(&self.state).clone()
    }

    /// Runs one probe.
    ///
    /// On failure the state records the message, the failure is reported with
    /// `context.source = "connection_check"`, and the error is returned so the
    /// caller can react.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::ConnectionCheck`] when the probe fails.
    pub async fn check(&self) -> Result<()> {
        tracing::debug!("connection check started");
        let checking = lock(&self.state).begin_check();
        self.replace_state(checking);

        match self.probe.probe().await {
            Ok(()) => {
                self.replace_state(ConnectionState::succeeded(Utc::now()));
                tracing::debug!("connection check succeeded");
                Ok(())
            }
            Err(raw) => {
                let message = raw
                    .message()
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .unwrap_or(UNKNOWN_PROBE_ERROR)
                    .to_string();

                self.replace_state(ConnectionState::failed(message.clone(), Utc::now()));

                let mut context = Context::new();
                context.insert("source".into(), CONNECTION_CHECK_SOURCE.into());
                context.insert("component".into(), "connection_monitor".into());

                let record_id = match self.report_failure(&raw, &message, context) {
                    Ok(record) => Some(record.id().to_string()),
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to report connection failure");
                        None
                    }
                };

                tracing::debug!(error = %message, "connection check failed");
                Err(ShellError::ConnectionCheck { message, record_id })
            }
        }
    }

    /// Returns to the initial unchecked state without reporting anything.
    pub fn reset(&self) {
        self.replace_state(ConnectionState::default());
        tracing::debug!("connection state reset");
    }

    /// Registers a listener called with the new state after every change.
    pub fn subscribe<F>(self: &Arc<Self>, listener: F) -> Subscription
    where
        F: Fn(&ConnectionState) + Send + Sync + 'static,
    {
        let id = self.listeners.add(Arc::new(listener));
        let monitor = Arc::downgrade(self);
        Subscription::new(move || {
            if let Some(monitor) = monitor.upgrade() {
                monitor.listeners.remove(id);
            }
        })
    }

    /// Reports a failed probe. A failure without usable text is recorded as a
    /// network failure carrying the fallback message.
    fn report_failure(&self, raw: &RawError, message: &str, context: Context) -> Result<ErrorRecord> {
        match self.reporter.report(raw, Some(context.clone())) {
            Err(ShellError::EmptyMessage) => self.reporter.report_typed(
                ErrorKind::Network,
                Severity::High,
                message,
                ReportOptions {
                    context: Some(context),
                    ..ReportOptions::default()
                },
            ),
            reported => reported,
        }
    }

    fn replace_state(&self, next: ConnectionState) {
        *lock(&self.state) = next.clone();
        self.listeners.notify(&next);
    }
}

impl fmt::Debug for ConnectionMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionMonitor")
            .field("state", &self.state())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}
