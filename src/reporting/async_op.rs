//! Tracked execution of one async operation.
//!
//! [`AsyncOperation`] wraps a fallible future, exposes its progress as an
//! [`AsyncState`], and reports failures through the shared
//! [`ErrorReporter`]. State writes are skipped once the caller's
//! [`CancellationToken`] is cancelled; reporting is not.

use super::cancel::CancellationToken;
use super::reporter::{ErrorReporter, ReportOptions};
use crate::domain::{Context, ErrorKind, ErrorRecord, Severity, ShellError};
use crate::store::lock;
use serde_json::Value;
use std::future::Future;
use std::sync::Mutex;

const UNKNOWN_OPERATION_ERROR: &str = "Unknown error";

/// Progress of an [`AsyncOperation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncState<T> {
    /// Result of the last successful run, or the initial data.
    pub data: Option<T>,
    pub loading: bool,
    /// Message of the last failure, cleared when a new run starts.
    pub error: Option<String>,
}

impl<T> AsyncState<T> {
    const fn initial(data: Option<T>) -> Self {
        Self {
            data,
            loading: false,
            error: None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        !self.loading && self.error.is_none() && self.data.is_some()
    }
}

/// A named operation whose runs are tracked and whose failures are reported.
#[derive(Debug)]
pub struct AsyncOperation<T> {
    name: String,
    reporter: ErrorReporter,
    initial_data: Option<T>,
    state: Mutex<AsyncState<T>>,
}

impl<T: Clone> AsyncOperation<T> {
    /// `name` is reported as `context.function` when a run fails.
    pub fn new(name: impl Into<String>, reporter: ErrorReporter) -> Self {
        Self {
            name: name.into(),
            reporter,
            initial_data: None,
            state: Mutex::new(AsyncState::initial(None)),
        }
    }

    /// Sets the data shown before the first run and restored by [`reset`](Self::reset).
    #[must_use]
    pub fn with_initial_data(mut self, data: T) -> Self {
        self.initial_data = Some(data.clone());
        self.state = Mutex::new(AsyncState::initial(Some(data)));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn state(&self) -> AsyncState<T> {
        lock(&self.state).clone()
    }

    pub fn reset(&self) {
        *lock(&self.state) = AsyncState::initial(self.initial_data.clone());
    }

    /// Runs `operation` to completion.
    ///
    /// On failure the error is reported with
    /// `{"context": "async_operation", "function": <name>}` and returned
    /// unchanged. Previously loaded data is kept.
    ///
    /// # Errors
    ///
    /// Returns whatever error `operation` failed with.
    pub async fn execute<F, E>(&self, token: &CancellationToken, operation: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: std::error::Error,
    {
        self.update(token, |state| {
            state.loading = true;
            state.error = None;
        });

        match operation.await {
            Ok(data) => {
                let stored = data.clone();
                self.update(token, move |state| {
                    state.data = Some(stored);
                    state.loading = false;
                    state.error = None;
                });
                Ok(data)
            }
            Err(error) => {
                let message = error.to_string();
                let message = if message.trim().is_empty() {
                    UNKNOWN_OPERATION_ERROR.to_string()
                } else {
                    message
                };
                self.update(token, |state| {
                    state.loading = false;
                    state.error = Some(message);
                });

                let mut context = Context::new();
                context.insert("context".into(), Value::from("async_operation"));
                context.insert("function".into(), Value::from(self.name.as_str()));
                if let Err(e) = self.report_failure(&error, context) {
                    tracing::warn!(operation = %self.name, error = %e, "failed to report operation error");
                }

                Err(error)
            }
        }
    }

    /// Errors whose text is blank are recorded as client errors with the
    /// fallback message.
    fn report_failure<E>(&self, error: &E, context: Context) -> crate::domain::Result<ErrorRecord>
    where
        E: std::error::Error,
    {
        match self.reporter.report_error(error, Some(context.clone())) {
            Err(ShellError::EmptyMessage) => self.reporter.report_typed(
                ErrorKind::Client,
                Severity::Medium,
                UNKNOWN_OPERATION_ERROR,
                ReportOptions {
                    context: Some(context),
                    ..ReportOptions::default()
                },
            ),
            reported => reported,
        }
    }

    fn update(&self, token: &CancellationToken, apply: impl FnOnce(&mut AsyncState<T>)) {
        if token.is_cancelled() {
            tracing::trace!(operation = %self.name, "state write skipped after cancellation");
            return;
        }
        apply(&mut lock(&self.state));
    }
}
