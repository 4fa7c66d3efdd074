//! Runtime that ties the stores to the notification state.
//!
//! [`AppShell`] owns the [`AppState`], subscribes to both stores, and executes
//! the actions the handler returns. Store changes are queued as events and
//! applied in order on the next [`dispatch`](AppShell::dispatch) or
//! [`sync`](AppShell::sync).

use super::actions::Action;
use super::handler::{handle_event, Event};
use super::state::AppState;
use crate::domain::Result;
use crate::reporting::ErrorReporter;
use crate::store::{lock, ConnectionMonitor, Subscription};
use crate::ui;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
pub struct AppShell {
    state: AppState,
    reporter: ErrorReporter,
    monitor: Arc<ConnectionMonitor>,
    pending: Arc<Mutex<VecDeque<Event>>>,
    _subscriptions: [Subscription; 2],
}

impl AppShell {
    /// Wires `state` to the stores and seeds it with their current contents.
    #[must_use]
    pub fn new(mut state: AppState, reporter: ErrorReporter, monitor: Arc<ConnectionMonitor>) -> Self {
        let pending = Arc::new(Mutex::new(VecDeque::new()));

        let queue = Arc::clone(&pending);
        let log_subscription = reporter.subscribe(move |snapshot| {
            lock(&queue).push_back(Event::LogChanged(snapshot.clone()));
        });
        let queue = Arc::clone(&pending);
        let connection_subscription = monitor.subscribe(move |connection| {
            lock(&queue).push_back(Event::ConnectionChanged(connection.clone()));
        });

        state.records = reporter.records();
        state.connection = monitor.state();

        Self {
            state,
            reporter,
            monitor,
            pending,
            _subscriptions: [log_subscription, connection_subscription],
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Handle for reporting failures from application code.
    #[must_use]
    pub const fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    #[must_use]
    pub const fn monitor(&self) -> &Arc<ConnectionMonitor> {
        &self.monitor
    }

    /// Handles `event`, runs the resulting actions, then applies any store
    /// changes they caused. Returns whether a re-render is needed.
    ///
    /// Store changes queued before `event` are applied first, so the handler
    /// resolves positions and ids against the current log.
    ///
    /// A failed connection check is already recorded and reported by the
    /// monitor, so it does not fail the dispatch.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub async fn dispatch(&mut self, event: Event) -> Result<bool> {
        lock(&self.pending).push_back(event);
        self.sync().await
    }

    /// Applies queued store changes. Returns whether a re-render is needed.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub async fn sync(&mut self) -> Result<bool> {
        let mut needs_render = false;
        while let Some(event) = self.next_pending() {
            let (render, actions) = handle_event(&mut self.state, &event)?;
            needs_render |= render;
            for action in actions {
                self.execute(action).await;
            }
        }
        Ok(needs_render)
    }

    /// Renders the current frame as ANSI text.
    #[must_use]
    pub fn frame(&self, cols: usize) -> String {
        ui::render_frame(&self.state.compute_viewmodel(), &self.state.theme, cols)
    }

    fn next_pending(&self) -> Option<Event> {
        lock(&self.pending).pop_front()
    }

    async fn execute(&self, action: Action) {
        tracing::debug!(action = ?action, "executing action");
        match action {
            Action::RemoveRecord { id } => {
                if !self.reporter.remove(&id) {
                    tracing::debug!(error_id = %id, "record already dismissed");
                }
            }
            Action::ClearRecords => self.reporter.clear(),
            Action::CheckConnection => {
                if let Err(e) = self.monitor.check().await {
                    tracing::debug!(error = %e, "connection check failed");
                }
            }
            Action::ResetConnection => self.monitor.reset(),
        }
    }
}
