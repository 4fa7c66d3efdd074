//! Shared state stores.
//!
//! Both stores are constructed once (see [`initialize`](crate::initialize)) and
//! shared through `Arc`. They expose read snapshots, a handful of write
//! operations, and change subscriptions.
//!
//! # Modules
//!
//! - [`error_log`]: Ordered log of error records
//! - [`connection`]: Backend reachability state and probing
//! - [`diagnostics`]: Secondary output for critical records
//! - [`subscription`]: Listener registry and unsubscribe handles

pub mod connection;
pub mod diagnostics;
pub mod error_log;
pub mod subscription;

pub use connection::{ConnectionMonitor, Probe, CONNECTION_CHECK_SOURCE};
pub use diagnostics::{DiagnosticSink, FileDiagnostics, StderrDiagnostics};
pub use error_log::{ErrorLog, LogSnapshot};
pub use subscription::{Listener, Subscription};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks `mutex`, recovering the data if a listener panicked while it was held.
///
/// Every store write replaces state in a single step, so a poisoned guard
/// still holds a consistent value.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
