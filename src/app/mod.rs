//! Application layer: notification state, events, and actions.
//!
//! ```text
//! user input ──▶ Event ──▶ handle_event ──▶ AppState + Vec<Action>
//!                  ▲                                   │
//!                  │                            AppShell::execute
//!                  │                                   ▼
//!        LogChanged / ConnectionChanged ◀── ErrorLog / ConnectionMonitor
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Store commands emitted by the handler
//! - [`handler`]: Event processing
//! - [`modes`]: Detail level
//! - [`state`]: Notification settings and view model computation
//! - [`shell`]: Runtime wiring stores to state

pub mod actions;
pub mod handler;
pub mod modes;
pub mod shell;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::DetailLevel;
pub use shell::AppShell;
pub use state::AppState;
