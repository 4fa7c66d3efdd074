//! Notification rendering.
//!
//! Consumes the error log's read contract through
//! [`AppState`](crate::app::AppState) and turns it into ANSI-styled text.
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready alert and status types
//! - [`renderer`]: Frame assembly and output
//! - [`components`]: Alert stack and status indicator
//! - [`helpers`]: Truncation and color wrappers
//! - [`theme`]: Color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_frame};
pub use theme::Theme;
pub use viewmodel::{AlertItem, NotificationsViewModel, ShellViewModel, StatusViewModel};
