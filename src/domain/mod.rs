//! Domain layer for the application shell.
//!
//! This module contains the core data types of the error-management subsystem,
//! independent of how they are stored, reported or rendered.
//!
//! # Organization
//!
//! - [`error`]: Crate error type and result alias
//! - [`record`]: Error records, kinds, severities and drafts
//! - [`raw`]: Raw failure shapes decoded before classification
//! - [`connection`]: Backend reachability state
//!
//! # Examples
//!
//! ```
//! use app_shell::domain::{ErrorDraft, ErrorKind, Result, Severity};
//!
//! fn build() -> Result<ErrorDraft> {
//!     ErrorDraft::new(ErrorKind::Validation, Severity::Low, "Email is required")
//! }
//! # assert!(build().is_ok());
//! ```

pub mod connection;
pub mod error;
pub mod raw;
pub mod record;

pub use connection::{ConnectionState, ConnectionStatus};
pub use error::{Result, ShellError};
pub use raw::{ErrorPayload, RawError};
pub use record::{create_error_id, Context, ErrorCode, ErrorDraft, ErrorKind, ErrorRecord, Severity};
