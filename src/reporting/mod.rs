//! Error reporting facade.
//!
//! Application code reports failures here instead of writing to the
//! [`ErrorLog`](crate::store::ErrorLog) directly.
//!
//! # Modules
//!
//! - [`reporter`]: Classify-and-store entry point
//! - [`async_op`]: Tracked async operations that report their failures
//! - [`cancel`]: Cancellation flag for in-flight operations

pub mod async_op;
pub mod cancel;
pub mod reporter;

pub use async_op::{AsyncOperation, AsyncState};
pub use cancel::CancellationToken;
pub use reporter::{ErrorReporter, ReportOptions};
