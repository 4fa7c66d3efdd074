//! Error record domain model.
//!
//! An [`ErrorRecord`] is one classified failure instance. Records are created
//! once, stored by the [`ErrorLog`](crate::store::ErrorLog), and only ever
//! removed, never mutated. An [`ErrorDraft`] is the same record before the log
//! assigns it an id and a creation timestamp.

use super::error::{Result, ShellError};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form key/value bag carrying provenance for a record.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// Category of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Connectivity or transport failure.
    Network,
    /// The user's identity could not be established (expired session, bad login).
    Authentication,
    /// The user is known but lacks permission.
    Authorization,
    /// Input was rejected.
    Validation,
    /// The backend failed.
    Server,
    /// A failure raised by the client itself.
    Client,
    /// Anything that could not be categorized.
    Unknown,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Network,
        Self::Authentication,
        Self::Authorization,
        Self::Validation,
        Self::Server,
        Self::Client,
        Self::Unknown,
    ];

    /// Lowercase name used in serialized records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::Validation => "validation",
            Self::Server => "server",
            Self::Client => "client",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered urgency tag, `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Lowercase name used in serialized records and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Notification heading for this severity.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Critical => "Critical Error",
            Self::High => "Error",
            Self::Medium => "Warning",
            Self::Low => "Notice",
        }
    }

    /// Parses a severity name, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic code attached to a failure; backends report either form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    Text(String),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ErrorCode {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ErrorCode {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ErrorCode {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// An error record that has not been stored yet.
///
/// Drafts are validated on construction: the message is trimmed and must not be
/// empty. The optional diagnostic fields are set with the `with_*` builders.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDraft {
    kind: ErrorKind,
    severity: Severity,
    message: String,
    details: Option<String>,
    code: Option<ErrorCode>,
    stack: Option<String>,
    context: Option<Context>,
}

impl ErrorDraft {
    /// Creates a draft with a trimmed message.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::EmptyMessage`] if `message` is empty or whitespace-only.
    pub fn new(kind: ErrorKind, severity: Severity, message: impl AsRef<str>) -> Result<Self> {
        let message = message.as_ref().trim();
        if message.is_empty() {
            return Err(ShellError::EmptyMessage);
        }

        Ok(Self {
            kind,
            severity,
            message: message.to_string(),
            details: None,
            code: None,
            stack: None,
            context: None,
        })
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Replaces the context bag.
    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Merges `extra` into the existing context. Keys in `extra` win on collision.
    #[must_use]
    pub fn merge_context(mut self, extra: Option<Context>) -> Self {
        let Some(extra) = extra else {
            return self;
        };

        let merged = self.context.get_or_insert_with(Context::new);
        for (key, value) in extra {
            merged.insert(key, value);
        }
        self
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// Assigns a fresh id and the current time, producing an immutable record.
    #[must_use]
    pub fn finalize(self) -> ErrorRecord {
        ErrorRecord {
            id: create_error_id(),
            kind: self.kind,
            severity: self.severity,
            message: self.message,
            details: self.details,
            code: self.code,
            stack: self.stack,
            context: self.context,
            created_at: Utc::now(),
        }
    }
}

/// One classified failure instance.
///
/// Fields are read-only; a record is never changed after [`ErrorDraft::finalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    id: String,
    kind: ErrorKind,
    severity: Severity,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<Context>,
    created_at: DateTime<Utc>,
}

impl ErrorRecord {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    #[must_use]
    pub const fn code(&self) -> Option<&ErrorCode> {
        self.code.as_ref()
    }

    #[must_use]
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    #[must_use]
    pub const fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// Looks up a single context entry.
    #[must_use]
    pub fn context_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.context.as_ref().and_then(|ctx| ctx.get(key))
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Generates a record id: `error_<unix millis>_<9 random base36 chars>`.
#[must_use]
pub fn create_error_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect();

    format!("error_{}_{suffix}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_trims_message() {
        let draft = ErrorDraft::new(ErrorKind::Client, Severity::Medium, "  boom \n").unwrap();
        assert_eq!(draft.message(), "boom");
    }

    #[test]
    fn draft_rejects_blank_messages() {
        for message in ["", "   ", "\t\n"] {
            let result = ErrorDraft::new(ErrorKind::Unknown, Severity::Low, message);
            assert!(matches!(result, Err(ShellError::EmptyMessage)), "{message:?}");
        }
    }

    #[test]
    fn merge_context_prefers_incoming_keys() {
        let mut base = Context::new();
        base.insert("source".into(), json!("classifier"));
        base.insert("originalError".into(), json!(42));

        let mut extra = Context::new();
        extra.insert("source".into(), json!("caller"));

        let record = ErrorDraft::new(ErrorKind::Unknown, Severity::Medium, "x")
            .unwrap()
            .with_context(base)
            .merge_context(Some(extra))
            .finalize();

        assert_eq!(record.context_value("source"), Some(&json!("caller")));
        assert_eq!(record.context_value("originalError"), Some(&json!(42)));
    }

    #[test]
    fn merge_context_creates_bag_when_missing() {
        let mut extra = Context::new();
        extra.insert("component".into(), json!("header"));

        let draft = ErrorDraft::new(ErrorKind::Unknown, Severity::Medium, "x")
            .unwrap()
            .merge_context(Some(extra));

        assert_eq!(draft.context().map(Context::len), Some(1));
    }

    #[test]
    fn error_id_has_expected_shape() {
        let id = create_error_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "error");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn severity_is_ordered() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(Severity::parse(" Critical "), Some(Severity::Critical));
        assert_eq!(Severity::parse("fatal"), None);
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let record = ErrorDraft::new(ErrorKind::Server, Severity::High, "down")
            .unwrap()
            .with_code(503_i64)
            .finalize();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["kind"], json!("server"));
        assert_eq!(value["severity"], json!("high"));
        assert_eq!(value["code"], json!(503));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("details").is_none());
    }
}
