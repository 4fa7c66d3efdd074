//! Heuristic failure classification.
//!
//! Kind detection is a case-sensitive substring match on the `message` field
//! of native errors and decoded objects. Plain strings carry no message field
//! and are never matched. It is best-effort and can miscategorize: a validation failure whose
//! message mentions "network" is classified as a network failure. Treat the
//! resulting kind as a hint, not as authoritative. Call sites that know the
//! precise classification should use
//! [`ErrorReporter::report_typed`](crate::reporting::ErrorReporter::report_typed).

use crate::domain::{
    Context, ErrorDraft, ErrorKind, ErrorPayload, ErrorRecord, RawError, Result, Severity,
};

const NETWORK_MARKERS: [&str; 2] = ["network", "fetch"];
const AUTHENTICATION_MARKERS: [&str; 2] = ["auth", "session"];
const AUTHORIZATION_MARKERS: [&str; 2] = ["permission", "unauthorized"];

/// Message used when a failure carries no usable text.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";
/// Message of every record produced by [`classify_network_failure`].
pub const NETWORK_FAILURE_MESSAGE: &str = "Network connection failed";
/// `details` of a network failure whose raw value had no message.
pub const NETWORK_FAILURE_DETAILS: &str = "Unable to connect to the server";
/// Message of a backend failure that carried no message field.
pub const UNKNOWN_BACKEND_ERROR_MESSAGE: &str = "An unknown backend error occurred";
/// Context key set on every record produced by [`classify_backend_failure`].
pub const BACKEND_ERROR_KEY: &str = "backendError";

/// Optional diagnostic fields for [`create_app_error`].
#[derive(Debug, Clone, Default)]
pub struct ErrorOptions {
    pub details: Option<String>,
    pub code: Option<crate::domain::ErrorCode>,
    pub stack: Option<String>,
    pub context: Option<Context>,
}

/// Builds a record directly from a known classification.
///
/// # Errors
///
/// Returns [`ShellError::EmptyMessage`](crate::domain::ShellError::EmptyMessage)
/// if the trimmed message is empty.
pub fn create_app_error(
    kind: ErrorKind,
    severity: Severity,
    message: &str,
    options: ErrorOptions,
) -> Result<ErrorRecord> {
    Ok(build_draft(kind, severity, message, options)?.finalize())
}

pub(crate) fn build_draft(
    kind: ErrorKind,
    severity: Severity,
    message: &str,
    options: ErrorOptions,
) -> Result<ErrorDraft> {
    let mut draft = ErrorDraft::new(kind, severity, message)?;
    if let Some(details) = options.details {
        draft = draft.with_details(details);
    }
    if let Some(code) = options.code {
        draft = draft.with_code(code);
    }
    if let Some(stack) = options.stack {
        draft = draft.with_stack(stack);
    }
    Ok(draft.merge_context(options.context))
}

/// Classifies a raw failure into a finalized record.
///
/// `context` is merged over whatever context the classifier attaches.
///
/// # Errors
///
/// Returns [`ShellError::EmptyMessage`](crate::domain::ShellError::EmptyMessage)
/// for a native error or string whose trimmed text is empty.
pub fn classify(raw: &RawError, context: Option<Context>) -> Result<ErrorRecord> {
    Ok(classify_draft(raw)?.merge_context(context).finalize())
}

/// Like [`classify`], but always yields a `network`/`high` record.
///
/// # Errors
///
/// Never fails in practice; the message is a fixed non-empty constant.
pub fn classify_network_failure(raw: &RawError, context: Option<Context>) -> Result<ErrorRecord> {
    Ok(network_failure_draft(raw)?.merge_context(context).finalize())
}

/// Classifies a failure returned by the backend client.
///
/// The backend's own message, code, details and stack are kept. Markers pick
/// the kind as in [`classify`]; an unmarked message is `unknown`/`medium`
/// rather than `client`. Every record carries `context.backendError = true`
/// and the raw value in `context.originalError`.
///
/// # Errors
///
/// Returns [`ShellError::EmptyMessage`](crate::domain::ShellError::EmptyMessage)
/// for a message made only of whitespace.
pub fn classify_backend_failure(raw: &RawError, context: Option<Context>) -> Result<ErrorRecord> {
    Ok(backend_failure_draft(raw)?.merge_context(context).finalize())
}

pub(crate) fn backend_failure_draft(raw: &RawError) -> Result<ErrorDraft> {
    let mut context = Context::new();
    context.insert(BACKEND_ERROR_KEY.to_string(), serde_json::Value::Bool(true));
    context.insert("originalError".to_string(), raw.to_value());

    let draft = match message_field(raw).filter(|payload| !payload.message.is_empty()) {
        Some(payload) => {
            let (kind, severity) = kind_from_message(&payload.message)
                .unwrap_or((ErrorKind::Unknown, Severity::Medium));
            payload_draft(kind, severity, payload)?
        }
        None => ErrorDraft::new(ErrorKind::Unknown, Severity::Medium, UNKNOWN_BACKEND_ERROR_MESSAGE)?,
    };
    Ok(draft.with_context(context))
}

/// Substring markers on a message, checked in priority order.
fn kind_from_message(message: &str) -> Option<(ErrorKind, Severity)> {
    let contains_any = |markers: &[&str]| markers.iter().any(|m| message.contains(m));

    if contains_any(&NETWORK_MARKERS) {
        Some((ErrorKind::Network, Severity::High))
    } else if contains_any(&AUTHENTICATION_MARKERS) {
        Some((ErrorKind::Authentication, Severity::Medium))
    } else if contains_any(&AUTHORIZATION_MARKERS) {
        Some((ErrorKind::Authorization, Severity::Medium))
    } else {
        None
    }
}

/// Payload of the shapes that expose a message field.
fn message_field(raw: &RawError) -> Option<&ErrorPayload> {
    match raw {
        RawError::Native(payload) | RawError::Object(payload) => Some(payload),
        RawError::Text(_) | RawError::Opaque(_) => None,
    }
}

/// True when the raw message field suggests a connectivity failure.
pub(crate) fn looks_like_network_failure(raw: &RawError) -> bool {
    message_field(raw).is_some_and(|payload| {
        NETWORK_MARKERS.iter().any(|m| payload.message.contains(m))
    })
}

fn payload_draft(kind: ErrorKind, severity: Severity, payload: &ErrorPayload) -> Result<ErrorDraft> {
    let mut draft = ErrorDraft::new(kind, severity, &payload.message)?;
    if let Some(code) = &payload.code {
        draft = draft.with_code(code.clone());
    }
    if let Some(details) = &payload.details {
        draft = draft.with_details(details.clone());
    }
    if let Some(stack) = &payload.stack {
        draft = draft.with_stack(stack.clone());
    }
    Ok(draft)
}

fn unknown_draft(raw: &RawError) -> Result<ErrorDraft> {
    let mut context = Context::new();
    context.insert("originalError".to_string(), raw.to_value());

    Ok(ErrorDraft::new(ErrorKind::Unknown, Severity::Medium, UNKNOWN_ERROR_MESSAGE)?
        .with_context(context))
}

pub(crate) fn classify_draft(raw: &RawError) -> Result<ErrorDraft> {
    let _span = tracing::trace_span!("classify", shape = shape_name(raw)).entered();

    if let Some(payload) = message_field(raw) {
        if let Some((kind, severity)) = kind_from_message(&payload.message) {
            return payload_draft(kind, severity, payload);
        }
    }

    match raw {
        RawError::Native(payload) => payload_draft(ErrorKind::Client, Severity::Medium, payload),
        RawError::Text(text) => ErrorDraft::new(ErrorKind::Unknown, Severity::Low, text),
        RawError::Object(_) | RawError::Opaque(_) => unknown_draft(raw),
    }
}

pub(crate) fn network_failure_draft(raw: &RawError) -> Result<ErrorDraft> {
    let details = raw
        .message()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(NETWORK_FAILURE_DETAILS);

    let mut context = Context::new();
    context.insert("originalError".to_string(), raw.to_value());

    Ok(ErrorDraft::new(ErrorKind::Network, Severity::High, NETWORK_FAILURE_MESSAGE)?
        .with_details(details)
        .with_context(context))
}

const fn shape_name(raw: &RawError) -> &'static str {
    match raw {
        RawError::Native(_) => "native",
        RawError::Object(_) => "object",
        RawError::Text(_) => "text",
        RawError::Opaque(_) => "opaque",
    }
}
