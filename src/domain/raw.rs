//! Raw failure values, decoded into a closed set of shapes.
//!
//! Whatever an operation fails with is first turned into a [`RawError`] before
//! classification. There are exactly four shapes; nothing outside this set is
//! inspected.

use super::record::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message-bearing failure payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            details: None,
            stack: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

/// A failure value as it was raised, before classification.
#[derive(Debug, Clone, PartialEq)]
pub enum RawError {
    /// A native error value (anything implementing `std::error::Error`).
    Native(ErrorPayload),
    /// A plain structured value that exposes a `message` field.
    Object(ErrorPayload),
    /// A bare string.
    Text(String),
    /// Anything else, including `null`.
    Opaque(Value),
}

impl RawError {
    /// Captures a native error. The source chain, if any, becomes `details`.
    pub fn from_error<E: std::error::Error + ?Sized>(error: &E) -> Self {
        let mut payload = ErrorPayload::new(error.to_string());

        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        if !chain.is_empty() {
            payload.details = Some(chain.join(": "));
        }

        Self::Native(payload)
    }

    /// Decodes a JSON value into one of the known shapes.
    ///
    /// Strings become [`RawError::Text`]; objects with a non-empty string
    /// `message` become [`RawError::Object`] (with `code`, `details` and `stack`
    /// picked up when they have the expected types); everything else is kept
    /// verbatim as [`RawError::Opaque`].
    #[must_use]
    pub fn decode(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Object(map) => {
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(String::from);
                let Some(message) = message else {
                    return Self::Opaque(Value::Object(map));
                };

                let code = match map.get("code") {
                    Some(Value::String(s)) if !s.is_empty() => Some(ErrorCode::Text(s.clone())),
                    Some(Value::Number(n)) => n.as_i64().map(ErrorCode::Number),
                    _ => None,
                };
                let text_field = |key: &str| {
                    map.get(key)
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                };

                Self::Object(ErrorPayload {
                    message,
                    code,
                    details: text_field("details"),
                    stack: text_field("stack"),
                })
            }
            other => Self::Opaque(other),
        }
    }

    /// The message text carried by this failure, if its shape has one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Native(payload) | Self::Object(payload) => Some(&payload.message),
            Self::Text(text) => Some(text),
            Self::Opaque(_) => None,
        }
    }

    /// JSON rendition of the raw value, stored as `context.originalError`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Native(payload) | Self::Object(payload) => {
                serde_json::to_value(payload).unwrap_or(Value::Null)
            }
            Self::Text(text) => Value::String(text.clone()),
            Self::Opaque(value) => value.clone(),
        }
    }
}

impl From<&str> for RawError {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawError {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Value> for RawError {
    fn from(value: Value) -> Self {
        Self::decode(value)
    }
}

impl From<std::io::Error> for RawError {
    fn from(error: std::io::Error) -> Self {
        Self::from_error(&error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, thiserror::Error)]
    #[error("request failed")]
    struct Outer {
        #[source]
        inner: std::io::Error,
    }

    #[test]
    fn native_error_keeps_source_chain_as_details() {
        let err = Outer {
            inner: std::io::Error::new(std::io::ErrorKind::Other, "socket closed"),
        };

        let RawError::Native(payload) = RawError::from_error(&err) else {
            panic!("expected native shape");
        };
        assert_eq!(payload.message, "request failed");
        assert_eq!(payload.details.as_deref(), Some("socket closed"));
    }

    #[test]
    fn decode_recognizes_message_objects() {
        let raw = RawError::decode(json!({
            "message": "permission denied",
            "code": "42501",
            "details": "row level security",
            "hint": null
        }));

        assert_eq!(
            raw,
            RawError::Object(
                ErrorPayload::new("permission denied")
                    .with_code("42501")
                    .with_details("row level security")
            )
        );
    }

    #[test]
    fn decode_treats_empty_message_as_opaque() {
        let value = json!({ "message": "" });
        assert_eq!(RawError::decode(value.clone()), RawError::Opaque(value));
    }

    #[test]
    fn decode_keeps_strings_and_scalars_apart() {
        assert_eq!(RawError::decode(json!("oops")), RawError::Text("oops".into()));
        assert_eq!(RawError::decode(json!(7)), RawError::Opaque(json!(7)));
        assert_eq!(RawError::decode(Value::Null).message(), None);
    }
}
