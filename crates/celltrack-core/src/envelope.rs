//! Result envelope returned by every gateway operation
//!
//! Three outcomes are kept apart: data, "no such row", and failure. On the
//! wire the envelope keeps the `{ success, message, data }` shape so callers
//! that only branch on `success` keep working; the extra `error` field carries
//! the stable code.

use serde::{Serialize, Serializer};

use crate::errors::{ExError, ExErrorKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    /// The operation succeeded
    Ok { message: String, data: T },
    /// A single-row lookup found nothing
    NotFound { message: String },
    /// The operation failed. `message` is safe to show; details are only logged.
    Error { code: &'static str, message: String },
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Envelope::Ok {
            message: message.into(),
            data,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Envelope::NotFound {
            message: message.into(),
        }
    }

    pub fn error(kind: ExErrorKind, message: impl Into<String>) -> Self {
        Envelope::Error {
            code: kind.code(),
            message: message.into(),
        }
    }

    /// Convert a failed operation into the caller-facing variant
    ///
    /// Not-found errors keep their own variant. Every other kind collapses into
    /// `Error` with the supplied generic message; the error's own message is
    /// never copied across.
    pub fn from_error(err: &ExError, failure_message: impl Into<String>) -> Self {
        match err.kind() {
            ExErrorKind::NotFound => Envelope::not_found(not_found_message(err)),
            kind => Envelope::error(kind, failure_message),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Ok { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Envelope::NotFound { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Envelope::Ok { message, .. }
            | Envelope::NotFound { message }
            | Envelope::Error { message, .. } => message,
        }
    }

    /// Stable error code, for `NotFound` and `Error`
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Envelope::Ok { .. } => None,
            Envelope::NotFound { .. } => Some(ExErrorKind::NotFound.code()),
            Envelope::Error { code, .. } => Some(*code),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Envelope::Ok { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Envelope::Ok { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Envelope<U> {
        match self {
            Envelope::Ok { message, data } => Envelope::Ok {
                message,
                data: f(data),
            },
            Envelope::NotFound { message } => Envelope::NotFound { message },
            Envelope::Error { code, message } => Envelope::Error { code, message },
        }
    }

    /// Borrowing view in the wire shape
    pub fn to_wire(&self) -> WireEnvelope<'_, T> {
        WireEnvelope {
            success: self.is_success(),
            message: self.message(),
            data: self.data(),
            error: self.error_code(),
        }
    }
}

fn not_found_message(err: &ExError) -> String {
    match err.entity() {
        Some(entity) => {
            let label = entity.label();
            let mut chars = label.chars();
            match chars.next() {
                Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
                None => "Not found".to_string(),
            }
        }
        None => "Not found".to_string(),
    }
}

/// `{ success, message, data?, error? }`
#[derive(Debug, Serialize)]
pub struct WireEnvelope<'a, T> {
    pub success: bool,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}
