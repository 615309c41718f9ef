//! Error taxonomy for the request flows.
//!
//! Every variant is terminal at the flow boundary: the app converts it into a
//! toast and restores the flow's busy state. Nothing here is fatal to the
//! session.

use thiserror::Error;

use crate::core::input::MIN_INPUT_CHARS;

/// Failure of an upload, analysis or preview round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// The selected file is not a `.pdf` or `.txt` file. No request was made.
    #[error("unsupported file type: {extension:?}")]
    InvalidFileType {
        /// The rejected extension (lowercased, empty when the file has none).
        extension: String,
    },
    /// The story text is too short to analyze. No request was made.
    #[error("input too short: {length} characters (need at least {min})", min = MIN_INPUT_CHARS)]
    InsufficientInput {
        /// Character count of the trimmed story text.
        length: usize,
    },
    /// The service answered with a non-success status, or reported an error
    /// in its response body.
    #[error("service error (status {status}){}", message_suffix(.message))]
    RemoteError {
        /// HTTP status code of the reply.
        status: u16,
        /// Message the service put in an `error` field, if any.
        message: Option<String>,
    },
    /// Network failure, unreadable body, malformed JSON or a local read error.
    #[error("transport error: {0}")]
    TransportError(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl FlowError {
    /// Returns true for failures detected locally, before any network call.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidFileType { .. } | Self::InsufficientInput { .. }
        )
    }

    /// Returns the message reported by the service, if one was present.
    #[must_use]
    pub fn reported_message(&self) -> Option<&str> {
        match self {
            Self::RemoteError {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FlowError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}
