use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The application-level status the backend uses to signal success.
pub const SUCCESS_STATUS: u16 = 200;

/// The generic `{ "data": ... }` wrapper around most backend payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct DataEnvelope<T> {
    /// The wrapped payload
    pub data: T,
}

impl<T> DataEnvelope<T> {
    /// Wrap a payload.
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Unwrap the payload.
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// A well-formed response whose envelope reports a non-success status.
///
/// This is distinct from transport failures: the backend answered, but said no.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("backend reported status {status_code}{}", describe(.message))]
pub struct ApplicationError {
    /// The status code carried inside the envelope
    pub status_code: u16,
    /// The accompanying message, when the backend provides one
    pub message: Option<String>,
}

fn describe(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}
