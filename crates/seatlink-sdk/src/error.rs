//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK. Pipeline failures (`EmptyInput`,
//! `ResolutionFailed`, ...) sit next to the transport wrappers so callers can
//! match on the outcome they care about and render the rest through
//! [`SdkError::user_message`].

use seatlink_models::{BeaconField, ModelError};

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// The pasted or typed text was empty or whitespace-only.
    #[error("input is empty")]
    EmptyInput,

    /// No identifier in the text and the remote resolver could not produce one.
    #[error("could not resolve a session identifier{}", fmt_detail(.detail))]
    ResolutionFailed {
        /// Server-provided explanation, if any.
        detail: Option<String>,
    },

    /// The system clipboard could not be read (denied or unsupported).
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// A beacon field failed validation.
    #[error("{field} {reason}")]
    InvalidParameter {
        /// Which field failed.
        field: BeaconField,
        /// `"must be numeric"` or `"out of range"`.
        reason: &'static str,
    },

    /// The remote service answered with a non-success status.
    #[error("gateway error{}{}", fmt_status(.status), fmt_detail(.detail))]
    Gateway {
        /// HTTP status code.
        status: Option<u16>,
        /// Server-provided `detail` message, if any.
        detail: Option<String>,
    },

    /// The stored credential was rejected (HTTP 401 on an authenticated call).
    #[error("credential rejected by the server")]
    InvalidCredential,

    /// Invalid or missing client configuration (e.g. bad base URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

fn fmt_detail(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl From<ModelError> for SdkError {
    fn from(e: ModelError) -> Self {
        match &e {
            ModelError::NonNumericBeacon { field, .. } | ModelError::BeaconOutOfRange { field, .. } => {
                SdkError::InvalidParameter {
                    field: *field,
                    reason: e.reason(),
                }
            }
            ModelError::EmptySessionId => SdkError::ResolutionFailed { detail: None },
        }
    }
}

impl SdkError {
    /// The server's `detail` message carried by this error, if any.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            SdkError::Gateway { detail, .. } | SdkError::ResolutionFailed { detail } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    /// `true` when the stored credential must be discarded.
    pub fn is_invalid_credential(&self) -> bool {
        matches!(self, SdkError::InvalidCredential)
    }

    /// Short human-readable cause, suitable for a feedback message.
    pub fn user_message(&self) -> String {
        match self {
            SdkError::EmptyInput => "Nothing to paste: the input is empty".to_string(),
            SdkError::ResolutionFailed { detail: Some(d) } => d.clone(),
            SdkError::ResolutionFailed { detail: None } => {
                "Could not parse the link; make sure it is the latest one".to_string()
            }
            SdkError::ClipboardUnavailable(_) => {
                "Cannot read the clipboard; paste the link manually".to_string()
            }
            SdkError::InvalidParameter { .. } => self.to_string(),
            SdkError::Gateway { detail: Some(d), .. } => d.clone(),
            SdkError::Gateway {
                status: Some(s),
                detail: None,
            } => format!("Request failed (HTTP {s})"),
            SdkError::Gateway { .. } => "Request failed".to_string(),
            SdkError::InvalidCredential => "Login expired; please log in again".to_string(),
            SdkError::Http(_) => "Network error; please retry".to_string(),
            SdkError::Config(_) | SdkError::Serialization(_) | SdkError::Io(_) => self.to_string(),
        }
    }
}
