//! Error types for the `seatlink-models` crate.
//!
//! All fallible constructors and parsers in this crate return variants of
//! [`ModelError`].

use crate::beacon::BeaconField;

/// Errors produced when constructing or validating model types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A beacon field held text that is not an integer.
    #[error("{field} must be numeric")]
    NonNumericBeacon {
        /// Which beacon field failed.
        field: BeaconField,
        /// The offending raw value.
        value: String,
    },

    /// A beacon field was numeric but outside `1..=65535`.
    #[error("{field} out of range (1-65535)")]
    BeaconOutOfRange {
        /// Which beacon field failed.
        field: BeaconField,
        /// The offending raw value.
        value: String,
    },

    /// A session identifier returned by the resolver was blank.
    #[error("empty session identifier")]
    EmptySessionId,
}

impl ModelError {
    /// Short reason text without the field name.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NonNumericBeacon { .. } => "must be numeric",
            Self::BeaconOutOfRange { .. } => "out of range",
            Self::EmptySessionId => "empty session identifier",
        }
    }
}
