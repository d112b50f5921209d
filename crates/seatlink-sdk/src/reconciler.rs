//! Validates beacon inputs, fills blanks from the last known status and pushes
//! the resulting configuration to the server.

use seatlink_models::{
    parse_beacon_value, BeaconField, BeaconParams, ConfigUpdate, SessionId, StatusSnapshot,
    DEFAULT_MAJOR, DEFAULT_MINOR,
};
use tracing::info;

use crate::error::SdkError;
use crate::gateway::Gateway;

/// Raw text of the two beacon input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeaconInputs {
    /// Text of the `major` field.
    pub major: String,
    /// Text of the `minor` field.
    pub minor: String,
}

impl BeaconInputs {
    /// Both fields blank: every value comes from the fallbacks.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fields as typed.
    pub fn new(major: impl Into<String>, minor: impl Into<String>) -> Self {
        Self {
            major: major.into(),
            minor: minor.into(),
        }
    }
}

/// Fallback beacon pair for blank input fields.
///
/// Per field: venue-scoped value if reported, else the legacy value; a
/// missing snapshot, a zero or an out-of-range value yields the default.
pub fn fallback_params(snapshot: Option<&StatusSnapshot>) -> BeaconParams {
    let pick = |value: Option<u32>, default: u16| {
        value
            .and_then(|v| u16::try_from(v).ok())
            .filter(|v| *v != 0)
            .unwrap_or(default)
    };
    BeaconParams {
        major: pick(snapshot.map(StatusSnapshot::reported_major), DEFAULT_MAJOR),
        minor: pick(snapshot.map(StatusSnapshot::reported_minor), DEFAULT_MINOR),
    }
}

/// Turns user input into a `POST /config` call.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigReconciler;

impl ConfigReconciler {
    /// Validate both fields, then send the update.
    ///
    /// `session_id == None` is a parameters-only update: the server keeps the
    /// identifier it holds. Nothing is sent when validation fails. On success
    /// the submitted update is returned and the caller should refresh status.
    pub async fn submit(
        &self,
        gateway: &dyn Gateway,
        session_id: Option<&SessionId>,
        raw_major: &str,
        raw_minor: &str,
        fallback: BeaconParams,
    ) -> Result<ConfigUpdate, SdkError> {
        let params = Self::validate(raw_major, raw_minor, fallback)?;
        let update = ConfigUpdate::new(session_id, params);

        gateway.update_config(&update).await?;
        info!(
            major = params.major,
            minor = params.minor,
            rebinds = !update.keeps_session_id(),
            "configuration saved"
        );
        Ok(update)
    }

    /// Parameters-only save with fallbacks from `snapshot`.
    pub async fn save_parameters(
        &self,
        gateway: &dyn Gateway,
        inputs: &BeaconInputs,
        snapshot: Option<&StatusSnapshot>,
    ) -> Result<ConfigUpdate, SdkError> {
        self.submit(
            gateway,
            None,
            &inputs.major,
            &inputs.minor,
            fallback_params(snapshot),
        )
        .await
    }

    /// Parse both fields; `major` is checked first.
    pub fn validate(
        raw_major: &str,
        raw_minor: &str,
        fallback: BeaconParams,
    ) -> Result<BeaconParams, SdkError> {
        let major = parse_beacon_value(raw_major, fallback.major, BeaconField::Major)?;
        let minor = parse_beacon_value(raw_minor, fallback.minor, BeaconField::Minor)?;
        Ok(BeaconParams { major, minor })
    }
}
