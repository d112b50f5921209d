//! Request and response bodies exchanged with the remote service.

use serde::{Deserialize, Serialize};

use crate::beacon::BeaconParams;
use crate::session::SessionId;

/// Body of `POST /config`.
///
/// An empty `session_id` asks the server to keep the identifier it already
/// holds and only update the beacon pair.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ConfigUpdate {
    /// New identifier, or empty to keep the current one.
    pub session_id: String,
    /// Beacon major, sent under the venue-scoped name.
    pub venue_major: u16,
    /// Beacon minor, sent under the venue-scoped name.
    pub venue_minor: u16,
}

impl ConfigUpdate {
    /// Build an update; `None` keeps the server-side identifier.
    pub fn new(session_id: Option<&SessionId>, params: BeaconParams) -> Self {
        Self {
            session_id: session_id.map(|s| s.as_str().to_string()).unwrap_or_default(),
            venue_major: params.major,
            venue_minor: params.minor,
        }
    }

    /// `true` when this update leaves the bound identifier untouched.
    pub fn keeps_session_id(&self) -> bool {
        self.session_id.is_empty()
    }

    /// The beacon pair carried by this update.
    pub fn params(&self) -> BeaconParams {
        BeaconParams {
            major: self.venue_major,
            minor: self.venue_minor,
        }
    }
}

impl std::fmt::Debug for ConfigUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigUpdate")
            .field("keeps_session_id", &self.keeps_session_id())
            .field("venue_major", &self.venue_major)
            .field("venue_minor", &self.venue_minor)
            .finish()
    }
}

/// Body of `POST /parse-sessionid`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    /// The pasted redirect URL, trimmed.
    pub url: String,
}

/// Response of `POST /parse-sessionid`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResolveResponse {
    /// Identifier resolved by the server.
    pub session_id: String,
}

/// Response of `POST /checkin` and the admin forced check-in.
///
/// Fields are optional so any JSON object is accepted as an acknowledgement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckinReport {
    /// Whether the remote check-in succeeded.
    #[serde(default)]
    pub success: Option<bool>,
    /// Human-readable result.
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Ack {
    /// Optional server message.
    #[serde(default)]
    pub message: Option<String>,
}
