//! Server-reported status snapshot and its derived display fields.
//!
//! The remote service exposes the beacon pair under two names: the
//! venue-scoped `venue_major` / `venue_minor` and the legacy `major` /
//! `minor`. Newer servers send both, older ones only the legacy pair. Readers
//! must prefer the venue-scoped value and fall back to the legacy one.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::beacon::BeaconParams;

/// Values of `last_checkin` meaning "no check-in has happened yet".
pub const NEVER_SENTINELS: [&str; 2] = ["Never", "从未"];

/// Substring of `last_checkin_result` marking a successful check-in.
pub const SUCCESS_MARKER: &str = "成功";

/// Server timestamp format of `last_checkin`.
pub const CHECKIN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Read-only view of the user's configuration and check-in state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusSnapshot {
    /// Whether a session identifier is bound server-side.
    #[serde(default)]
    pub is_configured: bool,
    /// Truncated identifier preview for display.
    #[serde(default)]
    pub session_id_preview: String,
    /// Legacy beacon major.
    #[serde(default)]
    pub major: u32,
    /// Legacy beacon minor.
    #[serde(default)]
    pub minor: u32,
    /// Venue-scoped beacon major.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_major: Option<u32>,
    /// Venue-scoped beacon minor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_minor: Option<u32>,
    /// Last check-in timestamp, or one of [`NEVER_SENTINELS`].
    #[serde(default)]
    pub last_checkin: String,
    /// Free-form result text of the last check-in.
    #[serde(default)]
    pub last_checkin_result: String,
    /// Whether the server-side auto check-in is running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_checkin_enabled: Option<bool>,
}

impl StatusSnapshot {
    /// Whether a session identifier is bound.
    pub fn is_configured(&self) -> bool {
        self.is_configured
    }

    /// Reported `major`: venue-scoped when present, else legacy.
    pub fn reported_major(&self) -> u32 {
        self.venue_major.unwrap_or(self.major)
    }

    /// Reported `minor`: venue-scoped when present, else legacy.
    pub fn reported_minor(&self) -> u32 {
        self.venue_minor.unwrap_or(self.minor)
    }

    /// The reported pair, if both values are usable beacon numbers.
    pub fn beacon_params(&self) -> Option<BeaconParams> {
        let major = u16::try_from(self.reported_major()).ok()?;
        let minor = u16::try_from(self.reported_minor()).ok()?;
        BeaconParams::new(major, minor)
    }

    /// Both reported beacon values are non-zero.
    pub fn is_beacon_configured(&self) -> bool {
        self.reported_major() != 0 && self.reported_minor() != 0
    }

    /// `last_checkin` is a "never" sentinel.
    pub fn last_checkin_is_never(&self) -> bool {
        NEVER_SENTINELS.contains(&self.last_checkin.as_str())
    }

    /// `last_checkin_result` contains the success marker.
    pub fn last_result_succeeded(&self) -> bool {
        self.last_checkin_result.contains(SUCCESS_MARKER)
    }

    /// Whether auto check-in is running; absent means off.
    pub fn auto_checkin_enabled(&self) -> bool {
        self.auto_checkin_enabled.unwrap_or(false)
    }

    /// Result text with the server's wording normalised for display.
    pub fn display_result_text(&self) -> String {
        self.last_checkin_result
            .replacen("签到成功:", "签到成功：", 1)
            .replacen("扫码成功", "到馆验证成功", 1)
    }

    /// Time-of-day part of the last check-in, `--:--` when there is none.
    pub fn checkin_time_label(&self) -> String {
        if self.last_checkin_is_never() {
            return "--:--".to_string();
        }
        match NaiveDateTime::parse_from_str(&self.last_checkin, CHECKIN_TIMESTAMP_FORMAT) {
            Ok(ts) => ts.format("%H:%M:%S").to_string(),
            Err(_) => self
                .last_checkin
                .split(' ')
                .nth(1)
                .unwrap_or(&self.last_checkin)
                .to_string(),
        }
    }

    /// Month and day of the last check-in, `no record` when there is none.
    pub fn checkin_date_label(&self) -> String {
        if self.last_checkin_is_never() {
            return "no record".to_string();
        }
        match NaiveDateTime::parse_from_str(&self.last_checkin, CHECKIN_TIMESTAMP_FORMAT) {
            Ok(ts) => ts.format("%m-%d").to_string(),
            Err(_) => self
                .last_checkin
                .split(' ')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}
