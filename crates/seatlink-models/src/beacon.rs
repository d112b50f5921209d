//! Venue beacon parameters.
//!
//! A venue is located by a bluetooth beacon identified by two integers,
//! `major` and `minor`. Both must be in `1..=65535`; the server reports `0`
//! for a value it does not know yet.

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Default `major` used when neither the user nor the server supplies one.
pub const DEFAULT_MAJOR: u16 = 20;
/// Default `minor` used when neither the user nor the server supplies one.
pub const DEFAULT_MINOR: u16 = 9;

/// Names one of the two beacon fields, used in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BeaconField {
    /// The `major` value.
    Major,
    /// The `minor` value.
    Minor,
}

/// A complete, validated `(major, minor)` pair.
///
/// # Examples
///
/// ```
/// use seatlink_models::BeaconParams;
///
/// let params = BeaconParams::new(20, 9).unwrap();
/// assert_eq!(params, BeaconParams::default());
/// assert!(BeaconParams::new(0, 9).is_none());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BeaconParams {
    /// Beacon major number.
    pub major: u16,
    /// Beacon minor number.
    pub minor: u16,
}

impl BeaconParams {
    /// Build a pair, returning `None` if either value is zero.
    pub fn new(major: u16, minor: u16) -> Option<Self> {
        (major != 0 && minor != 0).then_some(Self { major, minor })
    }
}

impl Default for BeaconParams {
    fn default() -> Self {
        Self {
            major: DEFAULT_MAJOR,
            minor: DEFAULT_MINOR,
        }
    }
}

/// Parse one raw beacon field as typed by the user.
///
/// * empty / whitespace-only input yields `fallback` unchanged;
/// * anything that is not an integer fails with
///   [`ModelError::NonNumericBeacon`];
/// * an integer outside `1..=65535` fails with
///   [`ModelError::BeaconOutOfRange`].
pub fn parse_beacon_value(raw: &str, fallback: u16, field: BeaconField) -> Result<u16, ModelError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(fallback);
    }

    let value = match trimmed.parse::<i64>() {
        Ok(v) => v,
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(ModelError::BeaconOutOfRange {
                field,
                value: trimmed.to_string(),
            });
        }
        Err(_) => {
            return Err(ModelError::NonNumericBeacon {
                field,
                value: trimmed.to_string(),
            });
        }
    };

    match u16::try_from(value) {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err(ModelError::BeaconOutOfRange {
            field,
            value: trimmed.to_string(),
        }),
    }
}
