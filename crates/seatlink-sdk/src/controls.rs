//! User-facing action controls with re-entrancy guards.
//!
//! Each control owns a [`ControlGuard`]. A press while a request is in flight
//! is rejected (`None`) instead of queued, and the guard is released when the
//! in-flight marker drops, on success and failure alike.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use seatlink_models::{FeedbackMessage, ACTION_FEEDBACK_LIFETIME};
use tracing::{info, warn};

use crate::error::SdkError;
use crate::gateway::Gateway;

/// Busy flag shared by one control.
#[derive(Debug, Clone, Default)]
pub struct ControlGuard {
    busy: Arc<AtomicBool>,
}

/// Held while a request is in flight; releases the guard on drop.
#[derive(Debug)]
#[must_use = "the guard is released as soon as this is dropped"]
pub struct InFlight {
    busy: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

impl ControlGuard {
    /// Mark the control busy, or `None` if it already is.
    pub fn try_begin(&self) -> Option<InFlight> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight {
                busy: Arc::clone(&self.busy),
            })
    }

    /// Whether a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Result of a completed press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlOutcome {
    /// Message to show for [`ACTION_FEEDBACK_LIFETIME`].
    pub feedback: FeedbackMessage,
    /// The server rejected the credential; the owner should log out.
    pub session_expired: bool,
    /// The action changed server state; the owner should refresh status.
    pub refresh_status: bool,
}

impl ControlOutcome {
    fn success(text: impl Into<String>) -> Self {
        Self {
            feedback: FeedbackMessage::success(text, ACTION_FEEDBACK_LIFETIME),
            session_expired: false,
            refresh_status: true,
        }
    }

    fn failure(prefix: &str, err: &SdkError) -> Self {
        Self {
            feedback: FeedbackMessage::error(
                format!("{prefix}: {}", err.user_message()),
                ACTION_FEEDBACK_LIFETIME,
            ),
            session_expired: err.is_invalid_credential(),
            refresh_status: false,
        }
    }
}

/// Display state of the auto check-in switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ToggleState {
    /// Auto check-in is off.
    Off,
    /// Auto check-in is on.
    On,
}

impl From<bool> for ToggleState {
    fn from(enabled: bool) -> Self {
        if enabled {
            ToggleState::On
        } else {
            ToggleState::Off
        }
    }
}

/// Two-state switch for the server-side auto check-in.
#[derive(Debug, Default)]
pub struct AutoCheckinToggle {
    on: AtomicBool,
    guard: ControlGuard,
}

impl AutoCheckinToggle {
    /// Switch starting in `initial`.
    pub fn new(initial: ToggleState) -> Self {
        Self {
            on: AtomicBool::new(initial == ToggleState::On),
            guard: ControlGuard::default(),
        }
    }

    /// Current display state.
    pub fn state(&self) -> ToggleState {
        self.on.load(Ordering::Acquire).into()
    }

    /// Whether an enable/disable request is in flight.
    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Adopt the server's flag unless a request is in flight.
    pub fn sync(&self, enabled: bool) {
        if !self.guard.is_busy() {
            self.on.store(enabled, Ordering::Release);
        }
    }

    /// Request the opposite state. `None` if a request is already in flight.
    ///
    /// The display flips only after the server accepted the change.
    pub async fn press(&self, gateway: &dyn Gateway) -> Option<ControlOutcome> {
        let _in_flight = self.guard.try_begin()?;

        let outcome = match self.state() {
            ToggleState::Off => match gateway.enable_auto_checkin().await {
                Ok(_) => {
                    self.on.store(true, Ordering::Release);
                    info!("auto check-in enabled");
                    ControlOutcome::success("Auto check-in enabled")
                }
                Err(e) => {
                    warn!(error = %e, "enabling auto check-in failed");
                    ControlOutcome::failure("Could not enable auto check-in", &e)
                }
            },
            ToggleState::On => match gateway.disable_auto_checkin().await {
                Ok(_) => {
                    self.on.store(false, Ordering::Release);
                    info!("auto check-in disabled");
                    ControlOutcome::success("Auto check-in disabled")
                }
                Err(e) => {
                    warn!(error = %e, "disabling auto check-in failed");
                    ControlOutcome::failure("Could not disable auto check-in", &e)
                }
            },
        };
        Some(outcome)
    }
}

/// Manual "check in now" button.
#[derive(Debug, Default)]
pub struct CheckinButton {
    guard: ControlGuard,
}

impl CheckinButton {
    /// Idle button.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a check-in is in flight.
    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Trigger one check-in. `None` if one is already in flight.
    pub async fn press(&self, gateway: &dyn Gateway) -> Option<ControlOutcome> {
        let _in_flight = self.guard.try_begin()?;

        let outcome = match gateway.trigger_checkin().await {
            Ok(report) if report.success == Some(false) => {
                let text = report
                    .message
                    .unwrap_or_else(|| "Check-in failed".to_string());
                warn!(message = %text, "check-in rejected");
                ControlOutcome {
                    feedback: FeedbackMessage::error(text, ACTION_FEEDBACK_LIFETIME),
                    session_expired: false,
                    refresh_status: true,
                }
            }
            Ok(report) => {
                info!("check-in triggered");
                ControlOutcome::success(
                    report
                        .message
                        .unwrap_or_else(|| "Check-in triggered".to_string()),
                )
            }
            Err(e) => {
                warn!(error = %e, "check-in request failed");
                ControlOutcome::failure("Check-in failed", &e)
            }
        };
        Some(outcome)
    }
}
