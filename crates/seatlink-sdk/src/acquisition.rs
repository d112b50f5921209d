//! Session acquisition: pasted text in, bound session identifier out.
//!
//! ```text
//! clipboard / manual field ──► trim ──► local extract ──┐
//!                                   └─► remote resolve ─┴─► reconcile ──► Acquired
//! ```
//!
//! A locally extracted identifier never touches the network before the
//! config update. The manual-entry field is revealed when the clipboard
//! cannot be read and is cleared and hidden after a successful bind.

use std::sync::Arc;

use seatlink_models::{
    extract_session_id, ConfigUpdate, FeedbackMessage, SessionId, StatusSnapshot,
    CONFIG_FEEDBACK_LIFETIME,
};
use tracing::{debug, info, warn};

use crate::clipboard::ClipboardSource;
use crate::error::SdkError;
use crate::gateway::Gateway;
use crate::reconciler::{fallback_params, BeaconInputs, ConfigReconciler};

/// State of the manual paste affordance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualEntry {
    /// Whether the field is shown.
    pub visible: bool,
    /// Current field content.
    pub text: String,
}

impl ManualEntry {
    fn reset(&mut self) {
        self.visible = false;
        self.text.clear();
    }
}

/// How the identifier was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AcquisitionPath {
    /// Found in the text without a network call.
    Extracted,
    /// Produced by the remote resolver.
    Resolved,
}

/// Successful acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquired {
    /// The identifier now bound server-side.
    pub session_id: SessionId,
    /// How it was obtained.
    pub path: AcquisitionPath,
    /// The update that was sent.
    pub update: ConfigUpdate,
    /// The caller should refresh status now.
    pub refresh_status: bool,
}

impl Acquired {
    /// Success feedback for the binding result.
    pub fn feedback(&self) -> FeedbackMessage {
        FeedbackMessage::success(
            format!(
                "Session bound ({}), beacon {}/{}",
                self.session_id.preview(),
                self.update.venue_major,
                self.update.venue_minor
            ),
            CONFIG_FEEDBACK_LIFETIME,
        )
    }
}

/// Drives one bind attempt at a time for a single user session.
pub struct SessionAcquisition {
    gateway: Arc<dyn Gateway>,
    reconciler: ConfigReconciler,
    manual: ManualEntry,
}

impl SessionAcquisition {
    /// Pipeline over `gateway`, manual entry hidden.
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            reconciler: ConfigReconciler,
            manual: ManualEntry::default(),
        }
    }

    /// Current manual-entry state.
    pub fn manual_entry(&self) -> &ManualEntry {
        &self.manual
    }

    /// Show the manual-entry field.
    pub fn reveal_manual_entry(&mut self) {
        self.manual.visible = true;
    }

    /// Replace the manual-entry text.
    pub fn set_manual_text(&mut self, text: impl Into<String>) {
        self.manual.text = text.into();
    }

    /// Bind the identifier found in (or resolved from) `text`.
    ///
    /// Blank beacon inputs fall back to the values in `snapshot`.
    pub async fn acquire_from_text(
        &mut self,
        text: &str,
        inputs: &BeaconInputs,
        snapshot: Option<&StatusSnapshot>,
    ) -> Result<Acquired, SdkError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SdkError::EmptyInput);
        }

        let (session_id, path) = match extract_session_id(trimmed) {
            Some(id) => (id, AcquisitionPath::Extracted),
            None => {
                debug!("no identifier in text, asking the resolver");
                let id = self
                    .gateway
                    .resolve_session_id(trimmed)
                    .await
                    .map_err(|e| {
                        if e.is_invalid_credential() {
                            return e;
                        }
                        warn!(error = %e, "identifier resolution failed");
                        SdkError::ResolutionFailed {
                            detail: e.server_detail().map(str::to_string),
                        }
                    })?;
                (id, AcquisitionPath::Resolved)
            }
        };

        let update = self
            .reconciler
            .submit(
                self.gateway.as_ref(),
                Some(&session_id),
                &inputs.major,
                &inputs.minor,
                fallback_params(snapshot),
            )
            .await?;

        self.manual.reset();
        info!(session = %session_id.preview(), %path, "session bound");
        Ok(Acquired {
            session_id,
            path,
            update,
            refresh_status: true,
        })
    }

    /// Read the clipboard and bind what it holds.
    ///
    /// An unreadable clipboard reveals the manual-entry field.
    pub async fn acquire_from_clipboard(
        &mut self,
        clipboard: &dyn ClipboardSource,
        inputs: &BeaconInputs,
        snapshot: Option<&StatusSnapshot>,
    ) -> Result<Acquired, SdkError> {
        let text = match clipboard.read_text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "clipboard read failed");
                self.reveal_manual_entry();
                return Err(match e {
                    SdkError::ClipboardUnavailable(_) => e,
                    other => SdkError::ClipboardUnavailable(other.to_string()),
                });
            }
        };
        self.acquire_from_text(&text, inputs, snapshot).await
    }

    /// Bind the text held in the manual-entry field.
    pub async fn submit_manual_input(
        &mut self,
        inputs: &BeaconInputs,
        snapshot: Option<&StatusSnapshot>,
    ) -> Result<Acquired, SdkError> {
        let text = self.manual.text.clone();
        self.acquire_from_text(&text, inputs, snapshot).await
    }
}
