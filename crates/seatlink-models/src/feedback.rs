//! Short-lived feedback messages shown after a user action.

use std::time::{Duration, Instant};

/// Display lifetime of feedback from the check-in and toggle controls.
pub const ACTION_FEEDBACK_LIFETIME: Duration = Duration::from_secs(2);
/// Display lifetime of feedback from session binding and parameter saves.
pub const CONFIG_FEEDBACK_LIFETIME: Duration = Duration::from_secs(3);

/// Tone of a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum FeedbackKind {
    /// The action succeeded.
    Success,
    /// The action failed.
    Error,
}

/// A `(kind, text)` pair that dismisses itself after `lifetime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMessage {
    /// Tone.
    pub kind: FeedbackKind,
    /// Human-readable text.
    pub text: String,
    /// How long the message stays visible.
    pub lifetime: Duration,
    /// When the message was created.
    pub created_at: Instant,
}

impl FeedbackMessage {
    /// A success message created now.
    pub fn success(text: impl Into<String>, lifetime: Duration) -> Self {
        Self::new(FeedbackKind::Success, text, lifetime)
    }

    /// An error message created now.
    pub fn error(text: impl Into<String>, lifetime: Duration) -> Self {
        Self::new(FeedbackKind::Error, text, lifetime)
    }

    fn new(kind: FeedbackKind, text: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            kind,
            text: text.into(),
            lifetime,
            created_at: Instant::now(),
        }
    }

    /// Instant after which the message should be dismissed.
    pub fn expires_at(&self) -> Instant {
        self.created_at + self.lifetime
    }

    /// `true` once `now` has reached the expiry instant.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }

    /// `true` for [`FeedbackKind::Success`].
    pub fn is_success(&self) -> bool {
        self.kind == FeedbackKind::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_lifetime() {
        let msg = FeedbackMessage::success("saved", CONFIG_FEEDBACK_LIFETIME);
        assert!(!msg.is_expired(msg.created_at));
        assert!(!msg.is_expired(msg.created_at + Duration::from_millis(2_999)));
        assert!(msg.is_expired(msg.created_at + CONFIG_FEEDBACK_LIFETIME));
    }

    #[test]
    fn kind_display() {
        assert_eq!(FeedbackKind::Success.to_string(), "success");
        assert_eq!(FeedbackKind::Error.to_string(), "error");
        assert!(!FeedbackMessage::error("nope", ACTION_FEEDBACK_LIFETIME).is_success());
    }
}
