//! Session identifiers and the identifier extractor.
//!
//! A [`SessionId`] names the user's bound external (WeChat) session. The
//! client never interprets it: it is either pulled out of pasted text by
//! [`extract_session_id`] or taken verbatim from the remote resolver.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Length of a locally recognisable identifier.
pub const SESSION_ID_HEX_LEN: usize = 32;

static HEX_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[0-9a-f]{32}").expect("valid hex-run pattern"));

/// Opaque session identifier.
///
/// `Debug` only prints a short prefix so the value never lands in logs.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Accept an identifier returned by the remote resolver.
    ///
    /// The resolver owns the format, so the only check is that the trimmed
    /// value is non-empty.
    pub fn from_resolved(raw: &str) -> Result<Self, ModelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptySessionId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters followed by an ellipsis, for display and logs.
    pub fn preview(&self) -> String {
        let head: String = self.0.chars().take(8).collect();
        format!("{head}…")
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionId").field(&self.preview()).finish()
    }
}

/// Find the first run of 32 hexadecimal characters in `text`.
///
/// Matching is case-insensitive and the match is returned with its case
/// preserved. When the text holds a longer hex run, its first 32 characters
/// are returned.
///
/// # Examples
///
/// ```
/// use seatlink_models::extract_session_id;
///
/// let text = "sid=AB12CD34AB12CD34AB12CD34AB12CD34&x=1";
/// let id = extract_session_id(text).unwrap();
/// assert_eq!(id.as_str(), "AB12CD34AB12CD34AB12CD34AB12CD34");
///
/// assert!(extract_session_id("").is_none());
/// assert!(extract_session_id("https://example.com/?code=xyz").is_none());
/// ```
pub fn extract_session_id(text: &str) -> Option<SessionId> {
    HEX_RUN
        .find(text)
        .map(|m| SessionId(m.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_prose() {
        let text = "your id is deadbeefdeadbeefdeadbeefdeadbeef, keep it safe";
        assert_eq!(
            extract_session_id(text).unwrap().as_str(),
            "deadbeefdeadbeefdeadbeefdeadbeef"
        );
    }

    #[test]
    fn preserves_case() {
        let text = "DeadBeefDEADBEEFdeadbeefDeAdBeEf";
        assert_eq!(extract_session_id(text).unwrap().as_str(), text);
    }

    #[test]
    fn extracts_from_url() {
        let text = "https://service/x?sid=AB12CD34AB12CD34AB12CD34AB12CD34";
        assert_eq!(
            extract_session_id(text).unwrap().as_str(),
            "AB12CD34AB12CD34AB12CD34AB12CD34"
        );
    }

    #[test]
    fn first_run_wins() {
        let a = "a".repeat(32);
        let b = "b".repeat(32);
        let text = format!("{a} {b}");
        assert_eq!(extract_session_id(&text).unwrap().as_str(), a);
    }

    #[test]
    fn longer_run_yields_its_prefix() {
        let text = "0123456789abcdef0123456789abcdef0123";
        assert_eq!(
            extract_session_id(text).unwrap().as_str(),
            "0123456789abcdef0123456789abcdef"
        );
    }

    #[test]
    fn no_match_cases() {
        assert!(extract_session_id("").is_none());
        assert!(extract_session_id("   ").is_none());
        assert!(extract_session_id(&"f".repeat(31)).is_none());
        assert!(extract_session_id("ghijklmnopqrstuvwxyzghijklmnopqrstuv").is_none());
        assert!(extract_session_id("https://open.weixin.qq.com/?code=071abc&state=1").is_none());
    }

    #[test]
    fn resolved_id_is_trimmed_and_non_empty() {
        let id = SessionId::from_resolved("  wechatSESS_ID=abc123 \n").unwrap();
        assert_eq!(id.as_str(), "wechatSESS_ID=abc123");
        assert_eq!(SessionId::from_resolved("  "), Err(ModelError::EmptySessionId));
    }

    #[test]
    fn debug_hides_full_value() {
        let id = SessionId::from_resolved("deadbeefdeadbeefdeadbeefdeadbeef").unwrap();
        let dbg = format!("{id:?}");
        assert!(dbg.contains("deadbeef…"));
        assert!(!dbg.contains("deadbeefdeadbeef"));
    }

    #[test]
    fn serde_is_transparent() {
        let id = SessionId::from_resolved("abc").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
