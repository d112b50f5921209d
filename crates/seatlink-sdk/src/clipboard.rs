//! Clipboard access seam.
//!
//! The SDK never touches the system clipboard directly; front ends hand in a
//! [`ClipboardSource`] (the CLI wraps `arboard`).

use async_trait::async_trait;

use crate::error::SdkError;

/// Source of plain text copied by the user.
#[async_trait]
pub trait ClipboardSource: Send + Sync {
    /// Current clipboard text. An empty clipboard yields `Ok("")`; a denied or
    /// unsupported clipboard yields [`SdkError::ClipboardUnavailable`].
    async fn read_text(&self) -> Result<String, SdkError>;
}

/// Fixed-content clipboard, for tests and scripted input.
#[derive(Debug, Clone, Default)]
pub struct StaticClipboard {
    content: Option<String>,
}

impl StaticClipboard {
    /// Clipboard holding `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
        }
    }

    /// Clipboard that always fails to read.
    pub fn unavailable() -> Self {
        Self { content: None }
    }
}

#[async_trait]
impl ClipboardSource for StaticClipboard {
    async fn read_text(&self) -> Result<String, SdkError> {
        self.content
            .clone()
            .ok_or_else(|| SdkError::ClipboardUnavailable("no clipboard".to_string()))
    }
}
