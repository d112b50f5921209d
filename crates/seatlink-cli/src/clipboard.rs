//! System clipboard backed by `arboard`.

use async_trait::async_trait;
use seatlink_sdk::{ClipboardSource, SdkError};
use tracing::debug;

/// Reads the desktop clipboard on a blocking thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[async_trait]
impl ClipboardSource for SystemClipboard {
    async fn read_text(&self) -> Result<String, SdkError> {
        let read = tokio::task::spawn_blocking(|| {
            let mut clipboard = arboard::Clipboard::new()?;
            clipboard.get_text()
        })
        .await
        .map_err(|e| SdkError::ClipboardUnavailable(e.to_string()))?;

        match read {
            Ok(text) => Ok(text),
            // Empty clipboard or non-text content.
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => {
                debug!(error = %e, "clipboard backend unavailable");
                Err(SdkError::ClipboardUnavailable(e.to_string()))
            }
        }
    }
}
