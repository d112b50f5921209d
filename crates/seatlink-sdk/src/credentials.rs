//! Credential store: the single persistent slot holding the bearer token.
//!
//! The store is mutated only by [`AuthSession`](crate::AuthSession); the
//! HTTP gateway reads it on every request and never caches the value.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use seatlink_models::AccessToken;
use tracing::{debug, warn};

use crate::error::SdkError;

/// Persistent key-value slot for the bearer credential.
pub trait CredentialStore: Send + Sync {
    /// Read the stored credential, `None` if there is none.
    fn load(&self) -> Result<Option<AccessToken>, SdkError>;
    /// Overwrite the stored credential.
    fn save(&self, token: &AccessToken) -> Result<(), SdkError>;
    /// Remove the stored credential. Removing an absent credential succeeds.
    fn clear(&self) -> Result<(), SdkError>;
}

/// JSON file in the user's config directory.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store the credential at `path`. Parent directories are created on save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<AccessToken>, SdkError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<AccessToken>(&content) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                // An unreadable slot is treated as "logged out".
                warn!(path = %self.path.display(), error = %e, "ignoring malformed credential file");
                Ok(None)
            }
        }
    }

    fn save(&self, token: &AccessToken) -> Result<(), SdkError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(token)?;
        fs::write(&self.path, json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        debug!(path = %self.path.display(), "credential saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SdkError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "credential removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store, for tests and for front ends that must not touch disk.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<AccessToken>>,
}

impl MemoryCredentialStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `token`.
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<AccessToken>, SdkError> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, token: &AccessToken) -> Result<(), SdkError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SdkError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_roundtrip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested").join("credential.json"));

        assert_eq!(store.load().unwrap(), None);

        store.save(&AccessToken::bearer("first")).unwrap();
        store.save(&AccessToken::bearer("second")).unwrap();
        assert_eq!(store.load().unwrap(), Some(AccessToken::bearer("second")));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // idempotent
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credential.json"));
        store.save(&AccessToken::bearer("t")).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn malformed_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credential.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(FileCredentialStore::new(path).load().unwrap(), None);
    }

    #[test]
    fn memory_store() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(&AccessToken::bearer("t")).unwrap();
        assert_eq!(store.load().unwrap().unwrap().as_str(), "t");
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
