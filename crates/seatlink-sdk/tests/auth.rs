mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use common::{FakeGateway, Failure};
use seatlink_sdk::{
    AccessToken, AuthSession, AuthState, CredentialStore, MemoryCredentialStore, SdkError,
};

/// Memory store whose writes can be made to fail.
#[derive(Default)]
struct ReadOnlyStore {
    inner: MemoryCredentialStore,
    read_only: AtomicBool,
}

impl CredentialStore for ReadOnlyStore {
    fn load(&self) -> Result<Option<AccessToken>, SdkError> {
        self.inner.load()
    }

    fn save(&self, token: &AccessToken) -> Result<(), SdkError> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied).into());
        }
        self.inner.save(token)
    }

    fn clear(&self) -> Result<(), SdkError> {
        self.inner.clear()
    }
}

fn session(fake: &Arc<FakeGateway>, store: &Arc<MemoryCredentialStore>) -> AuthSession {
    AuthSession::new(store.clone(), fake.clone())
}

#[tokio::test]
async fn refresh_without_credential_stays_offline() {
    let fake = FakeGateway::new();
    let store = Arc::new(MemoryCredentialStore::new());
    let mut auth = session(&fake, &store);

    let state = auth.refresh().await.unwrap();
    assert_eq!(*state, AuthState::Anonymous);
    assert_eq!(fake.total_calls(), 0);
}

#[tokio::test]
async fn refresh_with_rejected_credential_logs_out() {
    let fake = FakeGateway::new();
    fake.fail("profile", Failure::Unauthorized);
    let store = Arc::new(MemoryCredentialStore::with_token(AccessToken::bearer("stale")));
    let mut auth = session(&fake, &store);
    let token = auth.session_token();

    let state = auth.refresh().await.unwrap();
    assert_eq!(*state, AuthState::Anonymous);
    assert_eq!(store.load().unwrap(), None);
    assert!(token.is_cancelled());
}

#[tokio::test]
async fn refresh_with_valid_credential_restores_profile() {
    let fake = FakeGateway::new();
    let store = Arc::new(MemoryCredentialStore::with_token(AccessToken::bearer("ok")));
    let mut auth = session(&fake, &store);

    auth.refresh().await.unwrap();
    assert!(auth.is_authenticated());
    assert_eq!(auth.profile().unwrap().username, "alice");
    assert_eq!(fake.calls("profile"), 1);
}

#[tokio::test]
async fn login_persists_credential() {
    let fake = FakeGateway::new();
    let store = Arc::new(MemoryCredentialStore::new());
    let mut auth = session(&fake, &store);

    let profile = auth.login("alice", "pw").await.unwrap();
    assert_eq!(profile.username, "alice");
    assert!(auth.is_authenticated());
    assert_eq!(store.load().unwrap(), Some(AccessToken::bearer("token-alice")));
}

#[tokio::test]
async fn login_rejected_leaves_store_untouched() {
    let fake = FakeGateway::new();
    fake.fail("login", Failure::Status(401, Some("用户名或密码错误")));
    let store = Arc::new(MemoryCredentialStore::new());
    let mut auth = session(&fake, &store);

    let err = auth.login("alice", "bad").await.unwrap_err();
    assert_eq!(err.server_detail(), Some("用户名或密码错误"));
    assert_eq!(store.load().unwrap(), None);
    assert_eq!(fake.calls("profile"), 0);
}

#[tokio::test]
async fn profile_failure_after_login_discards_credential() {
    let fake = FakeGateway::new();
    fake.fail("profile", Failure::Status(500, None));
    let store = Arc::new(MemoryCredentialStore::new());
    let mut auth = session(&fake, &store);

    let err = auth.login("alice", "pw").await.unwrap_err();
    assert!(matches!(err, SdkError::Gateway { status: Some(500), .. }));
    assert_eq!(*auth.state(), AuthState::Anonymous);
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn logout_is_idempotent_and_stops_session_work() {
    let fake = FakeGateway::new();
    let store = Arc::new(MemoryCredentialStore::new());
    let mut auth = session(&fake, &store);
    auth.login("alice", "pw").await.unwrap();

    let token = auth.session_token();
    assert!(!token.is_cancelled());

    auth.logout().unwrap();
    auth.logout().unwrap();
    assert!(token.is_cancelled());
    assert!(auth.profile().is_none());
    assert_eq!(store.load().unwrap(), None);

    // A new login gets a fresh, live token.
    auth.login("alice", "pw").await.unwrap();
    assert!(!auth.session_token().is_cancelled());
}

#[tokio::test]
async fn register_does_not_log_in() {
    let fake = FakeGateway::new();
    let store = Arc::new(MemoryCredentialStore::new());
    let auth = session(&fake, &store);

    let profile = auth.register("bob", "pw").await.unwrap();
    assert_eq!(profile.username, "bob");
    assert!(!auth.is_authenticated());
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn failed_credential_write_keeps_the_current_session() {
    let fake = FakeGateway::new();
    let store = Arc::new(ReadOnlyStore::default());
    let mut auth = AuthSession::new(store.clone(), fake.clone());
    auth.login("alice", "pw").await.unwrap();
    let token = auth.session_token();

    store.read_only.store(true, Ordering::SeqCst);
    let err = auth.login("bob", "pw").await.unwrap_err();
    assert!(matches!(err, SdkError::Io(_)));

    assert!(!token.is_cancelled());
    assert!(auth.is_authenticated());
    assert_eq!(auth.profile().map(|p| p.username.as_str()), Some("alice"));
    assert_eq!(store.load().unwrap(), Some(AccessToken::bearer("token-alice")));
}
