//! Login lifecycle.
//!
//! [`AuthSession`] is the only writer of the [`CredentialStore`]. Work scoped
//! to a login (the status poller) hangs off [`AuthSession::session_token`]
//! and stops when the user logs out.

use std::sync::Arc;

use seatlink_models::{RegisterRequest, UserProfile};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::credentials::CredentialStore;
use crate::error::SdkError;
use crate::gateway::Gateway;

/// Where the session stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No credential, or the credential was discarded.
    #[default]
    Anonymous,
    /// A stored credential is being checked against the server.
    Restoring,
    /// The credential is valid for this user.
    Authenticated(UserProfile),
}

/// Owns the credential and the profile of the logged-in user.
pub struct AuthSession {
    store: Arc<dyn CredentialStore>,
    gateway: Arc<dyn Gateway>,
    state: AuthState,
    session: CancellationToken,
}

impl AuthSession {
    /// Anonymous session. Call [`refresh`](Self::refresh) to pick up a stored
    /// credential.
    pub fn new(store: Arc<dyn CredentialStore>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            store,
            gateway,
            state: AuthState::Anonymous,
            session: CancellationToken::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Profile of the logged-in user.
    pub fn profile(&self) -> Option<&UserProfile> {
        match &self.state {
            AuthState::Authenticated(p) => Some(p),
            _ => None,
        }
    }

    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    /// Gateway shared with the other components.
    pub fn gateway(&self) -> Arc<dyn Gateway> {
        Arc::clone(&self.gateway)
    }

    /// Token cancelled on the next logout.
    pub fn session_token(&self) -> CancellationToken {
        self.session.child_token()
    }

    /// Exchange credentials, persist the bearer and load the profile.
    ///
    /// If the profile cannot be loaded the new credential is discarded and
    /// the error returned.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<UserProfile, SdkError> {
        let token = self.gateway.login(username, password).await?;
        self.store.save(&token)?;
        self.end_session();
        self.state = AuthState::Restoring;

        match self.gateway.profile().await {
            Ok(profile) => {
                info!(user = %profile.username, admin = profile.is_admin, "logged in");
                self.state = AuthState::Authenticated(profile.clone());
                Ok(profile)
            }
            Err(e) => {
                warn!(error = %e, "profile fetch after login failed, discarding credential");
                self.logout()?;
                Err(e)
            }
        }
    }

    /// Forget the credential and stop session-scoped work. Idempotent.
    pub fn logout(&mut self) -> Result<(), SdkError> {
        self.end_session();
        let was_authenticated = !matches!(self.state, AuthState::Anonymous);
        self.state = AuthState::Anonymous;
        self.store.clear()?;
        if was_authenticated {
            info!("logged out");
        }
        Ok(())
    }

    /// Re-validate the stored credential.
    ///
    /// Without a credential the session becomes anonymous without a network
    /// call. A credential the server will not accept is discarded.
    pub async fn refresh(&mut self) -> Result<&AuthState, SdkError> {
        if self.store.load()?.is_none() {
            self.state = AuthState::Anonymous;
            return Ok(&self.state);
        }

        self.state = AuthState::Restoring;
        match self.gateway.profile().await {
            Ok(profile) => {
                self.state = AuthState::Authenticated(profile);
            }
            Err(e) => {
                warn!(error = %e, "stored credential could not be restored");
                self.logout()?;
            }
        }
        Ok(&self.state)
    }

    /// Create an account. The session stays as it is.
    pub async fn register(&self, username: &str, password: &str) -> Result<UserProfile, SdkError> {
        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let profile = self.gateway.register(&request).await?;
        info!(user = %profile.username, "account registered");
        Ok(profile)
    }

    fn end_session(&mut self) {
        self.session.cancel();
        self.session = CancellationToken::new();
    }
}
