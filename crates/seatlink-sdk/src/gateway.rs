//! Typed request/response boundary to the remote service.
//!
//! [`Gateway`] is object-safe so components hold an `Arc<dyn Gateway>` and
//! tests can swap in an in-memory fake. [`HttpGateway`](crate::HttpGateway)
//! is the production implementation.

use async_trait::async_trait;
use seatlink_models::{
    AccessToken, Ack, AdminUserSummary, CheckinReport, ConfigUpdate, RegisterRequest, SessionId,
    StatusSnapshot, UserProfile,
};

use crate::error::SdkError;

/// Operations offered by the remote check-in service.
///
/// Implementations attach the stored credential (if any) to every call and
/// report HTTP 401 on authenticated calls as [`SdkError::InvalidCredential`].
#[async_trait]
pub trait Gateway: Send + Sync {
    // ------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------

    /// Exchange username and password for a bearer credential.
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, SdkError>;

    /// Create an account. Does not log in.
    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, SdkError>;

    /// Profile of the current credential.
    async fn profile(&self) -> Result<UserProfile, SdkError>;

    // ------------------------------------------------------------------
    // Session binding and status
    // ------------------------------------------------------------------

    /// Current status snapshot.
    async fn status(&self) -> Result<StatusSnapshot, SdkError>;

    /// Store a new configuration. An empty `session_id` keeps the current one.
    async fn update_config(&self, update: &ConfigUpdate) -> Result<Ack, SdkError>;

    /// Resolve a pasted redirect URL into a session identifier server-side.
    async fn resolve_session_id(&self, url: &str) -> Result<SessionId, SdkError>;

    // ------------------------------------------------------------------
    // Check-in
    // ------------------------------------------------------------------

    /// Run one check-in now.
    async fn trigger_checkin(&self) -> Result<CheckinReport, SdkError>;

    /// Ask the server to re-validate the bound session.
    async fn keep_alive(&self) -> Result<Ack, SdkError>;

    /// Turn the server-side auto check-in on.
    async fn enable_auto_checkin(&self) -> Result<Ack, SdkError>;

    /// Turn the server-side auto check-in off.
    async fn disable_auto_checkin(&self) -> Result<Ack, SdkError>;

    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    /// All users with their configuration summary.
    async fn admin_users(&self) -> Result<Vec<AdminUserSummary>, SdkError>;

    /// Delete a user.
    async fn admin_delete_user(&self, user_id: i64) -> Result<Ack, SdkError>;

    /// Force a check-in for a user.
    async fn admin_checkin(&self, user_id: i64) -> Result<CheckinReport, SdkError>;
}
