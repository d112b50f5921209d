//! Account-level types: bearer credential, user profile, admin rows.

use serde::{Deserialize, Serialize};

/// Bearer credential issued by `POST /auth/login`.
///
/// `Debug` redacts the token.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Opaque bearer token.
    pub access_token: String,
    /// Token type, `"bearer"` in practice.
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl AccessToken {
    /// Wrap a raw bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            access_token: token.into(),
            token_type: default_token_type(),
        }
    }

    /// The raw token value.
    pub fn as_str(&self) -> &str {
        &self.access_token
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Authenticated identity as reported by `GET /auth/me`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Numeric user id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Whether the account may use the admin endpoints.
    #[serde(default)]
    pub is_admin: bool,
    /// Creation timestamp as formatted by the server.
    #[serde(default)]
    pub created_at: String,
}

/// Body of `POST /auth/register`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Desired login name.
    pub username: String,
    /// Desired password.
    pub password: String,
}

/// One row of `GET /admin/users`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdminUserSummary {
    /// User id.
    pub user_id: i64,
    /// Login name.
    pub username: String,
    /// Whether the user bound a session.
    #[serde(default)]
    pub is_configured: bool,
    /// Last check-in timestamp or a "never" sentinel.
    #[serde(default)]
    pub last_checkin: String,
    /// Server-side status label.
    #[serde(default)]
    pub status: String,
}
