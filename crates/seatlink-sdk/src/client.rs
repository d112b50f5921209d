//! HTTP implementation of [`Gateway`].
//!
//! [`HttpGateway`] speaks JSON over REST. The bearer credential is read from
//! the [`CredentialStore`] on every request, so a logout in one component is
//! seen by all others on their next call.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use seatlink_sdk::{ClientConfig, Gateway, HttpGateway, MemoryCredentialStore};
//!
//! # async fn run() -> Result<(), seatlink_sdk::SdkError> {
//! let config = ClientConfig::from_env();
//! let gateway = HttpGateway::new(&config, Arc::new(MemoryCredentialStore::new()))?;
//! let snapshot = gateway.status().await?;
//! println!("configured: {}", snapshot.is_configured());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use seatlink_models::{
    AccessToken, Ack, AdminUserSummary, CheckinReport, ConfigUpdate, RegisterRequest,
    ResolveRequest, ResolveResponse, SessionId, StatusSnapshot, UserProfile,
};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::error::SdkError;
use crate::gateway::Gateway;

/// Error body returned by the service: `{"detail": "..."}`.
///
/// Validation errors carry a list in `detail`; only string details are
/// surfaced to the user.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// REST client for the check-in service.
#[derive(Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpGateway {
    /// Build a gateway from a validated configuration.
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, SdkError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            credentials,
        })
    }

    /// REST base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Request plumbing
    // ------------------------------------------------------------------

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, SdkError> {
        let mut req = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = self.credentials.load()? {
            req = req.bearer_auth(token.as_str());
        }
        Ok(req)
    }

    /// Send an authenticated request; 401 becomes [`SdkError::InvalidCredential`].
    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, SdkError> {
        let res = req.send().await?;
        if res.status() == StatusCode::UNAUTHORIZED {
            warn!("credential rejected by the server");
            return Err(SdkError::InvalidCredential);
        }
        Self::decode(res).await
    }

    /// Send an unauthenticated request; every non-2xx becomes a gateway error.
    async fn send_anonymous<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<T, SdkError> {
        let res = req.send().await?;
        Self::decode(res).await
    }

    async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, SdkError> {
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail)
                .and_then(|d| d.as_str().map(str::to_string));
            debug!(status = status.as_u16(), detail = ?detail, "request failed");
            return Err(SdkError::Gateway {
                status: Some(status.as_u16()),
                detail,
            });
        }

        let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, SdkError> {
        let req = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .form(&[("username", username), ("password", password)]);
        self.send_anonymous(req).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, SdkError> {
        let req = self
            .http
            .post(format!("{}/auth/register", self.base_url))
            .json(request);
        self.send_anonymous(req).await
    }

    async fn profile(&self) -> Result<UserProfile, SdkError> {
        self.send(self.request(Method::GET, "/auth/me")?).await
    }

    async fn status(&self) -> Result<StatusSnapshot, SdkError> {
        self.send(self.request(Method::GET, "/status")?).await
    }

    async fn update_config(&self, update: &ConfigUpdate) -> Result<Ack, SdkError> {
        debug!(?update, "updating configuration");
        self.send(self.request(Method::POST, "/config")?.json(update))
            .await
    }

    async fn resolve_session_id(&self, url: &str) -> Result<SessionId, SdkError> {
        let body = ResolveRequest {
            url: url.to_string(),
        };
        let res: ResolveResponse = self
            .send(self.request(Method::POST, "/parse-sessionid")?.json(&body))
            .await?;
        Ok(SessionId::from_resolved(&res.session_id)?)
    }

    async fn trigger_checkin(&self) -> Result<CheckinReport, SdkError> {
        self.send(self.request(Method::POST, "/checkin")?).await
    }

    async fn keep_alive(&self) -> Result<Ack, SdkError> {
        self.send(self.request(Method::POST, "/keepalive")?).await
    }

    async fn enable_auto_checkin(&self) -> Result<Ack, SdkError> {
        self.send(self.request(Method::POST, "/auto-checkin/enable")?)
            .await
    }

    async fn disable_auto_checkin(&self) -> Result<Ack, SdkError> {
        self.send(self.request(Method::POST, "/auto-checkin/disable")?)
            .await
    }

    async fn admin_users(&self) -> Result<Vec<AdminUserSummary>, SdkError> {
        self.send(self.request(Method::GET, "/admin/users")?).await
    }

    async fn admin_delete_user(&self, user_id: i64) -> Result<Ack, SdkError> {
        self.send(self.request(Method::DELETE, &format!("/admin/users/{user_id}"))?)
            .await
    }

    async fn admin_checkin(&self, user_id: i64) -> Result<CheckinReport, SdkError> {
        self.send(self.request(Method::POST, &format!("/admin/users/{user_id}/checkin"))?)
            .await
    }
}
