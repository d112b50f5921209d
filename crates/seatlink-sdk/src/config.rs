//! Client configuration.
//!
//! Built once at startup from environment variables and then handed to the
//! HTTP gateway, the credential store and the status poller. Front ends may
//! override individual fields (the CLI does so from its flags).

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::SdkError;

/// Default REST base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
/// Default status polling interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const APP_DIR: &str = "seatlink";
const CREDENTIAL_FILE: &str = "credential.json";

/// Settings shared by all SDK components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST base URL, e.g. `https://seat.example.com/api`.
    pub api_url: String,
    /// Interval between status polls.
    pub poll_interval: Duration,
    /// Per-request timeout of the HTTP gateway.
    pub request_timeout: Duration,
    /// Explicit credential file; `None` uses the platform config directory.
    pub credential_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            credential_file: None,
        }
    }
}

impl ClientConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                      | Default                     | Description               |
    /// |-------------------------------|-----------------------------|---------------------------|
    /// | `SEATLINK_API_URL`            | `http://localhost:8000/api` | REST base URL             |
    /// | `SEATLINK_POLL_INTERVAL_SECS` | `10`                        | Status polling interval   |
    /// | `SEATLINK_TIMEOUT_SECS`       | `20`                        | Per-request timeout       |
    /// | `SEATLINK_CREDENTIAL_FILE`    | platform config dir         | Where the login is stored |
    ///
    /// Unparseable or zero durations fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
                .map_or(default, Duration::from_secs)
        };

        Self {
            api_url: lookup("SEATLINK_API_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            poll_interval: secs("SEATLINK_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL),
            request_timeout: secs("SEATLINK_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT),
            credential_file: lookup("SEATLINK_CREDENTIAL_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Check that `api_url` is an absolute `http(s)` URL.
    pub fn validate(&self) -> Result<(), SdkError> {
        let parsed = Url::parse(&self.api_url)
            .map_err(|e| SdkError::Config(format!("invalid api url {:?}: {e}", self.api_url)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(SdkError::Config(format!(
                "api url must use http or https, got {other}"
            ))),
        }
    }

    /// `api_url` without a trailing slash, ready for `format!("{base}/path")`.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Resolved credential file location.
    ///
    /// Returns `None` when no explicit file is configured and the platform
    /// has no config directory.
    pub fn credential_path(&self) -> Option<PathBuf> {
        self.credential_file
            .clone()
            .or_else(|| dirs::config_dir().map(|d| d.join(APP_DIR).join(CREDENTIAL_FILE)))
    }
}
