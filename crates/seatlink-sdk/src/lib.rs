//! # SeatLink SDK
//!
//! Headless client for the **SeatLink** library check-in service.
//!
//! The SDK provides:
//!
//! * [`AuthSession`] : login lifecycle over a [`CredentialStore`].
//! * [`Gateway`] / [`HttpGateway`] : typed access to the REST endpoints.
//! * [`SessionAcquisition`] : turns pasted text into a bound session.
//! * [`ConfigReconciler`] : validates beacon inputs and saves them.
//! * [`StatusPoller`] : background status fetches on a `watch` channel.
//! * [`AutoCheckinToggle`] / [`CheckinButton`] : guarded action controls.
//! * [`SdkError`] : unified error type for all SDK operations.
//!
//! Data types from [`seatlink_models`] are re-exported for convenience.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use seatlink_sdk::{
//!     AuthSession, BeaconInputs, ClientConfig, FileCredentialStore, HttpGateway,
//!     SessionAcquisition,
//! };
//!
//! # async fn run() -> Result<(), seatlink_sdk::SdkError> {
//! let config = ClientConfig::from_env();
//! let store = Arc::new(FileCredentialStore::new("/tmp/seatlink/credential.json"));
//! let gateway = Arc::new(HttpGateway::new(&config, store.clone())?);
//!
//! let mut auth = AuthSession::new(store, gateway.clone());
//! auth.login("alice", "secret").await?;
//!
//! let mut acquisition = SessionAcquisition::new(gateway);
//! let bound = acquisition
//!     .acquire_from_text(
//!         "https://example.com/cb?code=...&sid=0123456789abcdef0123456789abcdef",
//!         &BeaconInputs::empty(),
//!         None,
//!     )
//!     .await?;
//! println!("{}", bound.feedback().text);
//! # Ok(())
//! # }
//! ```

pub mod acquisition;
pub mod auth;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod controls;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod poller;
pub mod reconciler;

pub use acquisition::{Acquired, AcquisitionPath, ManualEntry, SessionAcquisition};
pub use auth::{AuthSession, AuthState};
pub use client::HttpGateway;
pub use clipboard::{ClipboardSource, StaticClipboard};
pub use config::ClientConfig;
pub use controls::{
    AutoCheckinToggle, CheckinButton, ControlGuard, ControlOutcome, InFlight, ToggleState,
};
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::SdkError;
pub use gateway::Gateway;
pub use poller::{PollState, PollerHandle, StatusPoller};
pub use reconciler::{fallback_params, BeaconInputs, ConfigReconciler};

// Re-export the data model for ergonomic usage.
pub use seatlink_models::{
    AccessToken, Ack, AdminUserSummary, BeaconField, BeaconParams, CheckinReport, ConfigUpdate,
    FeedbackKind, FeedbackMessage, SessionId, StatusSnapshot, UserProfile,
};
