//! In-memory gateway shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use seatlink_models::{
    AccessToken, Ack, AdminUserSummary, CheckinReport, ConfigUpdate, RegisterRequest, SessionId,
    StatusSnapshot, UserProfile,
};
use seatlink_sdk::{Gateway, SdkError};
use tokio::sync::Notify;

/// Canned failure for one operation.
#[derive(Debug, Clone)]
pub enum Failure {
    /// Non-2xx answer with an optional `detail`.
    Status(u16, Option<&'static str>),
    /// 401 on an authenticated call.
    Unauthorized,
}

impl Failure {
    fn to_error(&self) -> SdkError {
        match self {
            Failure::Status(status, detail) => SdkError::Gateway {
                status: Some(*status),
                detail: detail.map(str::to_string),
            },
            Failure::Unauthorized => SdkError::InvalidCredential,
        }
    }
}

/// Scripted stand-in for the remote service.
///
/// Every call is recorded by operation name. Config updates and auto
/// check-in toggles are reflected in the next status snapshot, like the real
/// server.
#[derive(Default)]
pub struct FakeGateway {
    calls: Mutex<Vec<&'static str>>,
    failures: Mutex<HashMap<&'static str, Failure>>,
    gates: Mutex<HashMap<&'static str, Arc<Notify>>>,
    status: Mutex<StatusSnapshot>,
    updates: Mutex<Vec<ConfigUpdate>>,
    resolved: Mutex<Option<String>>,
    resolve_inputs: Mutex<Vec<String>>,
    checkin: Mutex<CheckinReport>,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_status(status: StatusSnapshot) -> Arc<Self> {
        let fake = Self::default();
        *fake.status.lock().unwrap() = status;
        Arc::new(fake)
    }

    /// Make `op` fail until [`succeed`](Self::succeed) is called.
    pub fn fail(&self, op: &'static str, failure: Failure) {
        self.failures.lock().unwrap().insert(op, failure);
    }

    pub fn succeed(&self, op: &'static str) {
        self.failures.lock().unwrap().remove(op);
    }

    /// Block `op` until the returned notify fires.
    pub fn hold(&self, op: &'static str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(op, Arc::clone(&gate));
        gate
    }

    pub fn set_resolved(&self, session_id: &str) {
        *self.resolved.lock().unwrap() = Some(session_id.to_string());
    }

    pub fn set_checkin_report(&self, report: CheckinReport) {
        *self.checkin.lock().unwrap() = report;
    }

    pub fn set_status(&self, status: StatusSnapshot) {
        *self.status.lock().unwrap() = status;
    }

    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Texts handed to the resolver, in call order.
    pub fn resolve_inputs(&self) -> Vec<String> {
        self.resolve_inputs.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<ConfigUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub fn current_status(&self) -> StatusSnapshot {
        self.status.lock().unwrap().clone()
    }

    async fn enter(&self, op: &'static str) -> Result<(), SdkError> {
        self.calls.lock().unwrap().push(op);
        let gate = self.gates.lock().unwrap().get(op).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match self.failures.lock().unwrap().get(op) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

pub fn profile(username: &str) -> UserProfile {
    UserProfile {
        id: 1,
        username: username.to_string(),
        is_admin: false,
        created_at: "2026-10-01 09:00:00".to_string(),
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn login(&self, username: &str, _password: &str) -> Result<AccessToken, SdkError> {
        self.enter("login").await?;
        Ok(AccessToken::bearer(format!("token-{username}")))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, SdkError> {
        self.enter("register").await?;
        Ok(profile(&request.username))
    }

    async fn profile(&self) -> Result<UserProfile, SdkError> {
        self.enter("profile").await?;
        Ok(profile("alice"))
    }

    async fn status(&self) -> Result<StatusSnapshot, SdkError> {
        self.enter("status").await?;
        Ok(self.current_status())
    }

    async fn update_config(&self, update: &ConfigUpdate) -> Result<Ack, SdkError> {
        self.enter("update_config").await?;
        self.updates.lock().unwrap().push(update.clone());
        let mut status = self.status.lock().unwrap();
        if !update.keeps_session_id() {
            status.is_configured = true;
            status.session_id_preview = update.session_id.chars().take(8).collect();
        }
        status.major = u32::from(update.venue_major);
        status.minor = u32::from(update.venue_minor);
        status.venue_major = Some(u32::from(update.venue_major));
        status.venue_minor = Some(u32::from(update.venue_minor));
        Ok(Ack::default())
    }

    async fn resolve_session_id(&self, url: &str) -> Result<SessionId, SdkError> {
        self.resolve_inputs.lock().unwrap().push(url.to_string());
        self.enter("resolve").await?;
        let resolved = self.resolved.lock().unwrap().clone();
        match resolved {
            Some(id) => Ok(SessionId::from_resolved(&id)?),
            None => Err(SdkError::Gateway {
                status: Some(400),
                detail: None,
            }),
        }
    }

    async fn trigger_checkin(&self) -> Result<CheckinReport, SdkError> {
        self.enter("checkin").await?;
        let report = self.checkin.lock().unwrap().clone();
        if report.success != Some(false) {
            let mut status = self.status.lock().unwrap();
            status.last_checkin = "2026-10-17 08:15:02".to_string();
            status.last_checkin_result = "签到成功: 3F-012".to_string();
        }
        Ok(report)
    }

    async fn keep_alive(&self) -> Result<Ack, SdkError> {
        self.enter("keepalive").await?;
        Ok(Ack::default())
    }

    async fn enable_auto_checkin(&self) -> Result<Ack, SdkError> {
        self.enter("enable").await?;
        self.status.lock().unwrap().auto_checkin_enabled = Some(true);
        Ok(Ack::default())
    }

    async fn disable_auto_checkin(&self) -> Result<Ack, SdkError> {
        self.enter("disable").await?;
        self.status.lock().unwrap().auto_checkin_enabled = Some(false);
        Ok(Ack::default())
    }

    async fn admin_users(&self) -> Result<Vec<AdminUserSummary>, SdkError> {
        self.enter("admin_users").await?;
        Ok(Vec::new())
    }

    async fn admin_delete_user(&self, _user_id: i64) -> Result<Ack, SdkError> {
        self.enter("admin_delete").await?;
        Ok(Ack::default())
    }

    async fn admin_checkin(&self, _user_id: i64) -> Result<CheckinReport, SdkError> {
        self.enter("admin_checkin").await?;
        Ok(CheckinReport::default())
    }
}
