//! Background status polling.
//!
//! One task per session fetches `GET /status` on a fixed interval and
//! publishes the result on a `watch` channel. Readers always see the latest
//! state; intermediate states may be skipped.

use std::sync::Arc;
use std::time::Duration;

use seatlink_models::StatusSnapshot;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::gateway::Gateway;

/// Published poller state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PollState {
    /// No snapshot fetched yet.
    #[default]
    Idle,
    /// A fetch is in progress. Carries the previous snapshot, if any.
    Loading(Option<Arc<StatusSnapshot>>),
    /// Latest snapshot.
    Ready(Arc<StatusSnapshot>),
    /// The credential was rejected; the poller has stopped.
    SessionExpired,
}

impl PollState {
    /// The most recent snapshot, if one is available.
    ///
    /// While a fetch is in flight this is the snapshot from the previous one.
    pub fn snapshot(&self) -> Option<&Arc<StatusSnapshot>> {
        match self {
            PollState::Ready(s) | PollState::Loading(Some(s)) => Some(s),
            _ => None,
        }
    }

    /// Whether a fetch is in progress.
    pub fn is_loading(&self) -> bool {
        matches!(self, PollState::Loading(_))
    }
}

/// Spawns the polling task.
pub struct StatusPoller;

impl StatusPoller {
    /// Start polling every `interval` until `cancel` fires or the handle drops.
    ///
    /// The first fetch happens immediately. Must be called from within a
    /// Tokio runtime.
    pub fn spawn(
        gateway: Arc<dyn Gateway>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> PollerHandle {
        let (tx, rx) = watch::channel(PollState::Idle);
        let refresh = Arc::new(Notify::new());
        let task = tokio::spawn(run(
            gateway,
            interval,
            tx,
            Arc::clone(&refresh),
            cancel.clone(),
        ));
        PollerHandle {
            state: rx,
            refresh,
            cancel,
            task: Some(task),
        }
    }
}

async fn run(
    gateway: Arc<dyn Gateway>,
    interval: Duration,
    tx: watch::Sender<PollState>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(interval_secs = interval.as_secs(), "status poller started");

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
            () = refresh.notified() => debug!("explicit status refresh"),
        }

        let last = tx.borrow().snapshot().cloned();
        tx.send_replace(PollState::Loading(last.clone()));
        let fallback = last.map_or(PollState::Idle, PollState::Ready);

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tx.send_replace(fallback);
                break;
            }
            r = gateway.status() => r,
        };

        match result {
            Ok(snapshot) => {
                tx.send_replace(PollState::Ready(Arc::new(snapshot)));
            }
            Err(e) if e.is_invalid_credential() => {
                warn!("status poll rejected the credential, stopping");
                tx.send_replace(PollState::SessionExpired);
                break;
            }
            Err(e) => {
                warn!(error = %e, "status poll failed");
                tx.send_replace(fallback);
            }
        }
    }

    info!("status poller stopped");
}

/// Owner side of a running poller. Dropping it stops the task.
pub struct PollerHandle {
    state: watch::Receiver<PollState>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// A receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.clone()
    }

    /// Latest published state.
    pub fn state(&self) -> PollState {
        self.state.borrow().clone()
    }

    /// Latest snapshot, if any.
    pub fn snapshot(&self) -> Option<Arc<StatusSnapshot>> {
        self.state.borrow().snapshot().cloned()
    }

    /// Fetch now instead of waiting for the next tick.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Ask the task to stop.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stop the task and wait for it to exit.
    pub async fn join(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "status poller task failed");
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
