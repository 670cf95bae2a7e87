//! Shared poll bookkeeping for diagnostics

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Consecutive failures after which a poller is reported as degraded
pub const DEGRADED_AFTER_ERRORS: u32 = 5;

/// Outcome history of a single poller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollerStatus {
    pub name: String,
    pub polls: u64,
    pub consecutive_errors: u32,
    pub last_error: Option<String>,
    pub last_poll_epoch_ms: u64,
    pub last_success_epoch_ms: Option<u64>,
}

impl PollerStatus {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            polls: 0,
            consecutive_errors: 0,
            last_error: None,
            last_poll_epoch_ms: 0,
            last_success_epoch_ms: None,
        }
    }
}

/// Statuses of every poller that has reported at least once
#[derive(Debug, Default)]
pub struct Diagnostics {
    pub pollers: Vec<PollerStatus>,
}

impl Diagnostics {
    fn entry(&mut self, name: &str) -> &mut PollerStatus {
        let index = match self.pollers.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                self.pollers.push(PollerStatus::new(name));
                self.pollers.len() - 1
            }
        };
        &mut self.pollers[index]
    }

    pub fn record_success(&mut self, name: &str, now_ms: u64) {
        let status = self.entry(name);
        status.polls += 1;
        status.consecutive_errors = 0;
        status.last_poll_epoch_ms = now_ms;
        status.last_success_epoch_ms = Some(now_ms);
    }

    /// Record a failed poll, returning the consecutive error count
    pub fn record_failure(&mut self, name: &str, error: &str, now_ms: u64) -> u32 {
        let status = self.entry(name);
        status.polls += 1;
        status.consecutive_errors += 1;
        status.last_error = Some(error.to_string());
        status.last_poll_epoch_ms = now_ms;
        status.consecutive_errors
    }

    pub fn get(&self, name: &str) -> Option<&PollerStatus> {
        self.pollers.iter().find(|p| p.name == name)
    }
}

/// Thread-safe diagnostics handle
pub type DiagnosticsHandle = Arc<RwLock<Diagnostics>>;

pub fn new_diagnostics_handle() -> DiagnosticsHandle {
    Arc::new(RwLock::new(Diagnostics::default()))
}

/// Record the outcome of one poll and log failures
pub async fn record_outcome(
    diagnostics: &DiagnosticsHandle,
    poller: &str,
    outcome: &crate::Result<()>,
) {
    let now_ms = current_epoch_ms();
    let mut diagnostics = diagnostics.write().await;
    match outcome {
        Ok(()) => diagnostics.record_success(poller, now_ms),
        Err(e) => {
            tracing::warn!("Poll '{}' failed: {}", poller, e);
            let errors = diagnostics.record_failure(poller, &e.to_string(), now_ms);
            if errors == DEGRADED_AFTER_ERRORS {
                tracing::warn!("Poller '{}' has {} consecutive errors", poller, errors);
            }
        }
    }
}

pub fn current_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
