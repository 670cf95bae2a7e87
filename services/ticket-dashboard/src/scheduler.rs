//! Owns the periodic and activation-driven poll tasks

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::page::Activations;
use crate::poller::Poller;

/// Runs poller tasks until stopped
///
/// Every task waits for its current poll to finish before waiting for the
/// next trigger, so a poller never runs concurrently with itself. Tasks are
/// independent: a slow poll only delays its own task.
pub struct Scheduler {
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
    first_polls: Vec<oneshot::Receiver<()>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::with_token(CancellationToken::new())
    }

    /// Scheduler that also stops when `cancel` is cancelled
    pub fn with_token(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            tasks: Vec::new(),
            first_polls: Vec::new(),
        }
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Poll now, then on a fixed `interval` cadence
    ///
    /// A poll that overruns its slot delays only the next tick of this task.
    pub fn every(&mut self, poller: Arc<dyn Poller>, period: Duration) {
        let cancel = self.cancel.clone();
        let (first_tx, first_rx) = oneshot::channel();
        self.first_polls.push(first_rx);
        tracing::debug!("Scheduling '{}' every {:?}", poller.name(), period);
        self.tasks.push(tokio::spawn(async move {
            periodic_loop(poller, period, cancel, first_tx).await;
        }));
    }

    /// Poll once per activation until the stream ends
    pub fn on_activation(&mut self, poller: Arc<dyn Poller>, activations: Activations) {
        let cancel = self.cancel.clone();
        tracing::debug!("Binding '{}' to activations", poller.name());
        self.tasks.push(tokio::spawn(async move {
            activation_loop(poller, activations, cancel).await;
        }));
    }

    /// Poll now, then once per activation until the stream ends
    ///
    /// Activations arriving during the first poll are handled after it.
    pub fn now_and_on_activation(&mut self, poller: Arc<dyn Poller>, activations: Activations) {
        let cancel = self.cancel.clone();
        let (first_tx, first_rx) = oneshot::channel();
        self.first_polls.push(first_rx);
        tracing::debug!("Binding '{}' to activations after a first poll", poller.name());
        self.tasks.push(tokio::spawn(async move {
            tokio::select! {
                _ = poller.poll() => {}
                _ = cancel.cancelled() => return,
            }
            let _ = first_tx.send(());
            activation_loop(poller, activations, cancel).await;
        }));
    }

    /// Wait until every task scheduled with an immediate poll has finished it
    ///
    /// Tasks cancelled before their first poll completes are not waited on.
    pub async fn first_round(&mut self) {
        for first in self.first_polls.drain(..) {
            let _ = first.await;
        }
    }

    /// Cancel every task and wait for them to finish
    pub async fn stop(self) {
        self.cancel.cancel();
        for task in self.tasks {
            let _ = task.await;
        }
    }
}

async fn periodic_loop(
    poller: Arc<dyn Poller>,
    period: Duration,
    cancel: CancellationToken,
    first_tx: oneshot::Sender<()>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut first_tx = Some(first_tx);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = cancel.cancelled() => {
                tracing::debug!("Polling loop for '{}' cancelled", poller.name());
                break;
            }
        }
        tokio::select! {
            _ = poller.poll() => {}
            _ = cancel.cancelled() => {
                tracing::debug!("Polling loop for '{}' cancelled mid-poll", poller.name());
                break;
            }
        }
        if let Some(tx) = first_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn activation_loop(
    poller: Arc<dyn Poller>,
    mut activations: Activations,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            activation = activations.recv() => match activation {
                Some(()) => tracing::debug!("Activation for '{}'", poller.name()),
                None => {
                    tracing::debug!("Activation source for '{}' closed", poller.name());
                    break;
                }
            },
            _ = cancel.cancelled() => {
                tracing::debug!("Activation loop for '{}' cancelled", poller.name());
                break;
            }
        }
        tokio::select! {
            _ = poller.poll() => {}
            _ = cancel.cancelled() => break,
        }
    }
}
