//! Poller trait shared by the dashboard panels

use async_trait::async_trait;

/// A panel that fetches from the backend and renders the result into the page
///
/// `poll` absorbs every failure: it logs it, records it in the diagnostics
/// and applies the panel's own error display policy.
#[async_trait]
pub trait Poller: Send + Sync + std::fmt::Debug {
    /// Name used in logs and diagnostics
    fn name(&self) -> &str;

    /// Fetch once and update the page
    async fn poll(&self);
}
