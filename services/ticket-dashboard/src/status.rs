//! Automation status panel

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{StatusResponse, STATUS_ENDPOINT};
use crate::config::Config;
use crate::io::{fetch_json, HttpClient};
use crate::page::Page;
use crate::poller::Poller;
use crate::state::{record_outcome, DiagnosticsHandle};

/// Shows the backend's status string; shows the error label when a poll fails
pub struct StatusPoller {
    url: String,
    element_id: String,
    error_label: String,
    http: Arc<dyn HttpClient>,
    page: Arc<dyn Page>,
    diagnostics: DiagnosticsHandle,
}

impl std::fmt::Debug for StatusPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusPoller")
            .field("url", &self.url)
            .field("element_id", &self.element_id)
            .finish()
    }
}

impl StatusPoller {
    pub fn new(
        config: &Config,
        http: Arc<dyn HttpClient>,
        page: Arc<dyn Page>,
        diagnostics: DiagnosticsHandle,
    ) -> Self {
        Self {
            url: config.backend.endpoint(STATUS_ENDPOINT),
            element_id: config.status.element_id.clone(),
            error_label: config.status.error_label.clone(),
            http,
            page,
            diagnostics,
        }
    }

    async fn refresh(&self) -> crate::Result<()> {
        let response: StatusResponse = fetch_json(self.http.as_ref(), &self.url).await?;
        self.page.set_text(&self.element_id, &response.status)
    }
}

#[async_trait]
impl Poller for StatusPoller {
    fn name(&self) -> &str {
        "status"
    }

    async fn poll(&self) {
        let outcome = self.refresh().await;
        if outcome.is_err() {
            if let Err(e) = self.page.set_text(&self.element_id, &self.error_label) {
                tracing::warn!("Could not show status error label: {}", e);
            }
        }
        record_outcome(&self.diagnostics, self.name(), &outcome).await;
    }
}
