//! Automation log panel

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{LogsResponse, LOGS_ENDPOINT};
use crate::config::Config;
use crate::io::{fetch_json, HttpClient};
use crate::page::Page;
use crate::poller::Poller;
use crate::state::{record_outcome, DiagnosticsHandle};

/// Shows the backend's log lines; keeps the previous lines when a poll fails
pub struct LogPoller {
    url: String,
    element_id: String,
    http: Arc<dyn HttpClient>,
    page: Arc<dyn Page>,
    diagnostics: DiagnosticsHandle,
}

impl std::fmt::Debug for LogPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogPoller")
            .field("url", &self.url)
            .field("element_id", &self.element_id)
            .finish()
    }
}

impl LogPoller {
    pub fn new(
        config: &Config,
        http: Arc<dyn HttpClient>,
        page: Arc<dyn Page>,
        diagnostics: DiagnosticsHandle,
    ) -> Self {
        Self {
            url: config.backend.endpoint(LOGS_ENDPOINT),
            element_id: config.logs.element_id.clone(),
            http,
            page,
            diagnostics,
        }
    }

    async fn refresh(&self) -> crate::Result<()> {
        let response: LogsResponse = fetch_json(self.http.as_ref(), &self.url).await?;
        tracing::debug!("Fetched {} log lines", response.lines.len());
        self.page.set_text(&self.element_id, &response.joined())
    }
}

#[async_trait]
impl Poller for LogPoller {
    fn name(&self) -> &str {
        "logs"
    }

    async fn poll(&self) {
        let outcome = self.refresh().await;
        record_outcome(&self.diagnostics, self.name(), &outcome).await;
    }
}
