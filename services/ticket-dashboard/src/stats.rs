//! Ticket statistics chart panel

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::api::{split_series, StatsResponse, STATS_ENDPOINT};
use crate::chart::{ChartBackend, ChartConfig, ChartHandle};
use crate::config::{Config, StatsPanelConfig};
use crate::io::{fetch_json, HttpClient};
use crate::page::Page;
use crate::poller::Poller;
use crate::state::{record_outcome, DiagnosticsHandle};

/// Renders daily ticket counts as a bar chart, keeping one live chart per canvas
///
/// Does nothing at all while the canvas is absent. A failed poll leaves the
/// previous chart in place.
pub struct StatsChartRenderer {
    url: String,
    panel: StatsPanelConfig,
    http: Arc<dyn HttpClient>,
    page: Arc<dyn Page>,
    charts: Arc<dyn ChartBackend>,
    handle: Mutex<ChartHandle>,
    diagnostics: DiagnosticsHandle,
}

impl std::fmt::Debug for StatsChartRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsChartRenderer")
            .field("url", &self.url)
            .field("canvas_id", &self.panel.canvas_id)
            .finish()
    }
}

impl StatsChartRenderer {
    pub fn new(
        config: &Config,
        http: Arc<dyn HttpClient>,
        page: Arc<dyn Page>,
        charts: Arc<dyn ChartBackend>,
        diagnostics: DiagnosticsHandle,
    ) -> Self {
        Self {
            url: config.backend.endpoint(STATS_ENDPOINT),
            panel: config.stats.clone(),
            http,
            page,
            charts,
            handle: Mutex::new(ChartHandle::new()),
            diagnostics,
        }
    }

    /// Configuration of the chart currently on the canvas
    pub async fn current_chart(&self) -> Option<ChartConfig> {
        self.handle
            .lock()
            .await
            .current()
            .map(|chart| chart.config().clone())
    }

    /// Build the chart configuration for a stats response
    pub fn chart_config(&self, points: &StatsResponse) -> ChartConfig {
        let (labels, values) = split_series(points);
        ChartConfig::bar(
            &self.panel.dataset_label,
            labels,
            values,
            self.panel.border_width,
            self.panel.begin_at_zero,
        )
    }

    async fn refresh(&self) -> crate::Result<()> {
        let points: StatsResponse = fetch_json(self.http.as_ref(), &self.url).await?;
        tracing::debug!("Fetched {} stats points", points.len());
        let config = self.chart_config(&points);
        self.handle
            .lock()
            .await
            .replace(self.charts.as_ref(), &self.panel.canvas_id, config)
    }
}

#[async_trait]
impl Poller for StatsChartRenderer {
    fn name(&self) -> &str {
        "stats"
    }

    async fn poll(&self) {
        if !self.page.has_element(&self.panel.canvas_id) {
            tracing::debug!("No '{}' canvas, skipping stats", self.panel.canvas_id);
            return;
        }

        let outcome = self.refresh().await;
        record_outcome(&self.diagnostics, self.name(), &outcome).await;
    }
}
