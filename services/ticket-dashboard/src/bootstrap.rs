//! Page bootstrap: wires the panels present on a page to their pollers

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::chart::{ChartBackend, ChartConfig};
use crate::config::Config;
use crate::io::HttpClient;
use crate::logs::LogPoller;
use crate::page::Page;
use crate::scheduler::Scheduler;
use crate::state::{new_diagnostics_handle, DiagnosticsHandle, PollerStatus};
use crate::stats::StatsChartRenderer;
use crate::status::StatusPoller;

/// A bootstrapped page and the tasks keeping it current
pub struct Dashboard {
    scheduler: Scheduler,
    logs: Option<Arc<LogPoller>>,
    stats: Option<Arc<StatsChartRenderer>>,
    diagnostics: DiagnosticsHandle,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("tasks", &self.scheduler.task_count())
            .field("logs", &self.logs.is_some())
            .field("stats", &self.stats.is_some())
            .finish()
    }
}

impl Dashboard {
    /// Wire up the page and start polling
    ///
    /// The status panel is always polled. The log panel is bound only when
    /// the refresh control exists, and the chart only when its canvas exists.
    /// Every active panel polls right away in its own task, so a slow first
    /// fetch of one panel never holds back another panel's timer. Use
    /// [`Dashboard::ready`] to wait for that first round.
    pub fn bootstrap(
        config: &Config,
        page: Arc<dyn Page>,
        http: Arc<dyn HttpClient>,
        charts: Arc<dyn ChartBackend>,
    ) -> Self {
        let diagnostics = new_diagnostics_handle();
        let mut scheduler = Scheduler::new();

        let status = Arc::new(StatusPoller::new(
            config,
            Arc::clone(&http),
            Arc::clone(&page),
            Arc::clone(&diagnostics),
        ));
        scheduler.every(status.clone(), config.status.interval);

        let logs = match page.activations(&config.logs.refresh_control_id) {
            Some(activations) => {
                let logs = Arc::new(LogPoller::new(
                    config,
                    Arc::clone(&http),
                    Arc::clone(&page),
                    Arc::clone(&diagnostics),
                ));
                scheduler.now_and_on_activation(logs.clone(), activations);
                Some(logs)
            }
            None => {
                tracing::debug!(
                    "No '{}' control, log panel inactive",
                    config.logs.refresh_control_id
                );
                None
            }
        };

        let stats = if page.has_element(&config.stats.canvas_id) {
            let stats = Arc::new(StatsChartRenderer::new(
                config,
                Arc::clone(&http),
                Arc::clone(&page),
                charts,
                Arc::clone(&diagnostics),
            ));
            scheduler.every(stats.clone(), config.stats.interval);
            Some(stats)
        } else {
            tracing::debug!(
                "No '{}' canvas, chart panel inactive",
                config.stats.canvas_id
            );
            None
        };

        tracing::info!(
            "Dashboard bootstrapped (logs: {}, chart: {})",
            if logs.is_some() { "bound" } else { "absent" },
            if stats.is_some() { "active" } else { "absent" }
        );

        Self {
            scheduler,
            logs,
            stats,
            diagnostics,
        }
    }

    /// Wait until every active panel has finished its first poll
    pub async fn ready(&mut self) {
        self.scheduler.first_round().await;
    }

    /// Whether the log refresh control was found and bound
    pub fn is_log_refresh_bound(&self) -> bool {
        self.logs.is_some()
    }

    /// Whether the chart canvas was found
    pub fn is_chart_active(&self) -> bool {
        self.stats.is_some()
    }

    /// Configuration of the chart currently drawn, if any
    pub async fn current_chart(&self) -> Option<ChartConfig> {
        match &self.stats {
            Some(stats) => stats.current_chart().await,
            None => None,
        }
    }

    /// Snapshot of every poller's diagnostics
    pub async fn diagnostics(&self) -> Vec<PollerStatus> {
        self.diagnostics.read().await.pollers.clone()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.scheduler.cancellation_token()
    }

    /// Stop every poll task
    pub async fn stop(self) {
        tracing::debug!("Stopping {} dashboard tasks", self.scheduler.task_count());
        self.scheduler.stop().await;
    }
}
