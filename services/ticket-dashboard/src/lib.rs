//! Ticket dashboard - polling controller for the ticket automation backend
//!
//! Keeps a status line, an automation log panel and a daily ticket chart in
//! sync with the backend's `/api/status`, `/api/logs` and `/api/stats`.

pub mod api;
pub mod bootstrap;
pub mod chart;
pub mod config;
pub mod error;
pub mod io;
pub mod logs;
pub mod page;
pub mod poller;
pub mod scheduler;
pub mod state;
pub mod stats;
pub mod status;

pub use bootstrap::Dashboard;
pub use config::{load_config, Config};
pub use error::{DashboardError, Result};

use std::io::BufRead;
use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;

use crate::chart::TextChartBackend;
use crate::io::ReqwestHttpClient;
use crate::page::{ElementKind, MemoryPage};

/// Run the terminal dashboard with the given configuration
///
/// Element updates are printed to stdout. Every line read from stdin
/// activates the log refresh control. Runs until ctrl-c.
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;

    let http: Arc<dyn io::HttpClient> =
        Arc::new(ReqwestHttpClient::with_timeout(config.backend.request_timeout)?);
    let page = Arc::new(MemoryPage::for_config(&config));
    let charts = Arc::new(TextChartBackend::new(page.clone()));

    // Subscribe before bootstrap so the first round of updates is printed
    let mut changes = page.changes();
    let printer = tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(change) => match change.kind {
                    ElementKind::Canvas => println!("[{}]\n{}", change.id, change.content),
                    _ => println!("[{}] {}", change.id, change.content),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Display fell behind, skipped {} updates", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let stdin_page = Arc::clone(&page);
    let refresh_id = config.logs.refresh_control_id.clone();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if line.is_err() {
                break;
            }
            if let Err(e) = stdin_page.activate(&refresh_id) {
                tracing::warn!("Could not refresh logs: {}", e);
            }
        }
        tracing::debug!("Stdin closed, manual refresh disabled");
    });

    tracing::info!("Polling backend at {}", config.backend.base_url);
    let dashboard = Dashboard::bootstrap(&config, page.clone(), http, charts);
    tracing::info!("Dashboard running, press enter to refresh logs, ctrl-c to quit");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    let diagnostics = dashboard.diagnostics().await;
    dashboard.stop().await;
    printer.abort();

    for poller in diagnostics {
        tracing::info!(
            "{}: {} polls, {} consecutive errors{}",
            poller.name,
            poller.polls,
            poller.consecutive_errors,
            poller
                .last_error
                .map(|e| format!(", last error: {}", e))
                .unwrap_or_default()
        );
    }
    tracing::info!("Ticket dashboard stopped");

    Ok(())
}
