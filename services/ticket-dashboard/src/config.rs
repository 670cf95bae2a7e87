//! Configuration types for the ticket dashboard

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub status: StatusPanelConfig,
    #[serde(default)]
    pub logs: LogPanelConfig,
    #[serde(default)]
    pub stats: StatsPanelConfig,
}

/// Where the JSON API lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl BackendConfig {
    /// Join the base URL and an endpoint path with exactly one slash
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Status text panel, refreshed on a fixed interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPanelConfig {
    #[serde(default = "default_status_element")]
    pub element_id: String,
    #[serde(default = "default_status_interval", with = "humantime_serde")]
    pub interval: Duration,
    #[serde(default = "default_error_label")]
    pub error_label: String,
}

impl Default for StatusPanelConfig {
    fn default() -> Self {
        Self {
            element_id: default_status_element(),
            interval: default_status_interval(),
            error_label: default_error_label(),
        }
    }
}

/// Log output panel, refreshed on demand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogPanelConfig {
    #[serde(default = "default_log_element")]
    pub element_id: String,
    #[serde(default = "default_refresh_control")]
    pub refresh_control_id: String,
}

impl Default for LogPanelConfig {
    fn default() -> Self {
        Self {
            element_id: default_log_element(),
            refresh_control_id: default_refresh_control(),
        }
    }
}

/// Ticket statistics bar chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsPanelConfig {
    #[serde(default = "default_canvas")]
    pub canvas_id: String,
    #[serde(default = "default_stats_interval", with = "humantime_serde")]
    pub interval: Duration,
    #[serde(default = "default_dataset_label")]
    pub dataset_label: String,
    #[serde(default = "default_border_width")]
    pub border_width: u32,
    #[serde(default = "default_true")]
    pub begin_at_zero: bool,
}

impl Default for StatsPanelConfig {
    fn default() -> Self {
        Self {
            canvas_id: default_canvas(),
            interval: default_stats_interval(),
            dataset_label: default_dataset_label(),
            border_width: default_border_width(),
            begin_at_zero: true,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_status_element() -> String {
    "status-text".to_string()
}

fn default_status_interval() -> Duration {
    Duration::from_millis(5000)
}

fn default_error_label() -> String {
    "Error".to_string()
}

fn default_log_element() -> String {
    "log-output".to_string()
}

fn default_refresh_control() -> String {
    "refresh-logs".to_string()
}

fn default_canvas() -> String {
    "ticketsChart".to_string()
}

fn default_stats_interval() -> Duration {
    Duration::from_millis(60_000)
}

fn default_dataset_label() -> String {
    "Tickets".to_string()
}

fn default_border_width() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Reject settings the pollers cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        let base = &self.backend.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(crate::DashboardError::Config(format!(
                "backend.base_url must start with http:// or https://, got {:?}",
                base
            )));
        }

        for (field, interval) in [
            ("backend.request_timeout", self.backend.request_timeout),
            ("status.interval", self.status.interval),
            ("stats.interval", self.stats.interval),
        ] {
            if interval.is_zero() {
                return Err(crate::DashboardError::Config(format!(
                    "{} must be greater than zero",
                    field
                )));
            }
        }

        for (field, id) in [
            ("status.element_id", &self.status.element_id),
            ("logs.element_id", &self.logs.element_id),
            ("logs.refresh_control_id", &self.logs.refresh_control_id),
            ("stats.canvas_id", &self.stats.canvas_id),
        ] {
            if id.trim().is_empty() {
                return Err(crate::DashboardError::Config(format!(
                    "{} must not be empty",
                    field
                )));
            }
        }

        Ok(())
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::DashboardError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
