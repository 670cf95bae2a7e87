//! Backend API response types
//!
//! These mirror the JSON bodies served by the ticket automation backend.
//! Every response is fetched, rendered and discarded within a single poll.

use serde::{Deserialize, Deserializer, Serialize};

/// Path of the automation status endpoint
pub const STATUS_ENDPOINT: &str = "/api/status";

/// Path of the automation log endpoint
pub const LOGS_ENDPOINT: &str = "/api/logs";

/// Path of the daily ticket count endpoint
pub const STATS_ENDPOINT: &str = "/api/stats";

/// Body of /api/status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Body of /api/logs, oldest line first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsResponse {
    pub lines: Vec<String>,
}

impl LogsResponse {
    /// The lines as a single newline separated block
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

/// One bar of the ticket chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsPoint {
    pub date: String,
    pub count: f64,
}

/// Body of /api/stats; element order is the chart's x-axis order
pub type StatsResponse = Vec<StatsPoint>;

// Older backends serialize each day as a `[date, count]` pair instead of an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatsPoint {
    Object { date: String, count: f64 },
    Pair(String, f64),
}

impl<'de> Deserialize<'de> for StatsPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawStatsPoint::deserialize(deserializer)? {
            RawStatsPoint::Object { date, count } | RawStatsPoint::Pair(date, count) => {
                StatsPoint { date, count }
            }
        })
    }
}

/// Split stats into parallel label and value series, keeping input order
pub fn split_series(points: &[StatsPoint]) -> (Vec<String>, Vec<f64>) {
    points
        .iter()
        .map(|p| (p.date.clone(), p.count))
        .unzip()
}
