//! Chart abstraction and the single-chart slot bound to a canvas

use std::fmt::Write as _;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::page::Page;

/// Declarative chart description, serialized in the shape charting libraries expect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
}

impl ChartConfig {
    /// Single-dataset bar chart
    pub fn bar(
        dataset_label: &str,
        labels: Vec<String>,
        values: Vec<f64>,
        border_width: u32,
        begin_at_zero: bool,
    ) -> Self {
        Self {
            kind: ChartKind::Bar,
            data: ChartData {
                labels,
                datasets: vec![Dataset {
                    label: dataset_label.to_string(),
                    data: values,
                    border_width,
                }],
            },
            options: ChartOptions {
                scales: Scales {
                    y: Axis { begin_at_zero },
                },
            },
        }
    }
}

/// A live chart bound to a canvas
pub trait Chart: Send + std::fmt::Debug {
    fn config(&self) -> &ChartConfig;

    /// Release the canvas; called exactly once before the chart is dropped
    fn destroy(&mut self);
}

/// Creates charts on canvases
pub trait ChartBackend: Send + Sync {
    fn create(&self, canvas_id: &str, config: ChartConfig) -> crate::Result<Box<dyn Chart>>;
}

/// Owned slot holding at most one live chart
///
/// `replace` destroys the held chart before asking the backend for a new one,
/// and dropping the handle destroys whatever it still holds.
#[derive(Debug, Default)]
pub struct ChartHandle {
    current: Option<Box<dyn Chart>>,
}

impl ChartHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&dyn Chart> {
        self.current.as_deref()
    }

    /// Destroy the held chart, if any, then create a new one on `canvas_id`
    ///
    /// When creation fails the slot is left empty.
    pub fn replace(
        &mut self,
        backend: &dyn ChartBackend,
        canvas_id: &str,
        config: ChartConfig,
    ) -> crate::Result<()> {
        self.clear();
        let chart = backend.create(canvas_id, config)?;
        self.current = Some(chart);
        Ok(())
    }

    /// Destroy the held chart, if any
    pub fn clear(&mut self) {
        if let Some(mut chart) = self.current.take() {
            chart.destroy();
        }
    }
}

impl Drop for ChartHandle {
    fn drop(&mut self) {
        self.clear();
    }
}

const BAR_WIDTH: usize = 40;

/// Draws bar charts as text into canvas elements of a page
pub struct TextChartBackend {
    page: Arc<dyn Page>,
}

impl TextChartBackend {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self { page }
    }
}

impl ChartBackend for TextChartBackend {
    fn create(&self, canvas_id: &str, config: ChartConfig) -> crate::Result<Box<dyn Chart>> {
        if !self.page.has_element(canvas_id) {
            return Err(crate::DashboardError::Chart(format!(
                "canvas '{}' not found",
                canvas_id
            )));
        }
        self.page.set_text(canvas_id, &render_text(&config))?;
        tracing::debug!(
            "Drew {} bars on '{}'",
            config.data.labels.len(),
            canvas_id
        );
        Ok(Box::new(TextChart {
            page: Arc::clone(&self.page),
            canvas_id: canvas_id.to_string(),
            config,
        }))
    }
}

/// Chart drawn by `TextChartBackend`
pub struct TextChart {
    page: Arc<dyn Page>,
    canvas_id: String,
    config: ChartConfig,
}

impl std::fmt::Debug for TextChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextChart")
            .field("canvas_id", &self.canvas_id)
            .field("config", &self.config)
            .finish()
    }
}

impl Chart for TextChart {
    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn destroy(&mut self) {
        if let Err(e) = self.page.set_text(&self.canvas_id, "") {
            tracing::debug!("Clearing canvas '{}': {}", self.canvas_id, e);
        }
    }
}

/// Horizontal bars, one line per label, scaled to the largest value
pub fn render_text(config: &ChartConfig) -> String {
    let mut out = String::new();
    let Some(dataset) = config.data.datasets.first() else {
        return out;
    };

    let _ = writeln!(out, "{}", dataset.label);
    let label_width = config
        .data
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let lowest = dataset.data.iter().copied().fold(f64::INFINITY, f64::min);
    let floor = if config.options.scales.y.begin_at_zero || !lowest.is_finite() {
        0.0
    } else {
        lowest
    };
    let max = dataset.data.iter().copied().fold(0.0, f64::max);
    let span = max - floor;

    for (label, value) in config.data.labels.iter().zip(&dataset.data) {
        let len = if span > 0.0 {
            (((value - floor) / span) * BAR_WIDTH as f64).round().max(0.0) as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:<width$} | {} {}",
            label,
            "#".repeat(len),
            value,
            width = label_width
        );
    }
    out
}
