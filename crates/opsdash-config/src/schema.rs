//! Configuration schema definitions using serde.
//!
//! Every section falls back to its [`Default`] impl, so a config file only
//! needs the values it changes.

use crate::validator::ConfigValidator;
use opsdash_common::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input table configuration.
    pub input: InputConfig,
    /// Output location configuration.
    pub output: OutputConfig,
    /// Dashboard rendering configuration.
    pub dashboard: DashboardConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Input table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path of the delimited input file.
    pub path: PathBuf,
    /// Field delimiter.
    pub delimiter: char,
    /// Fail on the first invalid row instead of skipping it.
    pub strict: bool,
    /// Column names in the header row.
    pub columns: ColumnsConfig,
}

/// Header names of the input columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    /// Branch identifier column.
    pub branch: String,
    /// Timestamp column (date and time, or a bare date with `hour`).
    pub timestamp: String,
    /// Service type column.
    pub service: String,
    /// Revenue column.
    pub revenue: String,
    /// Optional appointment count column; rows count as one when absent.
    pub appointments: String,
    /// Optional hour-of-day column used when the timestamp carries only a date.
    pub hour: String,
}

impl ColumnsConfig {
    /// Column names that must be present in the header.
    #[must_use]
    pub fn required(&self) -> [&str; 4] {
        [
            self.branch.as_str(),
            self.timestamp.as_str(),
            self.service.as_str(),
            self.revenue.as_str(),
        ]
    }

    /// Every configured column name, required ones first.
    #[must_use]
    pub fn all(&self) -> [&str; 6] {
        [
            self.branch.as_str(),
            self.timestamp.as_str(),
            self.service.as_str(),
            self.revenue.as_str(),
            self.appointments.as_str(),
            self.hour.as_str(),
        ]
    }
}

/// Output location configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the dashboard image and the exports.
    pub dir: PathBuf,
    /// Fixed dashboard file name. A timestamped name is used when unset.
    pub dashboard_file: Option<String>,
    /// Also export the day-by-hour matrix.
    pub export_heatmap: bool,
    /// Also export the KPI summary as JSON.
    pub export_kpis: bool,
}

/// Which quantity the peak-hour matrix is shaded by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatmapMetric {
    /// Summed revenue.
    Revenue,
    /// Summed appointment counts.
    Appointments,
}

/// Chart type for the service breakdown panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceChart {
    /// Pie chart with percentage labels.
    Pie,
    /// Vertical bar chart.
    Bar,
}

/// Dashboard rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Title drawn across the top of the image.
    pub title: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Currency symbol used in labels.
    pub currency_symbol: String,
    /// Font family for all text.
    pub font_family: String,
    /// Zero-fill days without records in the trend chart.
    pub fill_daily_gaps: bool,
    /// Shading metric of the peak-hour matrix.
    pub heatmap_metric: HeatmapMetric,
    /// Chart type for the service breakdown.
    pub service_chart: ServiceChart,
    /// Draw value labels above bars.
    pub annotate_bars: bool,
    /// Colours and grid.
    pub styling: StylingConfig,
}

/// Styling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylingConfig {
    /// Whether to draw mesh lines in cartesian charts.
    pub enable_grid: bool,
    /// Colour configuration.
    pub colors: ColorsConfig,
}

/// Colour configuration, all as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Image background.
    pub background: String,
    /// Body text.
    pub text: String,
    /// Branch revenue bars.
    pub branch_bars: String,
    /// Hottest heatmap cell.
    pub heatmap: String,
    /// Daily trend line.
    pub trend: String,
    /// KPI table header row.
    pub table_header: String,
    /// Slice and bar colours for services, cycled.
    pub service_palette: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Additionally write logs to this file.
    pub file: Option<PathBuf>,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate(self)
    }
}
