//! Default values for every configuration section.

use crate::schema::*;
use std::path::PathBuf;

/// Input file used when nothing else is configured.
pub const DEFAULT_INPUT_PATH: &str = "data/sample_data.csv";

/// Output directory used when nothing else is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "reports";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "opsdash.toml";

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_INPUT_PATH),
            delimiter: ',',
            strict: false,
            columns: ColumnsConfig::default(),
        }
    }
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            branch: "branch".to_string(),
            timestamp: "datetime".to_string(),
            service: "service".to_string(),
            revenue: "revenue".to_string(),
            appointments: "appointments".to_string(),
            hour: "hour".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            dashboard_file: None,
            export_heatmap: true,
            export_kpis: true,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Ted's Operations Dashboard".to_string(),
            width: 2400,
            height: 1500,
            currency_symbol: "£".to_string(),
            font_family: "sans-serif".to_string(),
            fill_daily_gaps: true,
            heatmap_metric: HeatmapMetric::Revenue,
            service_chart: ServiceChart::Pie,
            annotate_bars: true,
            styling: StylingConfig::default(),
        }
    }
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            enable_grid: true,
            colors: ColorsConfig::default(),
        }
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#222222".to_string(),
            branch_bars: "#4a90d9".to_string(),
            heatmap: "#e74c3c".to_string(),
            trend: "#f39c12".to_string(),
            table_header: "#4a90d9".to_string(),
            service_palette: vec![
                "#2ecc71".to_string(),
                "#3498db".to_string(),
                "#9b59b6".to_string(),
                "#e67e22".to_string(),
                "#1abc9c".to_string(),
                "#e74c3c".to_string(),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}
