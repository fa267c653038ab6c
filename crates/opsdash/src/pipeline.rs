//! Run sequencing: load, aggregate, then render and export concurrently.

use crate::error::{AppError, AppResult};
use crate::report::RunSummary;
use chrono::Local;
use opsdash_config::Config;
use opsdash_data::{AggregateViews, CsvExporter, DataLoader, LoadedTable};
use opsdash_graphs::DashboardRenderer;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// One dashboard run over a validated configuration.
pub struct Pipeline {
    config: Arc<Config>,
}

impl Pipeline {
    /// Creates a pipeline.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads the input table.
    pub fn load(&self) -> AppResult<LoadedTable> {
        let path = &self.config.input.path;
        let loaded = DataLoader::new(&self.config.input).load(path)?;
        info!(
            "Loaded {} records from {}",
            loaded.table.len(),
            path.display()
        );
        if !loaded.skipped.is_empty() {
            warn!("Skipped {} invalid rows", loaded.skipped.len());
        }
        Ok(loaded)
    }

    /// Runs the whole pipeline. `on_views` sees the aggregated views before
    /// the outputs are written.
    #[instrument(skip_all, fields(input = %self.config.input.path.display()))]
    pub async fn run(&self, on_views: impl FnOnce(&AggregateViews)) -> AppResult<RunSummary> {
        let loaded = self.load()?;
        let views = Arc::new(AggregateViews::compute(&loaded.table));
        on_views(&views);

        // Output directory must exist before either task starts
        let exporter = CsvExporter::new(&self.config.output);
        exporter.ensure_dir()?;

        let dashboard_path = DashboardRenderer::output_path(&self.config.output, Local::now());
        let renderer = DashboardRenderer::new(self.config.dashboard.clone());

        let render_views = Arc::clone(&views);
        let render_task =
            tokio::task::spawn_blocking(move || renderer.render(&render_views, &dashboard_path));
        let export_views = Arc::clone(&views);
        let export_task = tokio::task::spawn_blocking(move || exporter.export_all(&export_views));

        let (render, exports) = tokio::join!(render_task, export_task);
        let render = render.map_err(|e| AppError::Task(e.to_string()))?;
        let exports = exports.map_err(|e| AppError::Task(e.to_string()))?;

        if let Err(err) = &render {
            warn!("Dashboard render failed: {}", err);
        }

        Ok(RunSummary {
            source: self.config.input.path.clone(),
            records: loaded.table.len(),
            skipped: loaded.skipped.len(),
            render,
            exports,
        })
    }
}
