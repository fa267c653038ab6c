//! Dashboard layout and rendering.

use crate::branch_revenue::BranchRevenuePanel;
use crate::daily_revenue::DailyRevenuePanel;
use crate::kpi_table::KpiTablePanel;
use crate::peak_hours::PeakHoursPanel;
use crate::service_breakdown::ServiceBreakdownPanel;
use crate::traits::Panel;
use crate::utils::{draw_error, draw_placeholder, to_i32, Area, Theme};
use chrono::{DateTime, Local};
use opsdash_common::RenderError;
use opsdash_config::{DashboardConfig, OutputConfig};
use opsdash_data::AggregateViews;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Height of the title strip in pixels.
const TITLE_HEIGHT: u32 = 90;

/// How one panel ended up on the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutcome {
    /// The panel was drawn from its view.
    Rendered,
    /// The view was empty; a "No data" placeholder was drawn.
    Placeholder(RenderError),
    /// Drawing failed; the cell shows a placeholder where the backend allowed it.
    Failed(RenderError),
}

/// Result for a single panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelReport {
    /// Panel identifier.
    pub name: &'static str,
    /// What happened.
    pub outcome: PanelOutcome,
}

/// Summary of one dashboard render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// Written image.
    pub path: PathBuf,
    /// Panels in layout order.
    pub panels: Vec<PanelReport>,
}

impl RenderReport {
    /// Panels whose drawing failed.
    pub fn failures(&self) -> impl Iterator<Item = &PanelReport> {
        self.panels
            .iter()
            .filter(|panel| matches!(panel.outcome, PanelOutcome::Failed(_)))
    }

    /// Number of panels drawn from data.
    #[must_use]
    pub fn rendered_count(&self) -> usize {
        self.panels
            .iter()
            .filter(|panel| panel.outcome == PanelOutcome::Rendered)
            .count()
    }

    /// Outcome for a panel by name.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&PanelOutcome> {
        self.panels
            .iter()
            .find(|panel| panel.name == name)
            .map(|panel| &panel.outcome)
    }
}

/// Lays out and draws the composite dashboard.
///
/// The canvas holds a title strip, a top row with branch revenue, peak hours
/// and the service breakdown, and a bottom row with the daily trend across
/// two columns next to the KPI table.
pub struct DashboardRenderer {
    config: DashboardConfig,
    theme: Theme,
}

impl DashboardRenderer {
    /// Creates a renderer for the given dashboard settings.
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        let theme = Theme::from_config(&config);
        Self { config, theme }
    }

    /// Resolved theme.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Target path for the dashboard image: the configured file name, or a
    /// timestamped `dashboard_YYYYMMDD_HHMMSS.png`, inside the output directory.
    #[must_use]
    pub fn output_path(output: &OutputConfig, now: DateTime<Local>) -> PathBuf {
        let file_name = output
            .dashboard_file
            .clone()
            .unwrap_or_else(|| format!("dashboard_{}.png", now.format("%Y%m%d_%H%M%S")));
        output.dir.join(file_name)
    }

    /// Renders every panel and writes the PNG to `path`.
    ///
    /// Empty views and panel failures are recorded in the report and never
    /// abort the render.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Output`] if the canvas cannot be prepared or the
    /// image cannot be written.
    pub fn render(&self, views: &AggregateViews, path: &Path) -> Result<RenderReport, RenderError> {
        let output_error = |err: &dyn std::fmt::Display| RenderError::Output {
            path: path.to_path_buf(),
            message: err.to_string(),
        };

        let root = BitMapBackend::new(path, (self.config.width, self.config.height)).into_drawing_area();
        root.fill(&self.theme.background).map_err(|e| output_error(&e))?;

        let (title_area, body) = root.split_vertically(to_i32(TITLE_HEIGHT));
        if let Err(err) = self.draw_title(&title_area) {
            warn!("Dashboard title could not be drawn: {}", err);
        }

        let body = body.margin(10, 10, 10, 10);
        let (_, body_height) = body.dim_in_pixel();
        let (top, bottom) = body.split_vertically(to_i32(body_height / 2));
        let top_cells = top.split_evenly((1, 3));
        let (bottom_width, _) = bottom.dim_in_pixel();
        let (trend_area, kpi_area) = bottom.split_horizontally(to_i32(bottom_width * 2 / 3));

        let branch = BranchRevenuePanel;
        let peak = PeakHoursPanel::new(self.config.heatmap_metric);
        let service = ServiceBreakdownPanel::new(self.config.service_chart);
        let daily = DailyRevenuePanel::new(self.config.fill_daily_gaps);
        let kpi = KpiTablePanel;

        let layout: [(&dyn Panel, &Area<'_>); 5] = [
            (&branch, &top_cells[0]),
            (&peak, &top_cells[1]),
            (&service, &top_cells[2]),
            (&daily, &trend_area),
            (&kpi, &kpi_area),
        ];
        let panels = layout
            .into_iter()
            .map(|(panel, area)| PanelReport {
                name: panel.name(),
                outcome: self.draw_panel(panel, area, views),
            })
            .collect();

        root.present().map_err(|e| output_error(&e))?;
        let report = RenderReport {
            path: path.to_path_buf(),
            panels,
        };
        info!(
            "Dashboard written to {} ({} of {} panels rendered)",
            path.display(),
            report.rendered_count(),
            report.panels.len()
        );
        Ok(report)
    }

    fn draw_title(&self, area: &Area<'_>) -> Result<(), RenderError> {
        let (width, height) = area.dim_in_pixel();
        area.draw(&Text::new(
            self.config.title.as_str(),
            (to_i32(width) / 2, to_i32(height) / 2),
            self.theme.bold(36.0).pos(Pos::new(HPos::Center, VPos::Center)),
        ))
        .map_err(|e| draw_error("title", e))
    }

    fn draw_panel(&self, panel: &dyn Panel, area: &Area<'_>, views: &AggregateViews) -> PanelOutcome {
        if panel.is_empty(views) {
            debug!("Panel {} has no data, drawing placeholder", panel.name());
            return match draw_placeholder(area, panel.name(), panel.title(), &self.theme) {
                Ok(()) => PanelOutcome::Placeholder(RenderError::EmptyView { panel: panel.name() }),
                Err(err) => PanelOutcome::Failed(err),
            };
        }

        match panel.draw(area, views, &self.theme) {
            Ok(()) => {
                debug!("Panel {} rendered", panel.name());
                PanelOutcome::Rendered
            }
            Err(err) => {
                warn!("Panel {} failed to render: {}", panel.name(), err);
                if let Err(placeholder_err) = draw_placeholder(area, panel.name(), panel.title(), &self.theme) {
                    debug!("Placeholder for {} also failed: {}", panel.name(), placeholder_err);
                }
                PanelOutcome::Failed(err)
            }
        }
    }
}
