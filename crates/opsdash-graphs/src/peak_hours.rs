//! Weekday by hour demand heatmap.

use crate::traits::Panel;
use crate::utils::{draw_error, Area, GraphUtils, Theme};
use opsdash_common::{weekday_label, RenderError, WEEKDAYS};
use opsdash_config::HeatmapMetric;
use opsdash_data::{AggregateViews, HeatCell};
use plotters::prelude::*;

/// Heatmap shaded by revenue or appointments, restricted to the hours that
/// have any activity.
#[derive(Debug, Clone, Copy)]
pub struct PeakHoursPanel {
    metric: HeatmapMetric,
}

impl PeakHoursPanel {
    /// Creates a panel shading cells by `metric`.
    #[must_use]
    pub const fn new(metric: HeatmapMetric) -> Self {
        Self { metric }
    }

    fn cell_value(&self, cell: HeatCell) -> f64 {
        match self.metric {
            HeatmapMetric::Revenue => cell.revenue.as_f64(),
            #[allow(clippy::cast_precision_loss)]
            HeatmapMetric::Appointments => cell.appointments as f64,
        }
    }
}

impl Panel for PeakHoursPanel {
    fn name(&self) -> &'static str {
        "peak_hours"
    }

    fn title(&self) -> &'static str {
        match self.metric {
            HeatmapMetric::Revenue => "Peak Hours (Revenue)",
            HeatmapMetric::Appointments => "Peak Hours (Appointments)",
        }
    }

    fn is_empty(&self, views: &AggregateViews) -> bool {
        views.heatmap.is_empty()
    }

    fn draw(&self, area: &Area<'_>, views: &AggregateViews, theme: &Theme) -> Result<(), RenderError> {
        let panel = self.name();
        let heatmap = &views.heatmap;
        let hours = heatmap.active_hours().unwrap_or(0..=23);
        let (first, last) = (f64::from(*hours.start()), f64::from(*hours.end()));
        #[allow(clippy::cast_precision_loss)]
        let max = match self.metric {
            HeatmapMetric::Revenue => heatmap.max_revenue().as_f64(),
            HeatmapMetric::Appointments => heatmap.max_appointments() as f64,
        };

        // Monday on the top row
        let day_labels: Vec<String> = WEEKDAYS
            .iter()
            .rev()
            .map(|day| weekday_label(*day).to_string())
            .collect();
        let hour_labels: Vec<String> = (0..24).map(|hour| format!("{hour:02}")).collect();
        let x_formatter = |value: &f64| GraphUtils::index_label(*value, &hour_labels);
        let y_formatter = |value: &f64| GraphUtils::index_label(*value, &day_labels);

        let mut chart = ChartBuilder::on(area)
            .caption(self.title(), theme.bold(22.0))
            .margin(12)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d((first - 0.5)..(last + 0.5), -0.5..6.5)
            .map_err(|e| draw_error(panel, e))?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(usize::from(*hours.end() - *hours.start()) + 1)
            .y_labels(7)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .x_desc("Hour of day")
            .label_style(theme.font(14.0))
            .axis_desc_style(theme.font(15.0))
            .draw()
            .map_err(|e| draw_error(panel, e))?;

        let cells = WEEKDAYS.iter().enumerate().flat_map(|(row, day)| {
            hours.clone().map(move |hour| (row, *day, hour))
        });
        chart
            .draw_series(cells.map(|(row, day, hour)| {
                let value = self.cell_value(heatmap.cell(day, hour));
                let shade = if max > 0.0 { value / max } else { 0.0 };
                #[allow(clippy::cast_precision_loss)]
                let y = (6 - row) as f64;
                let x = f64::from(hour);
                Rectangle::new(
                    [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                    GraphUtils::blend(theme.background, theme.heatmap, shade).filled(),
                )
            }))
            .map_err(|e| draw_error(panel, e))?;
        Ok(())
    }
}
