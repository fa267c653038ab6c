//! Daily revenue line chart.

use crate::traits::Panel;
use crate::utils::{draw_error, Area, GraphUtils, Theme};
use chrono::Duration;
use opsdash_common::RenderError;
use opsdash_data::AggregateViews;
use plotters::prelude::*;

/// At most this many date labels on the x axis.
const MAX_DATE_LABELS: usize = 12;

/// Revenue per calendar date with a shaded area under the line.
#[derive(Debug, Clone, Copy)]
pub struct DailyRevenuePanel {
    fill_gaps: bool,
}

impl DailyRevenuePanel {
    /// Creates a panel; with `fill_gaps` missing dates are drawn at zero
    /// instead of being bridged by the line.
    #[must_use]
    pub const fn new(fill_gaps: bool) -> Self {
        Self { fill_gaps }
    }
}

impl Panel for DailyRevenuePanel {
    fn name(&self) -> &'static str {
        "daily_revenue"
    }

    fn title(&self) -> &'static str {
        "Daily Revenue"
    }

    fn is_empty(&self, views: &AggregateViews) -> bool {
        views.daily.is_empty()
    }

    fn draw(&self, area: &Area<'_>, views: &AggregateViews, theme: &Theme) -> Result<(), RenderError> {
        let panel = self.name();
        let trend = if self.fill_gaps {
            views.daily.zero_filled()
        } else {
            views.daily.clone()
        };
        let Some((first, last)) = trend.span() else {
            return Err(RenderError::EmptyView { panel });
        };

        #[allow(clippy::cast_precision_loss)]
        let points: Vec<(f64, f64)> = trend
            .points()
            .iter()
            .map(|point| ((point.date - first).num_days() as f64, point.revenue.as_f64()))
            .collect();
        #[allow(clippy::cast_precision_loss)]
        let x_end = (last - first).num_days() as f64 + 0.5;
        let max = points.iter().map(|(_, y)| *y).fold(0.0, f64::max);
        let y_max = GraphUtils::value_axis_max(max);
        let symbol = theme.currency_symbol.as_str();

        let x_formatter = |value: &f64| {
            let rounded = value.round();
            if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            #[allow(clippy::cast_possible_truncation)]
            let date = first + Duration::days(rounded as i64);
            date.format("%d %b").to_string()
        };
        let y_formatter = |value: &f64| format!("{symbol}{value:.0}");

        let mut chart = ChartBuilder::on(area)
            .caption(self.title(), theme.bold(22.0))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(80)
            .build_cartesian_2d(-0.5..x_end, 0.0..y_max)
            .map_err(|e| draw_error(panel, e))?;

        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(points.len().min(MAX_DATE_LABELS))
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .x_desc("Date")
            .y_desc(format!("Revenue ({symbol})"))
            .label_style(theme.font(14.0))
            .axis_desc_style(theme.font(15.0));
        if !theme.enable_grid {
            mesh.disable_y_mesh();
        }
        mesh.draw().map_err(|e| draw_error(panel, e))?;

        chart
            .draw_series(AreaSeries::new(
                points.iter().copied(),
                0.0,
                theme.trend.mix(0.15).filled(),
            ))
            .map_err(|e| draw_error(panel, e))?;
        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                theme.trend.stroke_width(3),
            ))
            .map_err(|e| draw_error(panel, e))?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|point| Circle::new(*point, 5, theme.trend.filled())),
            )
            .map_err(|e| draw_error(panel, e))?;
        Ok(())
    }
}
