//! Revenue share by service type, as a pie or bar chart.

use crate::traits::Panel;
use crate::utils::{draw_category_bars, draw_error, to_i32, Area, Theme, MAX_LABEL_CHARS};
use opsdash_common::{truncate_string, RenderError};
use opsdash_config::ServiceChart;
use opsdash_data::AggregateViews;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::{PI, TAU};

/// Slices below this share get no percentage label.
const MIN_LABELLED_SHARE: f64 = 3.0;

/// Vertical pitch of legend entries in pixels.
const LEGEND_ROW_HEIGHT: i32 = 26;

/// Service revenue breakdown.
#[derive(Debug, Clone, Copy)]
pub struct ServiceBreakdownPanel {
    chart: ServiceChart,
}

impl ServiceBreakdownPanel {
    /// Creates a panel drawing `chart`.
    #[must_use]
    pub const fn new(chart: ServiceChart) -> Self {
        Self { chart }
    }

    fn draw_pie(&self, area: &Area<'_>, views: &AggregateViews, theme: &Theme) -> Result<(), RenderError> {
        let panel = self.name();
        let area = area
            .titled(self.title(), theme.bold(22.0))
            .map_err(|e| draw_error(panel, e))?;
        let rows = views.services.rows();
        let shares = views.services.shares();

        let (width, height) = area.dim_in_pixel();
        let (width, height) = (to_i32(width), to_i32(height));
        let legend_width = width / 3;
        let pie_width = width - legend_width;
        let center = (pie_width / 2, height / 2);
        let radius = f64::from(pie_width.min(height)) * 0.4;

        if shares.iter().all(|share| *share <= 0.0) {
            #[allow(clippy::cast_possible_truncation)]
            let outline = Circle::new(center, radius.round() as i32, theme.text.stroke_width(1));
            area.draw(&outline).map_err(|e| draw_error(panel, e))?;
        }

        // Clockwise from twelve o'clock
        let mut start = -PI / 2.0;
        for (index, share) in shares.iter().enumerate() {
            if *share <= 0.0 {
                continue;
            }
            let sweep = share / 100.0 * TAU;
            area.draw(&Polygon::new(
                slice_points(center, radius, start, sweep),
                theme.service_color(index).filled(),
            ))
            .map_err(|e| draw_error(panel, e))?;

            if *share >= MIN_LABELLED_SHARE {
                let label_at = polar(center, radius * 0.65, start + sweep / 2.0);
                area.draw(&Text::new(
                    format!("{share:.1}%"),
                    label_at,
                    theme
                        .bold(15.0)
                        .color(&WHITE)
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                ))
                .map_err(|e| draw_error(panel, e))?;
            }
            start += sweep;
        }

        let top = legend_top(height, rows.len());
        let x = pie_width + 10;
        for (index, row) in (0..).zip(rows) {
            let y = top + LEGEND_ROW_HEIGHT * index;
            let index = usize::try_from(index).unwrap_or_default();
            area.draw(&Rectangle::new(
                [(x, y), (x + 16, y + 16)],
                theme.service_color(index).filled(),
            ))
            .map_err(|e| draw_error(panel, e))?;
            area.draw(&Text::new(
                truncate_string(&row.name, MAX_LABEL_CHARS),
                (x + 24, y + 8),
                theme.font(15.0).pos(Pos::new(HPos::Left, VPos::Center)),
            ))
            .map_err(|e| draw_error(panel, e))?;
        }
        Ok(())
    }
}

impl Panel for ServiceBreakdownPanel {
    fn name(&self) -> &'static str {
        "service_breakdown"
    }

    fn title(&self) -> &'static str {
        "Revenue by Service"
    }

    fn is_empty(&self, views: &AggregateViews) -> bool {
        views.services.is_empty()
    }

    fn draw(&self, area: &Area<'_>, views: &AggregateViews, theme: &Theme) -> Result<(), RenderError> {
        match self.chart {
            ServiceChart::Pie => self.draw_pie(area, views, theme),
            ServiceChart::Bar => draw_category_bars(
                area,
                self.name(),
                self.title(),
                views.services.rows(),
                |index| theme.service_color(index),
                theme,
            ),
        }
    }
}

/// Top edge of a legend with `count` entries, centred vertically and clamped
/// to the panel top when it does not fit.
fn legend_top(height: i32, count: usize) -> i32 {
    let count = i32::try_from(count).unwrap_or(i32::MAX);
    (height.saturating_sub(LEGEND_ROW_HEIGHT.saturating_mul(count)) / 2).max(0)
}

#[allow(clippy::cast_possible_truncation)]
fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 + (radius * angle.sin()).round() as i32,
    )
}

/// Outline of a pie slice: the centre followed by points along the arc.
fn slice_points(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = ((sweep / 0.02).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    #[allow(clippy::cast_precision_loss)]
    points.extend((0..=steps).map(|step| polar(center, radius, start + sweep * step as f64 / steps as f64)));
    points
}
