//! Headline metrics table.

use crate::traits::Panel;
use crate::utils::{draw_error, to_i32, Area, Theme};
use opsdash_common::RenderError;
use opsdash_data::AggregateViews;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const MAX_ROW_HEIGHT: i32 = 48;
const STRIPE: RGBColor = RGBColor(245, 245, 245);
const BORDER: RGBColor = RGBColor(210, 210, 210);

/// Two-column table of the KPI summary. Always drawn; an empty table shows
/// zero totals.
#[derive(Debug, Clone, Copy, Default)]
pub struct KpiTablePanel;

impl Panel for KpiTablePanel {
    fn name(&self) -> &'static str {
        "kpi_table"
    }

    fn title(&self) -> &'static str {
        "Key Metrics"
    }

    fn is_empty(&self, _views: &AggregateViews) -> bool {
        false
    }

    fn draw(&self, area: &Area<'_>, views: &AggregateViews, theme: &Theme) -> Result<(), RenderError> {
        let panel = self.name();
        let area = area
            .titled(self.title(), theme.bold(22.0))
            .map_err(|e| draw_error(panel, e))?;
        let rows = views.kpis.display_rows(&theme.currency_symbol);

        let (width, height) = area.dim_in_pixel();
        let (width, height) = (to_i32(width), to_i32(height));
        let count = i32::try_from(rows.len()).unwrap_or(i32::MAX - 1) + 1;
        let row_height = ((height - 20) / count).clamp(1, MAX_ROW_HEIGHT);
        let table_width = width * 9 / 10;
        let left = (width - table_width) / 2;
        let right = left + table_width;
        let divider = left + table_width / 2;
        let mut top = 10;

        let header_text = theme.bold(18.0).color(&WHITE).pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Rectangle::new(
            [(left, top), (right, top + row_height)],
            theme.table_header.filled(),
        ))
        .map_err(|e| draw_error(panel, e))?;
        for (label, x) in [("Metric", (left + divider) / 2), ("Value", (divider + right) / 2)] {
            area.draw(&Text::new(label, (x, top + row_height / 2), header_text.clone()))
                .map_err(|e| draw_error(panel, e))?;
        }
        top += row_height;

        let label_text = theme.bold(16.0).pos(Pos::new(HPos::Left, VPos::Center));
        let value_text = theme.font(16.0).pos(Pos::new(HPos::Right, VPos::Center));
        for (index, (label, value)) in rows.iter().enumerate() {
            let fill = if index % 2 == 0 { theme.background } else { STRIPE };
            area.draw(&Rectangle::new([(left, top), (right, top + row_height)], fill.filled()))
                .map_err(|e| draw_error(panel, e))?;
            area.draw(&Rectangle::new([(left, top), (right, top + row_height)], BORDER.stroke_width(1)))
                .map_err(|e| draw_error(panel, e))?;

            let middle = top + row_height / 2;
            area.draw(&Text::new(*label, (left + 12, middle), label_text.clone()))
                .map_err(|e| draw_error(panel, e))?;
            area.draw(&Text::new(value.as_str(), (right - 12, middle), value_text.clone()))
                .map_err(|e| draw_error(panel, e))?;
            top += row_height;
        }
        Ok(())
    }
}
