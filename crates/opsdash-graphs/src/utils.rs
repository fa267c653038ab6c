//! Shared drawing helpers: theme colours, fonts, placeholders and bar charts.

use opsdash_common::{format_currency_whole, truncate_string, RenderError};
use opsdash_config::{parse_hex_color, ColorsConfig, DashboardConfig};
use opsdash_data::CategoryTotal;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fmt::Display;

/// Drawing area every panel draws into.
pub type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Maximum characters of a category label under a bar.
pub const MAX_LABEL_CHARS: usize = 14;

/// Resolved colours and fonts for one dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Canvas fill.
    pub background: RGBColor,
    /// Titles, labels and axis text.
    pub text: RGBColor,
    /// Branch revenue bars.
    pub branch_bars: RGBColor,
    /// Hottest heatmap cell; cooler cells blend towards the background.
    pub heatmap: RGBColor,
    /// Daily revenue line and markers.
    pub trend: RGBColor,
    /// KPI table header row.
    pub table_header: RGBColor,
    /// Service slices and bars, cycled.
    pub service_palette: Vec<RGBColor>,
    /// Font family name handed to plotters.
    pub font_family: String,
    /// Currency symbol for labels.
    pub currency_symbol: String,
    /// Whether value-axis grid lines are drawn.
    pub enable_grid: bool,
    /// Whether bars carry value labels.
    pub annotate_bars: bool,
}

impl Theme {
    /// Builds a theme from dashboard settings. Colours that fail to parse fall
    /// back to the defaults.
    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        let defaults = ColorsConfig::default();
        let colors = &config.styling.colors;
        let pick = |value: &str, fallback: &str| {
            parse_hex_color(value)
                .or_else(|| parse_hex_color(fallback))
                .map_or(BLACK, |(r, g, b)| RGBColor(r, g, b))
        };

        let mut service_palette: Vec<RGBColor> = colors
            .service_palette
            .iter()
            .filter_map(|value| parse_hex_color(value))
            .map(|(r, g, b)| RGBColor(r, g, b))
            .collect();
        if service_palette.is_empty() {
            service_palette = defaults
                .service_palette
                .iter()
                .filter_map(|value| parse_hex_color(value))
                .map(|(r, g, b)| RGBColor(r, g, b))
                .collect();
        }

        Self {
            background: pick(&colors.background, &defaults.background),
            text: pick(&colors.text, &defaults.text),
            branch_bars: pick(&colors.branch_bars, &defaults.branch_bars),
            heatmap: pick(&colors.heatmap, &defaults.heatmap),
            trend: pick(&colors.trend, &defaults.trend),
            table_header: pick(&colors.table_header, &defaults.table_header),
            service_palette,
            font_family: config.font_family.clone(),
            currency_symbol: config.currency_symbol.clone(),
            enable_grid: config.styling.enable_grid,
            annotate_bars: config.annotate_bars,
        }
    }

    /// Regular text in the theme colour.
    #[must_use]
    pub fn font(&self, size: f64) -> TextStyle<'_> {
        (self.font_family.as_str(), size).into_font().color(&self.text)
    }

    /// Bold text in the theme colour.
    #[must_use]
    pub fn bold(&self, size: f64) -> TextStyle<'_> {
        (self.font_family.as_str(), size)
            .into_font()
            .style(FontStyle::Bold)
            .color(&self.text)
    }

    /// Palette colour for the `index`th category.
    #[must_use]
    pub fn service_color(&self, index: usize) -> RGBColor {
        self.service_palette
            .get(index % self.service_palette.len().max(1))
            .copied()
            .unwrap_or(self.branch_bars)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

/// Utility functions for graph layout and scaling.
pub struct GraphUtils;

impl GraphUtils {
    /// Upper bound for a value axis: the maximum plus headroom for labels,
    /// never zero.
    #[must_use]
    pub fn value_axis_max(max: f64) -> f64 {
        if max > 0.0 {
            max * 1.15
        } else {
            1.0
        }
    }

    /// Linear blend from `from` to `to`; `t` is clamped to 0..=1.
    #[must_use]
    pub fn blend(from: RGBColor, to: RGBColor, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let channel = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        RGBColor(channel(from.0, to.0), channel(from.1, to.1), channel(from.2, to.2))
    }

    /// Label for an integer tick, or an empty string for fractional ticks and
    /// indices without a label.
    #[must_use]
    pub fn index_label(value: f64, labels: &[String]) -> String {
        let rounded = value.round();
        if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }
}

/// Wraps a backend error for `panel`.
pub fn draw_error(panel: &'static str, err: impl Display) -> RenderError {
    RenderError::Draw {
        panel,
        message: err.to_string(),
    }
}

/// Clears `area` and writes the panel title over a centred "No data" notice.
///
/// # Errors
///
/// Returns [`RenderError::Draw`] if the backend rejects the drawing.
pub fn draw_placeholder(
    area: &Area<'_>,
    panel: &'static str,
    title: &str,
    theme: &Theme,
) -> Result<(), RenderError> {
    area.fill(&theme.background).map_err(|e| draw_error(panel, e))?;
    let (width, height) = area.dim_in_pixel();
    let (cx, cy) = (to_i32(width) / 2, to_i32(height) / 2);

    area.draw(&Text::new(
        title.to_string(),
        (cx, 24),
        theme.bold(22.0).pos(Pos::new(HPos::Center, VPos::Center)),
    ))
    .map_err(|e| draw_error(panel, e))?;
    area.draw(&Text::new(
        "No data".to_string(),
        (cx, cy),
        theme.font(28.0).color(&RGBColor(150, 150, 150)).pos(Pos::new(HPos::Center, VPos::Center)),
    ))
    .map_err(|e| draw_error(panel, e))?;
    Ok(())
}

/// Vertical bar chart of category revenue, used by the branch panel and the
/// bar variant of the service panel.
///
/// # Errors
///
/// Returns [`RenderError::Draw`] if the backend rejects the drawing.
pub fn draw_category_bars(
    area: &Area<'_>,
    panel: &'static str,
    title: &str,
    rows: &[CategoryTotal],
    color_of: impl Fn(usize) -> RGBColor,
    theme: &Theme,
) -> Result<(), RenderError> {
    let labels: Vec<String> = rows
        .iter()
        .map(|row| truncate_string(&row.name, MAX_LABEL_CHARS))
        .collect();
    let max = rows.iter().map(|row| row.revenue.as_f64()).fold(0.0, f64::max);
    let y_max = GraphUtils::value_axis_max(max);
    // Index axis from -0.5 so bar i is centred on tick i
    #[allow(clippy::cast_precision_loss)]
    let x_end = rows.len() as f64 - 0.5;
    let symbol = theme.currency_symbol.as_str();

    let x_formatter = |value: &f64| GraphUtils::index_label(*value, &labels);
    let y_formatter = |value: &f64| format!("{symbol}{value:.0}");

    let mut chart = ChartBuilder::on(area)
        .caption(title, theme.bold(22.0))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..x_end, 0.0..y_max)
        .map_err(|e| draw_error(panel, e))?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(rows.len())
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .y_desc(format!("Revenue ({symbol})"))
        .label_style(theme.font(14.0))
        .axis_desc_style(theme.font(15.0));
    if !theme.enable_grid {
        mesh.disable_y_mesh();
    }
    mesh.draw().map_err(|e| draw_error(panel, e))?;

    chart
        .draw_series(rows.iter().enumerate().map(|(i, row)| {
            #[allow(clippy::cast_precision_loss)]
            let x = i as f64;
            Rectangle::new(
                [(x - 0.35, 0.0), (x + 0.35, row.revenue.as_f64())],
                color_of(i).filled(),
            )
        }))
        .map_err(|e| draw_error(panel, e))?;

    if theme.annotate_bars {
        chart
            .draw_series(rows.iter().enumerate().map(|(i, row)| {
                #[allow(clippy::cast_precision_loss)]
                let x = i as f64;
                Text::new(
                    format_currency_whole(row.revenue, symbol),
                    (x, row.revenue.as_f64() + y_max * 0.01),
                    theme.font(13.0).pos(Pos::new(HPos::Center, VPos::Bottom)),
                )
            }))
            .map_err(|e| draw_error(panel, e))?;
    }
    Ok(())
}

/// Converts a pixel dimension to a signed coordinate.
#[must_use]
pub fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
