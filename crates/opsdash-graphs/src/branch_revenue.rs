//! Revenue by branch bar chart.

use crate::traits::Panel;
use crate::utils::{draw_category_bars, Area, Theme};
use opsdash_common::RenderError;
use opsdash_data::AggregateViews;

/// Bars of total revenue per branch, highest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchRevenuePanel;

impl Panel for BranchRevenuePanel {
    fn name(&self) -> &'static str {
        "branch_revenue"
    }

    fn title(&self) -> &'static str {
        "Revenue by Branch"
    }

    fn is_empty(&self, views: &AggregateViews) -> bool {
        views.branches.is_empty()
    }

    fn draw(&self, area: &Area<'_>, views: &AggregateViews, theme: &Theme) -> Result<(), RenderError> {
        draw_category_bars(
            area,
            self.name(),
            self.title(),
            views.branches.rows(),
            |_| theme.branch_bars,
            theme,
        )
    }
}
