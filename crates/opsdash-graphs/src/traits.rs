//! Panel trait definitions for the dashboard layout.

use crate::utils::{Area, Theme};
use opsdash_common::RenderError;
use opsdash_data::AggregateViews;

/// One chart or table cell of the dashboard.
pub trait Panel {
    /// Stable identifier used in logs and render reports.
    fn name(&self) -> &'static str;

    /// Caption drawn above the panel.
    fn title(&self) -> &'static str;

    /// Whether the view this panel draws has nothing to show.
    fn is_empty(&self, views: &AggregateViews) -> bool;

    /// Draws the panel into `area`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Draw`] when the backend rejects an element.
    fn draw(&self, area: &Area<'_>, views: &AggregateViews, theme: &Theme) -> Result<(), RenderError>;
}
