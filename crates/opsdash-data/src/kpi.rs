//! Scalar metrics for the KPI panel and summary export.

use crate::branch_totals::BranchTotals;
use crate::daily_trend::DailyTrend;
use crate::heatmap::HourHeatmap;
use crate::service_totals::ServiceTotals;
use chrono::NaiveDate;
use opsdash_common::{Money, Table};
use serde::{Deserialize, Serialize};

/// Flat set of headline metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Sum of revenue over all records.
    pub total_revenue: Money,
    /// Number of records.
    pub record_count: u64,
    /// Sum of appointment counts.
    pub total_appointments: u64,
    /// Total revenue divided by record count; zero for an empty table.
    pub average_ticket: Money,
    /// Branch with the highest revenue, ties broken by name.
    pub busiest_branch: Option<String>,
    /// Hour with the highest revenue across all days, ties to the earliest.
    pub busiest_hour: Option<u8>,
    /// Number of distinct branches.
    pub branch_count: usize,
    /// Number of distinct service types.
    pub service_count: usize,
    /// First date with records.
    pub first_date: Option<NaiveDate>,
    /// Last date with records.
    pub last_date: Option<NaiveDate>,
}

impl KpiSummary {
    /// Derives the summary from the table and its already computed views.
    #[must_use]
    pub fn compute(
        table: &Table,
        branches: &BranchTotals,
        services: &ServiceTotals,
        heatmap: &HourHeatmap,
        daily: &DailyTrend,
    ) -> Self {
        let total_revenue: Money = table.iter().map(|r| r.revenue()).sum();
        let record_count = table.len() as u64;
        let total_appointments = table.iter().map(|r| u64::from(r.appointments())).sum();
        let span = daily.span();

        Self {
            total_revenue,
            record_count,
            total_appointments,
            average_ticket: total_revenue.checked_div(record_count).unwrap_or(Money::ZERO),
            busiest_branch: branches.top().map(|row| row.name.clone()),
            busiest_hour: heatmap.busiest_hour(),
            branch_count: branches.len(),
            service_count: services.len(),
            first_date: span.map(|(first, _)| first),
            last_date: span.map(|(_, last)| last),
        }
    }

    /// Label/value rows for display, in panel order.
    #[must_use]
    pub fn display_rows(&self, currency_symbol: &str) -> Vec<(&'static str, String)> {
        let none = || "-".to_string();
        vec![
            (
                "Total Revenue",
                opsdash_common::format_currency(self.total_revenue, currency_symbol),
            ),
            ("Records", opsdash_common::group_thousands(&self.record_count.to_string())),
            (
                "Total Appointments",
                opsdash_common::group_thousands(&self.total_appointments.to_string()),
            ),
            (
                "Average Ticket",
                opsdash_common::format_currency(self.average_ticket, currency_symbol),
            ),
            ("Best Branch", self.busiest_branch.clone().unwrap_or_else(none)),
            (
                "Peak Hour",
                self.busiest_hour.map_or_else(none, opsdash_common::format_hour),
            ),
            ("Branches Tracked", self.branch_count.to_string()),
        ]
    }
}
