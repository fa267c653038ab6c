//! The bundle of derived views and the category grouping they share.

use crate::branch_totals::BranchTotals;
use crate::daily_trend::DailyTrend;
use crate::heatmap::HourHeatmap;
use crate::kpi::KpiSummary;
use crate::service_totals::ServiceTotals;
use opsdash_common::{Money, Record, Table};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Revenue and volume accumulated for one category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category value (branch identifier or service type).
    pub name: String,
    /// Summed revenue.
    pub revenue: Money,
    /// Summed appointment counts.
    pub appointments: u64,
    /// Number of records.
    pub records: u64,
}

impl CategoryTotal {
    /// Revenue per record, zero when there are none.
    #[must_use]
    pub fn average_ticket(&self) -> Money {
        self.revenue.checked_div(self.records).unwrap_or(Money::ZERO)
    }

    /// Revenue per appointment, `None` when no appointments were counted.
    #[must_use]
    pub fn revenue_per_appointment(&self) -> Option<Money> {
        self.revenue.checked_div(self.appointments)
    }
}

/// Groups records by `key`, ordered by revenue descending then name ascending.
pub(crate) fn rank_by_revenue<'a, F>(table: &'a Table, key: F) -> Vec<CategoryTotal>
where
    F: Fn(&'a Record) -> &'a str,
{
    let mut groups: HashMap<&str, CategoryTotal> = HashMap::new();
    for record in table {
        let name = key(record);
        let entry = groups.entry(name).or_insert_with(|| CategoryTotal {
            name: name.to_string(),
            revenue: Money::ZERO,
            appointments: 0,
            records: 0,
        });
        entry.revenue += record.revenue();
        entry.appointments += u64::from(record.appointments());
        entry.records += 1;
    }

    let mut ranked: Vec<CategoryTotal> = groups.into_values().collect();
    ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.name.cmp(&b.name)));
    ranked
}

/// Every derived view of one table, computed together and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateViews {
    /// Revenue per branch.
    pub branches: BranchTotals,
    /// Day-of-week by hour-of-day matrix.
    pub heatmap: HourHeatmap,
    /// Revenue per service type.
    pub services: ServiceTotals,
    /// Revenue per calendar date.
    pub daily: DailyTrend,
    /// Scalar metrics.
    pub kpis: KpiSummary,
}

impl AggregateViews {
    /// Computes all views from `table`.
    #[must_use]
    pub fn compute(table: &Table) -> Self {
        let branches = BranchTotals::from_table(table);
        let heatmap = HourHeatmap::from_table(table);
        let services = ServiceTotals::from_table(table);
        let daily = DailyTrend::from_table(table);
        let kpis = KpiSummary::compute(table, &branches, &services, &heatmap, &daily);

        debug!(
            branches = branches.len(),
            services = services.len(),
            days = daily.len(),
            "Computed aggregate views"
        );

        Self {
            branches,
            heatmap,
            services,
            daily,
            kpis,
        }
    }
}
