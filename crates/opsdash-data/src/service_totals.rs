//! Revenue per service type.

use crate::views::{rank_by_revenue, CategoryTotal};
use opsdash_common::{Money, Record, Table};

/// Per-service totals ordered by revenue descending, ties by service name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceTotals {
    rows: Vec<CategoryTotal>,
}

impl ServiceTotals {
    /// Groups `table` by service type.
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        Self {
            rows: rank_by_revenue(table, Record::service),
        }
    }

    /// Wraps rows that are already in presentation order.
    #[must_use]
    pub const fn from_rows(rows: Vec<CategoryTotal>) -> Self {
        Self { rows }
    }

    /// Rows in presentation order.
    #[must_use]
    pub fn rows(&self) -> &[CategoryTotal] {
        &self.rows
    }

    /// Number of service types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Revenue summed over all services.
    #[must_use]
    pub fn total_revenue(&self) -> Money {
        self.rows.iter().map(|row| row.revenue).sum()
    }

    /// Each service's share of total revenue, in percent, in row order.
    #[must_use]
    pub fn shares(&self) -> Vec<f64> {
        let total = self.total_revenue();
        self.rows
            .iter()
            .map(|row| row.revenue.percent_of(total))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdash_common::test_utils::{money, table_fixtures};

    #[test]
    fn test_single_service_day() {
        let totals = ServiceTotals::from_table(&table_fixtures::single_day_hourly());
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.rows()[0].name, "cut");
        assert_eq!(totals.rows()[0].revenue, money("180"));
        assert_eq!(totals.rows()[0].records, 9);
    }

    #[test]
    fn test_ordering_and_shares() {
        let totals = ServiceTotals::from_table(&table_fixtures::mixed_week());
        let names: Vec<&str> = totals.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Colour", "Haircut", "Beard Trim"]);

        let sum: f64 = totals.shares().iter().sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_shares() {
        assert!(ServiceTotals::from_table(&Table::default()).shares().is_empty());
    }
}
