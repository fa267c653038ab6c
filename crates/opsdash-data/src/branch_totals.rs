//! Revenue per branch.

use crate::views::{rank_by_revenue, CategoryTotal};
use opsdash_common::{Money, Record, Table};

/// Per-branch totals ordered by revenue descending, ties by branch name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchTotals {
    rows: Vec<CategoryTotal>,
}

impl BranchTotals {
    /// Groups `table` by branch.
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        Self {
            rows: rank_by_revenue(table, Record::branch),
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

    /// Number of branches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no branch has any record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Highest-revenue branch.
    #[must_use]
    pub fn top(&self) -> Option<&CategoryTotal> {
        self.rows.first()
    }

    /// Revenue summed over all branches.
    #[must_use]
    pub fn total_revenue(&self) -> Money {
        self.rows.iter().map(|row| row.revenue).sum()
    }

    /// Revenue of one branch.
    #[must_use]
    pub fn revenue_of(&self, branch: &str) -> Option<Money> {
        self.rows
            .iter()
            .find(|row| row.name == branch)
            .map(|row| row.revenue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdash_common::test_utils::{money, record, table_fixtures};

    #[test]
    fn test_two_branch_scenario() {
        let totals = BranchTotals::from_table(&table_fixtures::two_branches());

        let names: Vec<&str> = totals.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(totals.revenue_of("A"), Some(money("150")));
        assert_eq!(totals.revenue_of("B"), Some(money("75")));
        assert_eq!(totals.rows()[0].records, 2);
    }

    #[test]
    fn test_ties_break_by_name() {
        let table = Table::new(vec![
            record("Zeta", "2024-01-01 09:00", "cut", "40"),
            record("Alpha", "2024-01-01 10:00", "cut", "40"),
            record("Mid", "2024-01-01 11:00", "cut", "90"),
        ]);
        let totals = BranchTotals::from_table(&table);

        let names: Vec<&str> = totals.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Mid", "Alpha", "Zeta"]);
        assert_eq!(totals.top().map(|r| r.name.as_str()), Some("Mid"));
    }

    #[test]
    fn test_per_row_ratios() {
        let totals = BranchTotals::from_table(&table_fixtures::two_branches());
        let a = &totals.rows()[0];
        assert_eq!(a.average_ticket(), money("75"));
        assert_eq!(a.revenue_per_appointment(), Some(money("75")));
    }

    #[test]
    fn test_empty_table() {
        let totals = BranchTotals::from_table(&Table::default());
        assert!(totals.is_empty());
        assert_eq!(totals.top(), None);
        assert_eq!(totals.total_revenue(), Money::ZERO);
    }
}
