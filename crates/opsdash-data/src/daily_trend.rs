//! Revenue per calendar date.

use chrono::NaiveDate;
use opsdash_common::{Money, Table};
use std::collections::BTreeMap;

/// Totals for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyPoint {
    /// Calendar date.
    pub date: NaiveDate,
    /// Summed revenue.
    pub revenue: Money,
    /// Summed appointment counts.
    pub appointments: u64,
}

/// Revenue per date in ascending date order.
///
/// Dates without any record are absent; use [`DailyTrend::zero_filled`] for a
/// continuous series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyTrend {
    points: Vec<DailyPoint>,
}

impl DailyTrend {
    /// Groups `table` by calendar date.
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        Self::merge(table.iter().map(|record| DailyPoint {
            date: record.date(),
            revenue: record.revenue(),
            appointments: u64::from(record.appointments()),
        }))
    }

    /// Builds a trend from points in any order. Points sharing a date are
    /// summed into one.
    #[must_use]
    pub fn from_points(points: Vec<DailyPoint>) -> Self {
        Self::merge(points)
    }

    fn merge(points: impl IntoIterator<Item = DailyPoint>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, (Money, u64)> = BTreeMap::new();
        for point in points {
            let entry = by_date.entry(point.date).or_default();
            entry.0 += point.revenue;
            entry.1 += point.appointments;
        }

        Self {
            points: by_date
                .into_iter()
                .map(|(date, (revenue, appointments))| DailyPoint {
                    date,
                    revenue,
                    appointments,
                })
                .collect(),
        }
    }

    /// Points in ascending date order.
    #[must_use]
    pub fn points(&self) -> &[DailyPoint] {
        &self.points
    }

    /// Number of dates present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no dates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest and latest date.
    #[must_use]
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }

    /// Copy with every missing date between the first and last inserted at zero.
    #[must_use]
    pub fn zero_filled(&self) -> Self {
        let Some((first, last)) = self.span() else {
            return Self::default();
        };

        let mut present = self.points.iter().peekable();
        let points = first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| match present.next_if(|point| point.date == date) {
                Some(point) => *point,
                None => DailyPoint {
                    date,
                    revenue: Money::ZERO,
                    appointments: 0,
                },
            })
            .collect();
        Self { points }
    }

    /// Dates between the first and last that have no records.
    #[must_use]
    pub fn missing_dates(&self) -> Vec<NaiveDate> {
        let present: Vec<NaiveDate> = self.points.iter().map(|p| p.date).collect();
        self.zero_filled()
            .points
            .iter()
            .map(|p| p.date)
            .filter(|date| present.binary_search(date).is_err())
            .collect()
    }
}
