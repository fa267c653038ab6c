//! Day-of-week by hour-of-day demand matrix.

use chrono::Weekday;
use opsdash_common::{Money, Table, WEEKDAYS};
use std::ops::RangeInclusive;

/// Hours in a day; columns of the matrix.
pub const HOURS: usize = 24;

/// Days in a week; rows of the matrix, Monday first.
pub const DAYS: usize = 7;

/// One cell of the matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeatCell {
    /// Summed revenue.
    pub revenue: Money,
    /// Summed appointment counts.
    pub appointments: u64,
    /// Number of records that fell into the cell.
    pub records: u64,
}

impl HeatCell {
    /// Whether no record fell into the cell. A cell holding only zero-revenue,
    /// zero-appointment records is still occupied.
    #[must_use]
    pub const fn is_vacant(&self) -> bool {
        self.records == 0
    }
}

/// Revenue, appointments and record counts per (weekday, whole hour). Every
/// cell exists; a matrix with no records in any cell counts as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourHeatmap {
    cells: [[HeatCell; HOURS]; DAYS],
}

impl Default for HourHeatmap {
    fn default() -> Self {
        Self {
            cells: [[HeatCell::default(); HOURS]; DAYS],
        }
    }
}

impl HourHeatmap {
    /// Accumulates `table` into the matrix.
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        let mut heatmap = Self::default();
        for record in table {
            let cell = &mut heatmap.cells[day_index(record.weekday())][usize::from(record.hour())];
            cell.revenue += record.revenue();
            cell.appointments += u64::from(record.appointments());
            cell.records += 1;
        }
        heatmap
    }

    /// Rebuilds a matrix from explicit cells, e.g. when re-reading an export.
    /// Hours outside 0-23 are ignored.
    #[must_use]
    pub fn from_cells(cells: impl IntoIterator<Item = (Weekday, u8, HeatCell)>) -> Self {
        let mut heatmap = Self::default();
        for (day, hour, cell) in cells {
            if usize::from(hour) < HOURS {
                heatmap.cells[day_index(day)][usize::from(hour)] = cell;
            }
        }
        heatmap
    }

    /// Cell for one weekday and hour.
    ///
    /// # Panics
    ///
    /// Panics if `hour` is 24 or above.
    #[must_use]
    pub fn cell(&self, day: Weekday, hour: u8) -> HeatCell {
        self.cells[day_index(day)][usize::from(hour)]
    }

    /// Iterates all 168 cells, Monday 00:00 first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, u8, HeatCell)> + '_ {
        WEEKDAYS.into_iter().flat_map(move |day| {
            (0..HOURS).map(move |hour| {
                #[allow(clippy::cast_possible_truncation)]
                let hour = hour as u8;
                (day, hour, self.cell(day, hour))
            })
        })
    }

    /// Whether no cell holds a record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(HeatCell::is_vacant)
    }

    /// Totals per hour summed across all days.
    #[must_use]
    pub fn hourly_totals(&self) -> [HeatCell; HOURS] {
        let mut hourly = [HeatCell::default(); HOURS];
        for row in &self.cells {
            for (total, cell) in hourly.iter_mut().zip(row) {
                total.revenue += cell.revenue;
                total.appointments += cell.appointments;
                total.records += cell.records;
            }
        }
        hourly
    }

    /// Hour with the highest revenue across all days, considering only hours
    /// that hold records. Revenue ties are broken by appointment count, then
    /// by the earliest hour. `None` when empty.
    #[must_use]
    pub fn busiest_hour(&self) -> Option<u8> {
        let hourly = self.hourly_totals();
        let mut best: Option<usize> = None;
        for (hour, total) in hourly.iter().enumerate() {
            if total.is_vacant() {
                continue;
            }
            let better = best.map_or(true, |b| {
                (total.revenue, total.appointments) > (hourly[b].revenue, hourly[b].appointments)
            });
            if better {
                best = Some(hour);
            }
        }
        best.and_then(|hour| u8::try_from(hour).ok())
    }

    /// Smallest hour span covering every occupied cell.
    #[must_use]
    pub fn active_hours(&self) -> Option<RangeInclusive<u8>> {
        let mut hours =
            (0..HOURS).filter(|hour| self.cells.iter().any(|row| !row[*hour].is_vacant()));
        let first = hours.next()?;
        let last = hours.last().unwrap_or(first);
        Some(u8::try_from(first).ok()?..=u8::try_from(last).ok()?)
    }

    /// Largest revenue of any cell, used to scale shading.
    #[must_use]
    pub fn max_revenue(&self) -> Money {
        self.iter().map(|(_, _, cell)| cell.revenue).max().unwrap_or_default()
    }

    /// Largest appointment count of any cell.
    #[must_use]
    pub fn max_appointments(&self) -> u64 {
        self.iter().map(|(_, _, cell)| cell.appointments).max().unwrap_or_default()
    }
}

fn day_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdash_common::test_utils::{money, record, table_fixtures, ts};
    use opsdash_common::Record;

    #[test]
    fn test_hours_floor_into_buckets() {
        // 2024-01-01 is a Monday
        let table = Table::new(vec![
            record("A", "2024-01-01 09:00", "cut", "10"),
            record("A", "2024-01-01 09:59", "cut", "5"),
            record("A", "2024-01-02 10:00", "cut", "7"),
        ]);
        let heatmap = HourHeatmap::from_table(&table);

        assert_eq!(heatmap.cell(Weekday::Mon, 9).revenue, money("15"));
        assert_eq!(heatmap.cell(Weekday::Mon, 9).appointments, 2);
        assert_eq!(heatmap.cell(Weekday::Mon, 9).records, 2);
        assert_eq!(heatmap.cell(Weekday::Tue, 10).revenue, money("7"));
        assert_eq!(heatmap.cell(Weekday::Sun, 3), HeatCell::default());
        assert_eq!(heatmap.iter().count(), DAYS * HOURS);
    }

    #[test]
    fn test_busiest_hour_uniform_ties_to_earliest() {
        let heatmap = HourHeatmap::from_table(&table_fixtures::single_day_hourly());
        assert_eq!(heatmap.busiest_hour(), Some(9));
        assert_eq!(heatmap.active_hours(), Some(9..=17));
    }

    #[test]
    fn test_busiest_hour_collapses_days() {
        let table = Table::new(vec![
            record("A", "2024-01-01 09:00", "cut", "30"),
            record("A", "2024-01-02 14:00", "cut", "20"),
            record("A", "2024-01-03 14:00", "cut", "20"),
        ]);
        assert_eq!(HourHeatmap::from_table(&table).busiest_hour(), Some(14));
    }

    fn free_visit(timestamp: &str, appointments: u32) -> Record {
        Record::new("A", ts(timestamp), "consult", Money::ZERO, appointments).unwrap()
    }

    #[test]
    fn test_busiest_hour_without_revenue_uses_appointments() {
        let table = Table::new(vec![
            free_visit("2024-01-01 10:00", 1),
            free_visit("2024-01-01 14:00", 3),
        ]);
        let heatmap = HourHeatmap::from_table(&table);
        assert_eq!(heatmap.busiest_hour(), Some(14));
        assert_eq!(heatmap.active_hours(), Some(10..=14));
    }

    #[test]
    fn test_busiest_hour_skips_hours_without_records() {
        let table = Table::new(vec![
            free_visit("2024-01-01 11:00", 0),
            free_visit("2024-01-02 16:00", 0),
        ]);
        assert_eq!(HourHeatmap::from_table(&table).busiest_hour(), Some(11));
    }

    #[test]
    fn test_zero_valued_record_is_not_empty() {
        let table = Table::new(vec![free_visit("2024-01-03 08:30", 0)]);
        let heatmap = HourHeatmap::from_table(&table);

        assert!(!heatmap.is_empty());
        assert_eq!(heatmap.cell(Weekday::Wed, 8).records, 1);
        assert_eq!(heatmap.cell(Weekday::Wed, 8).revenue, Money::ZERO);
        assert_eq!(heatmap.busiest_hour(), Some(8));
        assert_eq!(heatmap.active_hours(), Some(8..=8));
        assert_eq!(heatmap.hourly_totals()[8].records, 1);
    }

    #[test]
    fn test_empty_table_is_all_zero() {
        let heatmap = HourHeatmap::from_table(&Table::default());
        assert!(heatmap.is_empty());
        assert_eq!(heatmap.busiest_hour(), None);
        assert_eq!(heatmap.active_hours(), None);
        assert!(heatmap.iter().all(|(_, _, cell)| cell == HeatCell::default()));
    }
}
