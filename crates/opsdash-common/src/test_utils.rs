//! Test utilities and shared fixtures for the operations dashboard.
//!
//! Enabled for other crates through the `testing` feature.

use crate::types::{Money, Record, Table};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        fmt().with_test_writer().with_env_filter(filter).init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Parses `YYYY-MM-DD HH:MM` into a timestamp, panicking on bad fixtures.
pub fn ts(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .unwrap_or_else(|e| panic!("bad fixture timestamp {value}: {e}"))
}

/// Parses `YYYY-MM-DD` into a date, panicking on bad fixtures.
pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .unwrap_or_else(|e| panic!("bad fixture date {value}: {e}"))
}

/// Parses a decimal string into [`Money`], panicking on bad fixtures.
pub fn money(value: &str) -> Money {
    value
        .parse()
        .unwrap_or_else(|e| panic!("bad fixture amount {value}: {e}"))
}

/// Builds a single-appointment record.
pub fn record(branch: &str, timestamp: &str, service: &str, revenue: &str) -> Record {
    Record::new(branch, ts(timestamp), service, money(revenue), 1)
        .unwrap_or_else(|e| panic!("bad fixture record: {e}"))
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Writes `contents` to `name` inside `dir` and returns the path.
pub fn write_file(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture file");
    path
}

/// Table fixtures mirroring the documented scenarios.
pub mod table_fixtures {
    use super::*;

    /// Two branches: `A` with 100 and 50, `B` with 75.
    pub fn two_branches() -> Table {
        Table::new(vec![
            record("A", "2024-01-01 09:00", "cut", "100"),
            record("A", "2024-01-02 10:30", "colour", "50"),
            record("B", "2024-01-01 11:15", "cut", "75"),
        ])
    }

    /// One `cut` at branch `A` for each hour 09:00-17:00 on one date, 20 each.
    pub fn single_day_hourly() -> Table {
        (9..=17)
            .map(|hour| {
                record(
                    "A",
                    &format!("2024-01-03 {hour:02}:00"),
                    "cut",
                    "20",
                )
            })
            .collect()
    }

    /// A week of mixed records across three branches and three services,
    /// with no activity on 2024-01-04.
    pub fn mixed_week() -> Table {
        Table::new(vec![
            record("Camden", "2024-01-01 09:05", "Haircut", "25.00"),
            record("Camden", "2024-01-01 14:40", "Colour", "80.50"),
            record("Islington", "2024-01-02 10:00", "Haircut", "25.00"),
            record("Islington", "2024-01-02 10:45", "Beard Trim", "15.00"),
            record("Hackney", "2024-01-03 16:20", "Colour", "95.00"),
            record("Camden", "2024-01-05 09:30", "Beard Trim", "12.25"),
            record("Hackney", "2024-01-06 11:00", "Haircut", "30.00"),
            record("Islington", "2024-01-07 13:10", "Colour", "72.75"),
        ])
    }
}

/// CSV fixtures in the default input layout.
pub mod csv_fixtures {
    /// Default header row.
    pub const HEADER: &str = "branch,datetime,service,revenue,appointments";

    /// A small valid input with two branches.
    pub fn valid_input() -> String {
        format!(
            "{HEADER}\n\
             A,2024-01-01 09:00:00,cut,100.00,1\n\
             A,2024-01-02 10:30:00,colour,50.00,2\n\
             B,2024-01-01 11:15:00,cut,75.00,1\n"
        )
    }

    /// Header only.
    pub fn header_only() -> String {
        format!("{HEADER}\n")
    }
}

/// Property-based testing strategies using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for valid records spread over two weeks.
    pub fn record_strategy() -> impl Strategy<Value = Record> {
        (
            prop::sample::select(vec!["Camden", "Hackney", "Islington", "Soho"]),
            prop::sample::select(vec!["Haircut", "Colour", "Beard Trim"]),
            0i64..14,
            0u32..24,
            0u32..60,
            0i64..50_000,
            1u32..4,
        )
            .prop_map(|(branch, service, day, hour, minute, cents, appts)| {
                let timestamp = date("2024-01-01")
                    .and_hms_opt(hour, minute, 0)
                    .expect("valid time")
                    + chrono::Duration::days(day);
                Record::new(branch, timestamp, service, Money::from_minor(cents), appts)
                    .expect("valid record")
            })
    }

    /// Strategy for tables of up to `max` records.
    pub fn table_strategy(max: usize) -> impl Strategy<Value = Table> {
        prop::collection::vec(record_strategy(), 0..max).prop_map(Table::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_init_logging_multiple_calls() {
        // Should not panic when called multiple times
        init_test_logging();
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_fixture_parsers() {
        assert_eq!(ts("2024-01-01 09:30").hour(), 9);
        assert_eq!(money("12.5"), Money::from_minor(1250));
        assert_eq!(date("2024-02-29").to_string(), "2024-02-29");
    }

    #[test]
    fn test_table_fixtures() {
        assert_eq!(table_fixtures::two_branches().len(), 3);
        assert_eq!(table_fixtures::single_day_hourly().len(), 9);
        assert_eq!(table_fixtures::mixed_week().len(), 8);
    }
}
