//! Integration tests for opsdash-data crate.
//!
//! These tests run the loader against real files, check the aggregation laws
//! over generated tables, and re-read every export.

use opsdash_common::test_utils::csv_fixtures::{header_only, valid_input, HEADER};
use opsdash_common::test_utils::property_testing::table_strategy;
use opsdash_common::test_utils::{create_temp_dir, init_test_logging, money, table_fixtures, write_file};
use opsdash_common::{DataLoadError, ExportError, Money, Table};
use opsdash_config::{InputConfig, OutputConfig};
use opsdash_data::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn default_loader() -> DataLoader {
    DataLoader::new(&InputConfig::default())
}

fn exporter_for(dir: &std::path::Path) -> CsvExporter {
    CsvExporter::new(&OutputConfig {
        dir: dir.to_path_buf(),
        ..OutputConfig::default()
    })
}

mod loading {
    use super::*;

    #[test]
    fn test_load_valid_file() {
        init_test_logging();
        let dir = create_temp_dir();
        let path = write_file(dir.path(), "sample.csv", &valid_input());

        let loaded = default_loader().load(&path).unwrap();
        assert_eq!(loaded.table.len(), 3);
        assert!(loaded.skipped.is_empty());
        assert_eq!(loaded.table.records()[1].appointments(), 2);

        let views = AggregateViews::compute(&loaded.table);
        assert_eq!(views.branches.revenue_of("A"), Some(money("150")));
    }

    #[test]
    fn test_missing_file() {
        let dir = create_temp_dir();
        let err = default_loader().load(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::NotFound { .. }));
    }

    #[test]
    fn test_empty_file() {
        let dir = create_temp_dir();
        let path = write_file(dir.path(), "empty.csv", "");
        let err = default_loader().load(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::Empty { .. }));
    }

    #[test]
    fn test_header_only_is_an_empty_table() {
        let dir = create_temp_dir();
        let path = write_file(dir.path(), "header.csv", &header_only());
        let loaded = default_loader().load(&path).unwrap();
        assert!(loaded.table.is_empty());
    }

    #[test]
    fn test_missing_columns_are_all_listed() {
        let dir = create_temp_dir();
        let path = write_file(dir.path(), "partial.csv", "branch,when,service\nA,2024-01-01,cut\n");
        match default_loader().load(&path).unwrap_err() {
            DataLoadError::MissingColumns { missing, .. } => {
                assert_eq!(missing, vec!["datetime".to_string(), "revenue".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_mode_fails_on_first_bad_row() {
        let loader = DataLoader::new(&InputConfig {
            strict: true,
            ..InputConfig::default()
        });
        let input = format!("{HEADER}\nA,2024-01-01 09:00,cut,10,1\nA,2024-01-01 10:00,cut,oops,1\n");
        let err = loader.load_from_reader(input.as_bytes(), "inline").unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidRow { line: 3, .. }));
    }

    #[test]
    fn test_separate_date_and_hour_columns() {
        let mut config = InputConfig::default();
        config.columns.timestamp = "date".to_string();
        config.columns.service = "service_type".to_string();
        config.delimiter = ';';

        let input = "date;branch;hour;service_type;appointments;revenue\n\
                     2024-01-01;Camden;9;Haircut;4;100\n\
                     2024-01-01;Camden;14;Colour;2;160\n";
        let loaded = DataLoader::new(&config)
            .load_from_reader(input.as_bytes(), "inline")
            .unwrap();

        let views = AggregateViews::compute(&loaded.table);
        assert_eq!(views.kpis.total_appointments, 6);
        assert_eq!(views.kpis.busiest_hour, Some(14));
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn test_hourly_single_day_scenario() {
        let views = AggregateViews::compute(&table_fixtures::single_day_hourly());
        assert_eq!(views.daily.points()[0].revenue, money("180"));
        assert_eq!(views.services.rows()[0].revenue, money("180"));
        assert_eq!(views.kpis.busiest_hour, Some(9));
        assert_eq!(views.kpis.busiest_branch.as_deref(), Some("A"));
    }

    #[test]
    fn test_free_appointments_still_have_a_peak_hour() {
        let input = format!(
            "{HEADER}\n\
             Camden,2024-01-01 10:00,Consultation,0,1\n\
             Camden,2024-01-01 14:00,Consultation,0,3\n"
        );
        let loaded = default_loader().load_from_reader(input.as_bytes(), "inline").unwrap();
        let views = AggregateViews::compute(&loaded.table);

        assert_eq!(views.kpis.total_revenue, Money::ZERO);
        assert_eq!(views.kpis.busiest_hour, Some(14));
        assert!(!views.heatmap.is_empty());
    }

    #[test]
    fn test_empty_table_boundary() {
        let views = AggregateViews::compute(&Table::default());
        assert_eq!(views.kpis.total_revenue, Money::ZERO);
        assert_eq!(views.kpis.average_ticket, Money::ZERO);
        assert!(views.branches.is_empty());
        assert!(views.services.is_empty());
        assert!(views.daily.is_empty());
        assert!(views.heatmap.is_empty());
    }
}

mod exports {
    use super::*;

    #[test]
    fn test_every_export_round_trips() {
        let dir = create_temp_dir();
        let views = AggregateViews::compute(&table_fixtures::mixed_week());
        let report = exporter_for(dir.path()).export_all(&views);
        assert!(report.is_success());
        assert_eq!(report.written.len(), 5);

        let d = dir.path();
        assert_eq!(read_branch_totals(&d.join(BRANCH_FILE)).unwrap(), views.branches);
        assert_eq!(read_service_totals(&d.join(SERVICE_FILE)).unwrap(), views.services);
        assert_eq!(read_daily_trend(&d.join(DAILY_FILE)).unwrap(), views.daily);
        assert_eq!(read_heatmap(&d.join(HEATMAP_FILE)).unwrap(), views.heatmap);
        assert_eq!(read_kpis(&d.join(KPI_FILE)).unwrap(), views.kpis);
    }

    #[test]
    fn test_daily_trend_with_repeated_dates_is_merged() {
        let dir = create_temp_dir();
        let path = write_file(
            dir.path(),
            DAILY_FILE,
            "date,revenue,appointments\n2024-01-02,10.00,1\n2024-01-01,4.00,1\n2024-01-02,2.50,2\n",
        );

        let trend = read_daily_trend(&path).unwrap();
        assert_eq!(trend.len(), 2);
        assert_eq!(trend.points()[1].revenue, money("12.50"));
        assert_eq!(trend.points()[1].appointments, 3);
        let total: Money = trend.zero_filled().points().iter().map(|p| p.revenue).sum();
        assert_eq!(total, money("16.50"));
    }

    #[test]
    fn test_output_directory_is_created() {
        let dir = create_temp_dir();
        let nested = dir.path().join("reports").join("weekly");
        let report = exporter_for(&nested).export_all(&AggregateViews::compute(&Table::default()));
        assert!(report.is_success());
        assert!(nested.join(BRANCH_FILE).is_file());
    }

    #[test]
    fn test_unwritable_directory_is_reported() {
        let dir = create_temp_dir();
        let blocker = write_file(dir.path(), "not_a_dir", "x");
        let report = exporter_for(&blocker).export_all(&AggregateViews::compute(&Table::default()));
        assert!(!report.is_success());
        assert!(matches!(report.failures[0], ExportError::CreateDir { .. }));
        assert!(report.written.is_empty());
    }

    #[test]
    fn test_one_failed_file_does_not_stop_the_others() {
        let dir = create_temp_dir();
        // A directory squatting on the branch file name makes that write fail
        std::fs::create_dir(dir.path().join(BRANCH_FILE)).unwrap();

        let report = exporter_for(dir.path())
            .export_all(&AggregateViews::compute(&table_fixtures::two_branches()));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.written.len(), 4);
        assert!(dir.path().join(SERVICE_FILE).is_file());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_property_branch_revenue_is_conserved(table in table_strategy(60)) {
        let views = AggregateViews::compute(&table);
        prop_assert_eq!(views.branches.total_revenue(), views.kpis.total_revenue);
        prop_assert_eq!(views.services.total_revenue(), views.kpis.total_revenue);
        let daily: Money = views.daily.points().iter().map(|p| p.revenue).sum();
        prop_assert_eq!(daily, views.kpis.total_revenue);
    }

    #[test]
    fn test_property_daily_trend_covers_distinct_dates(table in table_strategy(60)) {
        let distinct: BTreeSet<_> = table.iter().map(|r| r.date()).collect();
        let views = AggregateViews::compute(&table);
        prop_assert_eq!(views.daily.len(), distinct.len());
        prop_assert!(views.daily.points().windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_property_aggregation_is_idempotent(table in table_strategy(60)) {
        prop_assert_eq!(AggregateViews::compute(&table), AggregateViews::compute(&table));
    }

    #[test]
    fn test_property_branch_order(table in table_strategy(60)) {
        let views = AggregateViews::compute(&table);
        for pair in views.branches.rows().windows(2) {
            prop_assert!(
                pair[0].revenue > pair[1].revenue
                    || (pair[0].revenue == pair[1].revenue && pair[0].name < pair[1].name)
            );
        }
    }
}
