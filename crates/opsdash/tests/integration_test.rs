//! Integration tests for opsdash crate.
//!
//! These tests run the whole pipeline against temporary directories and
//! drive the compiled binary to check exit codes.

use opsdash::{AppError, Args, Pipeline, EXIT_LOAD_FAILURE, EXIT_OUTPUT_FAILURE};
use opsdash_common::test_utils::csv_fixtures::{header_only, valid_input};
use opsdash_common::test_utils::{create_temp_dir, init_test_logging, write_file};
use opsdash_common::DataLoadError;
use opsdash_config::{Config, ConfigLoader};
use opsdash_data::{read_branch_totals, BRANCH_FILE, DAILY_FILE, HEATMAP_FILE, KPI_FILE, SERVICE_FILE};
use std::path::Path;
use std::process::Command;

fn config_for(input: &Path, output: &Path) -> Config {
    let mut config = Config::default();
    config.input.path = input.to_path_buf();
    config.output.dir = output.to_path_buf();
    config.dashboard.width = 900;
    config.dashboard.height = 600;
    config
}

#[tokio::test]
async fn test_full_run_writes_dashboard_and_exports() {
    init_test_logging();
    let dir = create_temp_dir();
    let input = write_file(dir.path(), "input.csv", &valid_input());
    let output = dir.path().join("reports");

    let mut seen = 0;
    let summary = Pipeline::new(config_for(&input, &output))
        .run(|views| seen = views.branches.len())
        .await
        .unwrap();

    assert_eq!(seen, 2);
    assert_eq!(summary.records, 3);
    assert_eq!(summary.skipped, 0);
    assert!(summary.is_success(), "{}", summary.message());

    let report = summary.render.as_ref().unwrap();
    assert!(report.path.starts_with(&output));
    assert!(report.path.is_file());

    for name in [BRANCH_FILE, SERVICE_FILE, DAILY_FILE, HEATMAP_FILE, KPI_FILE] {
        assert!(output.join(name).is_file(), "{name} missing");
    }
    let branches = read_branch_totals(&output.join(BRANCH_FILE)).unwrap();
    assert_eq!(branches.rows()[0].name, "A");
}

#[tokio::test]
async fn test_missing_input_is_a_load_failure() {
    let dir = create_temp_dir();
    let config = config_for(&dir.path().join("absent.csv"), &dir.path().join("reports"));

    let err = Pipeline::new(config).run(|_| {}).await.unwrap_err();
    assert!(matches!(err, AppError::Load(DataLoadError::NotFound { .. })));
    assert_eq!(err.exit_code(), EXIT_LOAD_FAILURE);
    assert!(!dir.path().join("reports").exists());
}

#[tokio::test]
async fn test_blocked_output_directory_is_an_output_failure() {
    let dir = create_temp_dir();
    let input = write_file(dir.path(), "input.csv", &valid_input());
    let blocker = write_file(dir.path(), "reports", "not a directory");

    let err = Pipeline::new(config_for(&input, &blocker)).run(|_| {}).await.unwrap_err();
    assert!(matches!(err, AppError::Export(_)));
    assert_eq!(err.exit_code(), EXIT_OUTPUT_FAILURE);
}

#[tokio::test]
async fn test_header_only_input_still_produces_outputs() {
    let dir = create_temp_dir();
    let input = write_file(dir.path(), "input.csv", &header_only());
    let output = dir.path().join("reports");

    let summary = Pipeline::new(config_for(&input, &output)).run(|_| {}).await.unwrap();
    assert_eq!(summary.records, 0);
    assert!(summary.render.is_ok());
    assert!(summary.exports.is_success());
    assert!(output.join(KPI_FILE).is_file());
}

#[test]
fn test_config_file_with_cli_overrides() {
    let dir = create_temp_dir();
    let config_path = dir.path().join("opsdash.yaml");
    let mut saved = Config::default();
    saved.dashboard.title = "Weekly Ops".to_string();
    ConfigLoader::new(&config_path).save(&saved).unwrap();

    let args = Args {
        config: Some(config_path.clone()),
        input: Some(dir.path().join("week.csv")),
        ..Args::default()
    };
    let mut config = ConfigLoader::load_or_default(args.config.as_deref()).unwrap();
    args.apply(&mut config);

    assert_eq!(config.dashboard.title, "Weekly Ops");
    assert_eq!(config.input.path, dir.path().join("week.csv"));
    assert_eq!(config.output, saved.output);
}

mod binary {
    use super::*;

    fn opsdash() -> Command {
        Command::new(env!("CARGO_BIN_EXE_opsdash"))
    }

    #[test]
    fn test_exit_code_for_missing_input() {
        let dir = create_temp_dir();
        let status = opsdash()
            .current_dir(dir.path())
            .args(["--input", "absent.csv", "--output", "reports"])
            .status()
            .unwrap();
        assert_eq!(status.code(), Some(i32::from(EXIT_LOAD_FAILURE)));
    }

    #[test]
    fn test_exit_code_for_invalid_config() {
        let dir = create_temp_dir();
        let config = write_file(dir.path(), "bad.toml", "[dashboard]\nwidth = 10\n");
        let status = opsdash()
            .current_dir(dir.path())
            .arg("--config")
            .arg(&config)
            .status()
            .unwrap();
        assert_eq!(status.code(), Some(i32::from(EXIT_LOAD_FAILURE)));
    }

    #[test]
    fn test_successful_run_prints_summaries() {
        let dir = create_temp_dir();
        write_file(dir.path(), "input.csv", &valid_input());
        write_file(
            dir.path(),
            "opsdash.toml",
            "[dashboard]\nwidth = 900\nheight = 600\n\n[logging]\nlevel = \"warn\"\n",
        );

        let output = opsdash()
            .current_dir(dir.path())
            .args(["--input", "input.csv", "--output", "reports"])
            .output()
            .unwrap();
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert_eq!(output.status.code(), Some(0), "{stdout}");
        assert!(stdout.contains("Branch Summary"));
        assert!(stdout.contains("Service Breakdown"));
        assert!(stdout.contains("All outputs written"));
        assert!(dir.path().join("reports").join(BRANCH_FILE).is_file());
    }

    #[test]
    fn test_init_config_writes_defaults() {
        let dir = create_temp_dir();
        let path = dir.path().join("opsdash.toml");
        let status = opsdash().arg("--init-config").arg(&path).status().unwrap();
        assert!(status.success());
        assert_eq!(ConfigLoader::new(&path).load().unwrap(), Config::default());
    }
}
