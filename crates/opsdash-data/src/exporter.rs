//! Delimited exports of the aggregate views, and readers for them.
//!
//! | File | Header |
//! |------|--------|
//! | `branch_summary.csv` | `branch,revenue,appointments,records` |
//! | `service_breakdown.csv` | `service,revenue,appointments,records` |
//! | `daily_trend.csv` | `date,revenue,appointments` |
//! | `peak_hours.csv` | `day,hour,revenue,appointments,records` |
//! | `kpi_summary.json` | [`KpiSummary`] as JSON |
//!
//! Amounts are written with exactly two decimals.

use crate::branch_totals::BranchTotals;
use crate::daily_trend::{DailyPoint, DailyTrend};
use crate::heatmap::{HeatCell, HourHeatmap};
use crate::kpi::KpiSummary;
use crate::service_totals::ServiceTotals;
use crate::views::{AggregateViews, CategoryTotal};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use opsdash_common::{parse_weekday_label, weekday_label, ExportError, Money};
use opsdash_config::OutputConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Branch totals file name.
pub const BRANCH_FILE: &str = "branch_summary.csv";
/// Service totals file name.
pub const SERVICE_FILE: &str = "service_breakdown.csv";
/// Daily trend file name.
pub const DAILY_FILE: &str = "daily_trend.csv";
/// Peak-hour matrix file name.
pub const HEATMAP_FILE: &str = "peak_hours.csv";
/// KPI summary file name.
pub const KPI_FILE: &str = "kpi_summary.json";

const BRANCH_HEADER: [&str; 4] = ["branch", "revenue", "appointments", "records"];
const SERVICE_HEADER: [&str; 4] = ["service", "revenue", "appointments", "records"];
const DAILY_HEADER: [&str; 3] = ["date", "revenue", "appointments"];
const HEATMAP_HEADER: [&str; 5] = ["day", "hour", "revenue", "appointments", "records"];

#[derive(Debug, Serialize, Deserialize)]
struct BranchRow {
    branch: String,
    revenue: Money,
    appointments: u64,
    records: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ServiceRow {
    service: String,
    revenue: Money,
    appointments: u64,
    records: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct DailyRow {
    date: NaiveDate,
    revenue: Money,
    appointments: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct HeatmapRow {
    day: String,
    hour: u8,
    revenue: Money,
    appointments: u64,
    records: u64,
}

/// Outcome of exporting every view. Each file is attempted independently.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written successfully.
    pub written: Vec<PathBuf>,
    /// Files that failed.
    pub failures: Vec<ExportError>,
}

impl ExportReport {
    /// Whether every attempted file was written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, result: Result<PathBuf, ExportError>) {
        match result {
            Ok(path) => self.written.push(path),
            Err(err) => {
                warn!(error = %err, "Export failed");
                self.failures.push(err);
            }
        }
    }
}

/// Writes aggregate views into an output directory.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    dir: PathBuf,
    export_heatmap: bool,
    export_kpis: bool,
}

impl CsvExporter {
    /// Creates an exporter for the configured output directory.
    #[must_use]
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            export_heatmap: config.export_heatmap,
            export_kpis: config.export_kpis,
        }
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the output directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| ExportError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    /// Writes every enabled export. Never stops at the first failure.
    pub fn export_all(&self, views: &AggregateViews) -> ExportReport {
        let mut report = ExportReport::default();
        if let Err(err) = self.ensure_dir() {
            report.record(Err(err));
            return report;
        }

        report.record(self.write_branch_totals(&views.branches));
        report.record(self.write_service_totals(&views.services));
        report.record(self.write_daily_trend(&views.daily));
        if self.export_heatmap {
            report.record(self.write_heatmap(&views.heatmap));
        }
        if self.export_kpis {
            report.record(self.write_kpis(&views.kpis));
        }

        info!(
            written = report.written.len(),
            failed = report.failures.len(),
            dir = %self.dir.display(),
            "Exported reports"
        );
        report
    }

    /// Writes `branch_summary.csv`.
    pub fn write_branch_totals(&self, totals: &BranchTotals) -> Result<PathBuf, ExportError> {
        let rows = totals.rows().iter().map(|row| BranchRow {
            branch: row.name.clone(),
            revenue: row.revenue,
            appointments: row.appointments,
            records: row.records,
        });
        write_csv(&self.dir.join(BRANCH_FILE), &BRANCH_HEADER, rows)
    }

    /// Writes `service_breakdown.csv`.
    pub fn write_service_totals(&self, totals: &ServiceTotals) -> Result<PathBuf, ExportError> {
        let rows = totals.rows().iter().map(|row| ServiceRow {
            service: row.name.clone(),
            revenue: row.revenue,
            appointments: row.appointments,
            records: row.records,
        });
        write_csv(&self.dir.join(SERVICE_FILE), &SERVICE_HEADER, rows)
    }

    /// Writes `daily_trend.csv`. Dates without records are not written.
    pub fn write_daily_trend(&self, trend: &DailyTrend) -> Result<PathBuf, ExportError> {
        let rows = trend.points().iter().map(|point| DailyRow {
            date: point.date,
            revenue: point.revenue,
            appointments: point.appointments,
        });
        write_csv(&self.dir.join(DAILY_FILE), &DAILY_HEADER, rows)
    }

    /// Writes `peak_hours.csv` with all 168 cells.
    pub fn write_heatmap(&self, heatmap: &HourHeatmap) -> Result<PathBuf, ExportError> {
        let rows = heatmap.iter().map(|(day, hour, cell)| HeatmapRow {
            day: weekday_label(day).to_string(),
            hour,
            revenue: cell.revenue,
            appointments: cell.appointments,
            records: cell.records,
        });
        write_csv(&self.dir.join(HEATMAP_FILE), &HEATMAP_HEADER, rows)
    }

    /// Writes `kpi_summary.json`.
    pub fn write_kpis(&self, kpis: &KpiSummary) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(KPI_FILE);
        let json = serde_json::to_string_pretty(kpis).map_err(|e| write_error(&path, e))?;
        std::fs::write(&path, json).map_err(|e| write_error(&path, e))?;
        Ok(path)
    }
}

fn write_error(path: &Path, err: impl std::fmt::Display) -> ExportError {
    ExportError::Write {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn read_error(path: &Path, err: impl std::fmt::Display) -> ExportError {
    ExportError::Read {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Header is written explicitly so that empty views still carry it.
fn write_csv<T: Serialize>(
    path: &Path,
    header: &[&str],
    rows: impl IntoIterator<Item = T>,
) -> Result<PathBuf, ExportError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| write_error(path, e))?;
    writer.write_record(header).map_err(|e| write_error(path, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| write_error(path, e))?;
    }
    writer.flush().map_err(|e| write_error(path, e))?;
    Ok(path.to_path_buf())
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ExportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| read_error(path, e))?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| read_error(path, e))
}

/// Reads a `branch_summary.csv` back into [`BranchTotals`].
pub fn read_branch_totals(path: &Path) -> Result<BranchTotals, ExportError> {
    let rows: Vec<BranchRow> = read_csv(path)?;
    Ok(BranchTotals::from_rows(
        rows.into_iter()
            .map(|row| CategoryTotal {
                name: row.branch,
                revenue: row.revenue,
                appointments: row.appointments,
                records: row.records,
            })
            .collect(),
    ))
}

/// Reads a `service_breakdown.csv` back into [`ServiceTotals`].
pub fn read_service_totals(path: &Path) -> Result<ServiceTotals, ExportError> {
    let rows: Vec<ServiceRow> = read_csv(path)?;
    Ok(ServiceTotals::from_rows(
        rows.into_iter()
            .map(|row| CategoryTotal {
                name: row.service,
                revenue: row.revenue,
                appointments: row.appointments,
                records: row.records,
            })
            .collect(),
    ))
}

/// Reads a `daily_trend.csv` back into [`DailyTrend`].
pub fn read_daily_trend(path: &Path) -> Result<DailyTrend, ExportError> {
    let rows: Vec<DailyRow> = read_csv(path)?;
    Ok(DailyTrend::from_points(
        rows.into_iter()
            .map(|row| DailyPoint {
                date: row.date,
                revenue: row.revenue,
                appointments: row.appointments,
            })
            .collect(),
    ))
}

/// Reads a `peak_hours.csv` back into [`HourHeatmap`].
pub fn read_heatmap(path: &Path) -> Result<HourHeatmap, ExportError> {
    let rows: Vec<HeatmapRow> = read_csv(path)?;
    let mut cells = Vec::with_capacity(rows.len());
    for row in rows {
        let day = parse_weekday_label(&row.day)
            .ok_or_else(|| read_error(path, format!("unknown day '{}'", row.day)))?;
        cells.push((
            day,
            row.hour,
            HeatCell {
                revenue: row.revenue,
                appointments: row.appointments,
                records: row.records,
            },
        ));
    }
    Ok(HourHeatmap::from_cells(cells))
}

/// Reads a `kpi_summary.json` back into [`KpiSummary`].
pub fn read_kpis(path: &Path) -> Result<KpiSummary, ExportError> {
    let raw = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    serde_json::from_str(&raw).map_err(|e| read_error(path, e))
}
