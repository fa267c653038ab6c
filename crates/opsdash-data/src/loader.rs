//! Delimited input loading into an immutable [`Table`].

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use opsdash_common::{DataLoadError, Money, Record, Table};
use opsdash_config::{ColumnsConfig, InputConfig};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Timestamp layouts accepted in the timestamp column, tried in order.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Layout of a bare date, accepted only together with an hour column.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A data row that was dropped during a lenient load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the input.
    pub line: u64,
    /// Why the row was rejected.
    pub reason: String,
}

/// Result of a successful load.
#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    /// Valid records in input order.
    pub table: Table,
    /// Rows that were skipped, in input order. Always empty in strict mode.
    pub skipped: Vec<SkippedRow>,
}

/// Positions of the configured columns within the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    branch: usize,
    timestamp: usize,
    service: usize,
    revenue: usize,
    appointments: Option<usize>,
    hour: Option<usize>,
}

impl ColumnIndex {
    fn resolve(
        columns: &ColumnsConfig,
        headers: &StringRecord,
        source_name: &str,
    ) -> Result<Self, DataLoadError> {
        let position = |name: &str| {
            headers.iter().position(|header| {
                header
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .eq_ignore_ascii_case(name.trim())
            })
        };

        let missing: Vec<String> = columns
            .required()
            .into_iter()
            .filter(|name| position(*name).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns {
                source_name: source_name.to_string(),
                missing,
            });
        }

        let required = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            branch: required(columns.branch.as_str()),
            timestamp: required(columns.timestamp.as_str()),
            service: required(columns.service.as_str()),
            revenue: required(columns.revenue.as_str()),
            appointments: position(columns.appointments.as_str()),
            hour: position(columns.hour.as_str()),
        })
    }
}

/// Loads appointment records from delimited files.
#[derive(Debug, Clone)]
pub struct DataLoader {
    columns: ColumnsConfig,
    delimiter: u8,
    strict: bool,
}

impl DataLoader {
    /// Creates a loader for the configured column layout.
    ///
    /// The delimiter must be ASCII, which the config validator guarantees; a
    /// non-ASCII value falls back to `,`.
    #[must_use]
    pub fn new(config: &InputConfig) -> Self {
        Self {
            columns: config.columns.clone(),
            delimiter: u8::try_from(config.delimiter).unwrap_or(b','),
            strict: config.strict,
        }
    }

    /// Loads the table stored at `path`.
    pub fn load(&self, path: &Path) -> Result<LoadedTable, DataLoadError> {
        if !path.exists() {
            return Err(DataLoadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_from_reader(file, &path.display().to_string())
    }

    /// Loads a table from any reader. `source_name` is used in messages.
    pub fn load_from_reader<R: Read>(
        &self,
        reader: R,
        source_name: &str,
    ) -> Result<LoadedTable, DataLoadError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let csv_error = |e: csv::Error| DataLoadError::Csv {
            source_name: source_name.to_string(),
            message: e.to_string(),
        };

        let headers = reader.headers().map_err(csv_error)?.clone();
        if headers.is_empty() || headers.iter().all(str::is_empty) {
            return Err(DataLoadError::Empty {
                source_name: source_name.to_string(),
            });
        }
        let index = ColumnIndex::resolve(&self.columns, &headers, source_name)?;
        debug!(?index, source = source_name, "Resolved input columns");

        let mut records = Vec::new();
        let mut skipped = Vec::new();
        let mut row = StringRecord::new();
        let mut data_line = 1u64;

        loop {
            data_line += 1;
            let outcome = match reader.read_record(&mut row) {
                Ok(false) => break,
                Ok(true) => {
                    if row.iter().all(str::is_empty) {
                        continue;
                    }
                    let line = row.position().map_or(data_line, csv::Position::line);
                    parse_row(&index, &row).map_err(|reason| SkippedRow { line, reason })
                }
                Err(e) if e.is_io_error() => return Err(csv_error(e)),
                Err(e) => Err(SkippedRow {
                    line: e.position().map_or(data_line, csv::Position::line),
                    reason: e.to_string(),
                }),
            };

            match outcome {
                Ok(record) => records.push(record),
                Err(bad) if self.strict => {
                    return Err(DataLoadError::InvalidRow {
                        line: bad.line,
                        reason: bad.reason,
                    });
                }
                Err(bad) => {
                    warn!(line = bad.line, reason = %bad.reason, "Skipping invalid row");
                    skipped.push(bad);
                }
            }
        }

        info!(
            records = records.len(),
            skipped = skipped.len(),
            source = source_name,
            "Loaded records"
        );
        Ok(LoadedTable {
            table: Table::new(records),
            skipped,
        })
    }
}

fn parse_row(index: &ColumnIndex, row: &StringRecord) -> Result<Record, String> {
    let field = |i: usize, name: &str| row.get(i).ok_or_else(|| format!("missing {name} field"));
    let optional = |i: Option<usize>| i.and_then(|i| row.get(i)).filter(|v| !v.is_empty());

    let branch = field(index.branch, "branch")?;
    let service = field(index.service, "service")?;
    let timestamp = parse_timestamp(field(index.timestamp, "timestamp")?, optional(index.hour))?;
    let revenue: Money = field(index.revenue, "revenue")?
        .parse()
        .map_err(|e| format!("revenue: {e}"))?;
    let appointments = match optional(index.appointments) {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| format!("appointments: '{raw}' is not a whole number"))?,
        None => 1,
    };

    Record::new(branch, timestamp, service, revenue, appointments).map_err(|e| e.to_string())
}

/// Parses the timestamp column, combining a bare date with an hour column.
pub fn parse_timestamp(raw: &str, hour: Option<&str>) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    if let Some(parsed) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Ok(parsed);
    }

    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| format!("timestamp: '{raw}' is not a recognised date/time"))?;
    let hour = hour.ok_or_else(|| format!("timestamp: '{raw}' has no time of day"))?;
    let hour_text = hour.split(':').next().unwrap_or(hour).trim();
    hour_text
        .parse::<u32>()
        .ok()
        .and_then(|h| date.and_hms_opt(h, 0, 0))
        .ok_or_else(|| format!("hour: '{hour}' is not an hour of the day"))
}
