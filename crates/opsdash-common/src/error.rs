//! Error taxonomy shared by every stage of the pipeline.

use std::path::PathBuf;

/// Failure to parse a monetary amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The input was empty after trimming.
    #[error("amount is empty")]
    Empty,

    /// The input is not a plain decimal number.
    #[error("'{0}' is not a decimal amount")]
    Invalid(String),

    /// The amount does not fit into the minor-unit representation.
    #[error("amount '{0}' is out of range")]
    Overflow(String),
}

/// A record that violates the domain invariants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Branch identifier is blank.
    #[error("branch is empty")]
    EmptyBranch,

    /// Service type is blank.
    #[error("service type is empty")]
    EmptyService,

    /// Revenue below zero.
    #[error("revenue {0} is negative")]
    NegativeRevenue(String),

    /// Revenue above the per-record limit.
    #[error("revenue {0} exceeds the per-record limit")]
    RevenueTooLarge(String),
}

/// The input table could not be loaded. Always fatal for a run.
#[derive(thiserror::Error, Debug)]
pub enum DataLoadError {
    /// The input file does not exist.
    #[error("input file {} not found", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The input file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The input has no header row.
    #[error("input {source_name} is empty")]
    Empty {
        /// File path or a descriptive source name.
        source_name: String,
    },

    /// Required columns are absent from the header.
    #[error("input {source_name} is missing required columns: {}", missing.join(", "))]
    MissingColumns {
        /// File path or a descriptive source name.
        source_name: String,
        /// Every configured column name not present in the header.
        missing: Vec<String>,
    },

    /// The CSV layer rejected the input.
    #[error("malformed input {source_name}: {message}")]
    Csv {
        /// File path or a descriptive source name.
        source_name: String,
        /// Parser message.
        message: String,
    },

    /// A data row failed validation while strict loading is enabled.
    #[error("invalid row at line {line}: {reason}")]
    InvalidRow {
        /// 1-based line number in the input.
        line: u64,
        /// Human-readable reason.
        reason: String,
    },
}

/// A dashboard panel or the dashboard image could not be drawn.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The view backing a panel has no categories.
    #[error("panel '{panel}' has no data")]
    EmptyView {
        /// Panel name.
        panel: &'static str,
    },

    /// The drawing backend failed while drawing a panel.
    #[error("panel '{panel}' failed to draw: {message}")]
    Draw {
        /// Panel name.
        panel: &'static str,
        /// Backend error text.
        message: String,
    },

    /// The image file itself could not be produced.
    #[error("failed to write dashboard image {}: {message}", path.display())]
    Output {
        /// Target image path.
        path: PathBuf,
        /// Backend error text.
        message: String,
    },
}

/// A single export file could not be written.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Writing a file failed.
    #[error("failed to write {}: {message}", path.display())]
    Write {
        /// File path.
        path: PathBuf,
        /// Underlying failure text.
        message: String,
    },

    /// Reading an exported file back failed.
    #[error("failed to read {}: {message}", path.display())]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying failure text.
        message: String,
    },
}

/// Configuration could not be loaded or is invalid.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed.
    #[error("failed to parse config {}: {message}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The file extension does not map to a known format.
    #[error("unsupported config format for {}", path.display())]
    UnsupportedFormat {
        /// Config file path.
        path: PathBuf,
    },

    /// A value failed validation.
    #[error("invalid config value for '{field}': {message}")]
    Invalid {
        /// Dotted field path.
        field: String,
        /// What is wrong.
        message: String,
    },
}

impl ConfigError {
    /// Shorthand for an [`ConfigError::Invalid`] error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}
