//! Application-wide error types using thiserror.

use opsdash_common::{ConfigError, DataLoadError, ExportError, RenderError};

/// Exit status for a clean run.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status when configuration or input data could not be loaded.
pub const EXIT_LOAD_FAILURE: u8 = 1;

/// Exit status when the dashboard or an export could not be written.
pub const EXIT_OUTPUT_FAILURE: u8 = 2;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input data could not be loaded.
    #[error("Data error: {0}")]
    Load(#[from] DataLoadError),

    /// Dashboard image could not be produced.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Output directory or export file problem.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Logging could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),

    /// A background task panicked or was cancelled.
    #[error("Task error: {0}")]
    Task(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Load(_) | Self::Logging(_) | Self::Io(_) => EXIT_LOAD_FAILURE,
            Self::Render(_) | Self::Export(_) | Self::Task(_) => EXIT_OUTPUT_FAILURE,
        }
    }
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
