//! Configuration loading and persistence with atomic file operations.

use crate::defaults::DEFAULT_CONFIG_FILE;
use crate::schema::Config;
use opsdash_common::ConfigError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Serialization format of a configuration file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detects the format of `path` from its extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Configuration loader with atomic file operations.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this loader reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates the configuration file.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let format = ConfigFormat::from_path(&self.path)?;
        let raw = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        let config = self.parse(format, &raw)?;
        config.validate()?;
        info!(path = %self.path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Loads `path` when given, otherwise [`DEFAULT_CONFIG_FILE`] from the
    /// working directory when it exists, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::new(path).load(),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::new(fallback).load()
                } else {
                    debug!("No configuration file found, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }

    /// Saves configuration to file atomically.
    ///
    /// The file is written to a temporary sibling and renamed into place.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let format = ConfigFormat::from_path(&self.path)?;
        let rendered = match format {
            ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| self.parse_error(e))?,
            ConfigFormat::Yaml => serde_yaml::to_string(config).map_err(|e| self.parse_error(e))?,
            ConfigFormat::Json => {
                serde_json::to_string_pretty(config).map_err(|e| self.parse_error(e))?
            }
        };

        let io_error = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
        temp.write_all(rendered.as_bytes()).map_err(io_error)?;
        temp.persist(&self.path).map_err(|e| io_error(e.error))?;

        info!(path = %self.path.display(), "Saved configuration");
        Ok(())
    }

    fn parse(&self, format: ConfigFormat, raw: &str) -> Result<Config, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::from_str(raw).map_err(|e| self.parse_error(e)),
            ConfigFormat::Yaml => serde_yaml::from_str(raw).map_err(|e| self.parse_error(e)),
            ConfigFormat::Json => serde_json::from_str(raw).map_err(|e| self.parse_error(e)),
        }
    }

    fn parse_error(&self, err: impl std::fmt::Display) -> ConfigError {
        ConfigError::Parse {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}
