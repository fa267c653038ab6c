//! Runtime validation of a loaded configuration.

use crate::schema::{ColorsConfig, Config};
use opsdash_common::ConfigError;
use std::collections::HashSet;

/// Smallest accepted dashboard edge, in pixels.
pub const MIN_DIMENSION: u32 = 600;

/// Largest accepted dashboard edge, in pixels.
pub const MAX_DIMENSION: u32 = 10_000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, returning the first problem found.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_input(config)?;
        Self::validate_output(config)?;
        Self::validate_dashboard(config)?;

        let level = config.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("'{}' is not one of {}", config.logging.level, LOG_LEVELS.join(", ")),
            ));
        }

        Ok(())
    }

    fn validate_input(config: &Config) -> Result<(), ConfigError> {
        let input = &config.input;
        if input.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("input.path", "must not be empty"));
        }
        if !input.delimiter.is_ascii() || input.delimiter.is_ascii_alphanumeric() {
            return Err(ConfigError::invalid(
                "input.delimiter",
                format!("'{}' must be a single ASCII punctuation or whitespace character", input.delimiter),
            ));
        }

        let mut seen = HashSet::new();
        for name in input.columns.all() {
            let normalized = name.trim().to_ascii_lowercase();
            if normalized.is_empty() {
                return Err(ConfigError::invalid("input.columns", "column names must not be empty"));
            }
            if !seen.insert(normalized) {
                return Err(ConfigError::invalid(
                    "input.columns",
                    format!("column '{name}' is mapped more than once"),
                ));
            }
        }

        Ok(())
    }

    fn validate_output(config: &Config) -> Result<(), ConfigError> {
        let output = &config.output;
        if output.dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid("output.dir", "must not be empty"));
        }
        if let Some(file) = &output.dashboard_file {
            if file.is_empty() || file.contains(['/', '\\']) {
                return Err(ConfigError::invalid(
                    "output.dashboard_file",
                    "must be a plain file name",
                ));
            }
            if !file.to_ascii_lowercase().ends_with(".png") {
                return Err(ConfigError::invalid("output.dashboard_file", "must end in .png"));
            }
        }
        Ok(())
    }

    fn validate_dashboard(config: &Config) -> Result<(), ConfigError> {
        let dashboard = &config.dashboard;
        for (field, value) in [("dashboard.width", dashboard.width), ("dashboard.height", dashboard.height)] {
            if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                return Err(ConfigError::invalid(
                    field,
                    format!("{value} is outside {MIN_DIMENSION}..={MAX_DIMENSION}"),
                ));
            }
        }
        Self::validate_colors(&dashboard.styling.colors)
    }

    fn validate_colors(colors: &ColorsConfig) -> Result<(), ConfigError> {
        let named = [
            ("background", &colors.background),
            ("text", &colors.text),
            ("branch_bars", &colors.branch_bars),
            ("heatmap", &colors.heatmap),
            ("trend", &colors.trend),
            ("table_header", &colors.table_header),
        ];
        for (name, value) in named {
            check_color(&format!("dashboard.styling.colors.{name}"), value)?;
        }

        if colors.service_palette.is_empty() {
            return Err(ConfigError::invalid(
                "dashboard.styling.colors.service_palette",
                "needs at least one colour",
            ));
        }
        for (i, value) in colors.service_palette.iter().enumerate() {
            check_color(&format!("dashboard.styling.colors.service_palette[{i}]"), value)?;
        }
        Ok(())
    }
}

fn check_color(field: &str, value: &str) -> Result<(), ConfigError> {
    parse_hex_color(value)
        .map(|_| ())
        .ok_or_else(|| ConfigError::invalid(field, format!("'{value}' is not a #rrggbb colour")))
}

/// Parses a `#rrggbb` colour into its components.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#4a90d9"), Some((0x4a, 0x90, 0xd9)));
        assert_eq!(parse_hex_color(" #FFFFFF "), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("4a90d9"), None);
        assert_eq!(parse_hex_color("#4a90d"), None);
        assert_eq!(parse_hex_color("#zz90d9"), None);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let mut config = Config::default();
        config.input.columns.service = "Branch".to_string();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("input.columns"));
    }

    #[test]
    fn test_rejects_alphanumeric_delimiter() {
        let mut config = Config::default();
        config.input.delimiter = 'x';
        assert!(ConfigValidator::validate(&config).is_err());

        config.input.delimiter = ';';
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_tiny_dashboard() {
        let mut config = Config::default();
        config.dashboard.width = 100;
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("dashboard.width"));
    }

    #[test]
    fn test_rejects_bad_palette_entry() {
        let mut config = Config::default();
        config.dashboard.styling.colors.service_palette.push("teal".to_string());
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("service_palette[6]"));
    }

    #[test]
    fn test_rejects_bad_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(ConfigValidator::validate(&config).is_err());

        config.logging.level = "DEBUG".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_dashboard_file_with_directory() {
        let mut config = Config::default();
        config.output.dashboard_file = Some("../dash.png".to_string());
        assert!(ConfigValidator::validate(&config).is_err());

        config.output.dashboard_file = Some("dash.png".to_string());
        assert!(ConfigValidator::validate(&config).is_ok());
    }
}
