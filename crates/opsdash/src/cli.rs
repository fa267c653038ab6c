//! Command line arguments.

use clap::Parser;
use opsdash_config::Config;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path (.toml, .yaml, .yml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input CSV file, overrides `input.path`
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory, overrides `output.dir`
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log level, overrides `logging.level` and RUST_LOG
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Write the default configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    pub init_config: Option<PathBuf>,
}

impl Args {
    /// Applies command line overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input.path.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output.dir.clone_from(output);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_argument_is_required() {
        let args = Args::try_parse_from(["opsdash"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.input.is_none());
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let args = Args::try_parse_from([
            "opsdash",
            "--input",
            "week.csv",
            "-o",
            "out",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config.input.path, PathBuf::from("week.csv"));
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let mut config = Config::default();
        Args::default().apply(&mut config);
        assert_eq!(config, Config::default());
    }
}
