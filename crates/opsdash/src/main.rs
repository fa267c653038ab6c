//! Main entry point for Opsdash.

use clap::Parser;
use opsdash::{
    init_logging, load_failure_message, AppError, Args, ConsoleReport, Pipeline, EXIT_LOAD_FAILURE,
    EXIT_OUTPUT_FAILURE, EXIT_SUCCESS,
};
use opsdash_config::{Config, ConfigLoader};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(path) = &args.init_config {
        return match ConfigLoader::new(path).save(&Config::default()) {
            Ok(()) => {
                println!("Default configuration written to {}", path.display());
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(err) => {
                eprintln!("{err}");
                ExitCode::from(EXIT_LOAD_FAILURE)
            }
        };
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    // Held until exit so the file writer flushes
    let _guard = match init_logging(&config.logging, args.log_level.is_some()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    info!("Starting Opsdash");
    let currency_symbol = config.dashboard.currency_symbol.clone();
    let pipeline = Pipeline::new(config);

    let summary = pipeline
        .run(|views| print!("{}", ConsoleReport::new(views, &currency_symbol)))
        .await;

    match summary {
        Ok(summary) => {
            println!();
            println!("{}", summary.message());
            if summary.is_success() {
                ExitCode::from(EXIT_SUCCESS)
            } else {
                ExitCode::from(EXIT_OUTPUT_FAILURE)
            }
        }
        Err(AppError::Load(err)) => {
            error!("Load failed: {}", err);
            eprintln!("{}", load_failure_message(&err));
            ExitCode::from(EXIT_LOAD_FAILURE)
        }
        Err(err) => {
            error!("Run failed: {}", err);
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn load_config(args: &Args) -> Result<Config, AppError> {
    let mut config = ConfigLoader::load_or_default(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;
    Ok(config)
}
