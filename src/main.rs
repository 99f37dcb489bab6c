use clap::Parser;
use guild_mmr::{
    batch::{run_batch, BatchInput},
    calculate_rating,
    formula::{formula_reference, test_formula, validate_formula},
    RatingConfig, RatingError, RatingInputs
};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode
};
use thiserror::Error;
use tracing::{error, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;

use args::{Args, Command};

#[derive(Debug, Error)]
enum AppError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error
    },

    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] guild_mmr::ConfigError),

    #[error(transparent)]
    Rating(#[from] RatingError)
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args.log_level);

    match run(args.command) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log_level: &str) {
    let indicatif_layer = IndicatifLayer::new();
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();
}

fn run(command: Command) -> Result<ExitCode, AppError> {
    match command {
        Command::Validate { formula } => {
            let result = validate_formula(&formula);
            print_json(&result)?;
            Ok(exit_code(result.valid))
        }
        Command::TestFormula { formula, inputs } => {
            let inputs = inputs.map(|path| read_json::<RatingInputs>(&path)).transpose()?;
            let preview = test_formula(&formula, inputs.as_ref());
            print_json(&preview)?;
            Ok(exit_code(preview.result.is_some()))
        }
        Command::Calculate { config, inputs } => {
            let config: RatingConfig = read_json(&config)?;
            let inputs: RatingInputs = read_json(&inputs)?;
            config.validate()?;

            let rating = calculate_rating(&config, &inputs)?;
            info!("Calculated {} rating: {}", config.algorithm, rating);
            print_json(&serde_json::json!({ "algorithm": config.algorithm, "rating": rating }))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Batch { input, output } => {
            let batch: BatchInput = read_json(&input)?;
            let report = run_batch(&batch);

            match output {
                Some(path) => {
                    let json = serde_json::to_string_pretty(&report)?;
                    fs::write(&path, json).map_err(|source| AppError::Io { path: path.clone(), source })?;
                    info!("Report {} written to {}", report.run_id, path.display());
                }
                None => print_json(&report)?
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Reference => {
            print_json(&formula_reference())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let contents = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source
    })?;

    serde_json::from_str(&contents).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
