//! Weather Pipeline - command line entry point
//!
//! Runs the whole pipeline once. With no flags it reads `weatherAUS.csv`
//! and writes its outputs into the working directory.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use weather_pipeline::charts::StaticChartRenderer;
use weather_pipeline::output::DirectorySink;
use weather_pipeline::{Pipeline, PipelineConfig, RunOutcome};

/// Exit status when the input file does not exist.
const EXIT_MISSING_INPUT: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = PipelineConfig::parse();

    match run(&config) {
        Ok(RunOutcome::Completed(_)) => ExitCode::SUCCESS,
        Ok(RunOutcome::MissingInput(path)) => {
            eprintln!(
                "Error: File '{}' not found. Please check the file name.",
                path.display()
            );
            ExitCode::from(EXIT_MISSING_INPUT)
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &PipelineConfig) -> Result<RunOutcome> {
    let renderer = StaticChartRenderer;
    let mut sink = DirectorySink::new(&config.output_dir);
    Pipeline::new(config, &renderer, &mut sink)
        .run()
        .with_context(|| format!("Weather pipeline failed for '{}'", config.input_path.display()))
}
