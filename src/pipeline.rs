//! Weather Pipeline
//! Load → clean → {statistics, charts, monthly rainfall} → export, in sequence.

use crate::charts::{Chart, ChartPlotter, ChartRenderer, RenderError};
use crate::config::PipelineConfig;
use crate::data::{
    to_csv_bytes, CleanError, DataCleaner, DataLoader, ExportError, LoaderError, WeatherTable,
};
use crate::output::{ArtifactSink, SinkError};
use crate::stats::{MonthlyRainfall, StatsCalculator, WeatherSummary};
use polars::prelude::PolarsError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// Rows of the cleaned table echoed after cleaning.
const HEAD_ROWS: usize = 5;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Clean(#[from] CleanError),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Failed to render '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: RenderError,
    },
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error("Failed to encode run report: {0}")]
    Report(#[from] serde_json::Error),
}

/// What a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub location: String,
    pub summary: WeatherSummary,
    pub monthly_rainfall: MonthlyRainfall,
    /// Artifact names in the order they were persisted.
    pub artifacts: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The input file does not exist; no stage after loading ran.
    MissingInput(PathBuf),
    Completed(RunReport),
}

/// One pipeline run over a config, a chart renderer and an artifact sink.
pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    renderer: &'a dyn ChartRenderer,
    sink: &'a mut dyn ArtifactSink,
    artifacts: Vec<String>,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a PipelineConfig,
        renderer: &'a dyn ChartRenderer,
        sink: &'a mut dyn ArtifactSink,
    ) -> Self {
        Self {
            config,
            renderer,
            sink,
            artifacts: Vec::new(),
        }
    }

    pub fn run(mut self) -> Result<RunOutcome, PipelineError> {
        let config = self.config;

        let loader = DataLoader::new(config.load_options());
        let Some(raw) = loader.load_csv(&config.input_path)? else {
            warn!(path = %config.input_path.display(), "Stopping: no input data");
            return Ok(RunOutcome::MissingInput(config.input_path.clone()));
        };

        let table = DataCleaner::new(config.clean_options()).clean(&raw)?;
        drop(raw);
        println!("{}", table.head(HEAD_ROWS));

        let summary = StatsCalculator::summarize(&table)?;
        summary.print_report();

        self.visualize(&table)?;

        let monthly = MonthlyRainfall::from_table(&table)?;
        monthly.print_report();
        let bar = Chart::Bar(ChartPlotter::monthly_rainfall(&monthly));
        self.persist_chart(&bar, &config.rainfall_chart)?;

        let csv = to_csv_bytes(&table)?;
        self.persist(&config.cleaned_csv, &csv)?;
        info!(file = %config.cleaned_csv, rows = table.height(), "Cleaned data exported");

        let report = RunReport {
            location: config.location.clone(),
            summary,
            monthly_rainfall: monthly,
            artifacts: self.artifacts,
        };

        // Stored after the report is built, so it is not in its own artifact list.
        if let Some(name) = &config.summary_json {
            let json = serde_json::to_vec_pretty(&report)?;
            self.sink.persist(name, &json)?;
            info!(file = %name, "Run report written");
        }

        Ok(RunOutcome::Completed(report))
    }

    fn visualize(&mut self, table: &WeatherTable) -> Result<(), PipelineError> {
        let config = self.config;
        info!("Generating plots");
        let trend = ChartPlotter::temperature_trend(table, config.trend_window)?;
        self.persist_chart(&Chart::Line(trend), &config.trend_chart)?;

        let scatter = ChartPlotter::humidity_vs_temperature(table)?;
        self.persist_chart(&Chart::Scatter(scatter), &config.scatter_chart)?;
        Ok(())
    }

    fn persist_chart(&mut self, chart: &Chart, name: &str) -> Result<(), PipelineError> {
        let png = self
            .renderer
            .render(chart)
            .map_err(|source| PipelineError::Render {
                name: name.to_string(),
                source,
            })?;
        self.persist(name, &png)
    }

    fn persist(&mut self, name: &str, bytes: &[u8]) -> Result<(), PipelineError> {
        self.sink.persist(name, bytes)?;
        self.artifacts.push(name.to_string());
        Ok(())
    }
}
