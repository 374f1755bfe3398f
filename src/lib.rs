//! Weather Pipeline - Weather CSV cleaning, statistics & chart generation
//!
//! Loads a weatherAUS-style CSV, keeps one location, derives daily
//! temperature and humidity, imputes gaps with column means, reports
//! summary statistics, renders three charts, totals rainfall per calendar
//! month and exports the cleaned table.

pub mod charts;
pub mod config;
pub mod data;
pub mod output;
pub mod pipeline;
pub mod stats;

pub use config::PipelineConfig;
pub use pipeline::{Pipeline, PipelineError, RunOutcome, RunReport};
