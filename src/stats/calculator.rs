//! Statistics Calculator Module
//! Descriptive statistics over the cleaned weather table.

use crate::data::{WeatherTable, RAINFALL};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::{Data, Median, Statistics};

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ColumnStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Summary of a cleaned table, printed after cleaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    pub records: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub temperature: ColumnStats,
    pub total_rainfall: f64,
}

impl WeatherSummary {
    /// Print the report block.
    pub fn print_report(&self) {
        println!("\n--- Statistical Analysis ---");
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            println!("Records:            {} ({} to {})", self.records, first, last);
        } else {
            println!("Records:            {}", self.records);
        }
        println!("Temperature (Mean): {:.2}°C", self.temperature.mean);
        println!("Temperature (Max):  {:.2}°C", self.temperature.max);
        println!("Temperature (Min):  {:.2}°C", self.temperature.min);
        println!("Temperature (Med):  {:.2}°C", self.temperature.median);
        println!("Temperature (Std):  {:.2}°C", self.temperature.std);
        println!("Total Rainfall:     {:.2} mm", self.total_rainfall);
        println!("{}", "-".repeat(30));
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    ///
    /// Mean and standard deviation use statrs' streaming estimators. An empty
    /// slice gives all-NaN statistics.
    pub fn compute_descriptive_stats(values: &[f64]) -> ColumnStats {
        let n = values.len();
        if n == 0 {
            return ColumnStats::default();
        }

        ColumnStats {
            count: n,
            mean: Statistics::mean(values),
            median: Data::new(values.to_vec()).median(),
            std: if n > 1 { Statistics::std_dev(values) } else { 0.0 },
            min: Statistics::min(values),
            max: Statistics::max(values),
        }
    }

    /// Sum of a float column, using Polars' compensated float summation.
    pub fn column_total(df: &DataFrame, column: &str) -> PolarsResult<f64> {
        Ok(df.column(column)?.f64()?.sum().unwrap_or(0.0))
    }

    /// Compute the full summary for a cleaned table. Reads only.
    pub fn summarize(table: &WeatherTable) -> PolarsResult<WeatherSummary> {
        let temperatures = table.temperatures()?;
        let dates = table.dates()?;

        Ok(WeatherSummary {
            records: table.height(),
            first_date: dates.iter().flatten().min().copied(),
            last_date: dates.iter().flatten().max().copied(),
            temperature: Self::compute_descriptive_stats(&temperatures),
            total_rainfall: Self::column_total(table.frame(), RAINFALL)?,
        })
    }
}
