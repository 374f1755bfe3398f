//! Cleaned Weather Table
//! The four-column frame every downstream stage reads.

use chrono::NaiveDate;
use polars::prelude::*;

pub const DATE: &str = "Date";
pub const TEMPERATURE: &str = "Temperature";
pub const HUMIDITY: &str = "Humidity";
pub const RAINFALL: &str = "Rainfall";

/// Output column order of the cleaned table.
pub const CLEANED_COLUMNS: [&str; 4] = [DATE, TEMPERATURE, HUMIDITY, RAINFALL];

/// Cleaned weather data: `Date` (date), `Temperature`, `Humidity` and
/// `Rainfall` (all `f64`, no nulls).
///
/// Only [`crate::data::DataCleaner`] builds one, so the column set and the
/// no-null guarantee hold for every instance. The wrapped frame is never
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct WeatherTable {
    df: DataFrame,
}

impl WeatherTable {
    pub(crate) fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Read-only view of the underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// First `n` rows, for progress output.
    pub fn head(&self, n: usize) -> DataFrame {
        self.df.head(Some(n))
    }

    /// Dates in table order. A source row whose date cell was empty yields `None`.
    pub fn dates(&self) -> PolarsResult<Vec<Option<NaiveDate>>> {
        Ok(self
            .df
            .column(DATE)?
            .as_materialized_series()
            .date()?
            .as_date_iter()
            .collect())
    }

    pub fn temperatures(&self) -> PolarsResult<Vec<f64>> {
        self.values(TEMPERATURE)
    }

    pub fn humidities(&self) -> PolarsResult<Vec<f64>> {
        self.values(HUMIDITY)
    }

    pub fn rainfall(&self) -> PolarsResult<Vec<f64>> {
        self.values(RAINFALL)
    }

    fn values(&self, name: &str) -> PolarsResult<Vec<f64>> {
        Ok(self.df.column(name)?.f64()?.into_no_null_iter().collect())
    }
}
