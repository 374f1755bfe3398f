//! Data Cleaner Module
//! Location filter, derived columns and mean imputation.

use crate::data::table::{
    WeatherTable, CLEANED_COLUMNS, DATE, HUMIDITY, RAINFALL, TEMPERATURE,
};
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

const LOCATION: &str = "Location";
const MIN_TEMP: &str = "MinTemp";
const MAX_TEMP: &str = "MaxTemp";
const HUMIDITY_9AM: &str = "Humidity9am";
const HUMIDITY_3PM: &str = "Humidity3pm";

/// Raw columns the cleaner reads. Anything else in the file is ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    LOCATION,
    DATE,
    MIN_TEMP,
    MAX_TEMP,
    HUMIDITY_9AM,
    HUMIDITY_3PM,
    RAINFALL,
];

/// Columns whose nulls are replaced by the column mean.
const IMPUTED_COLUMNS: [&str; 3] = [TEMPERATURE, HUMIDITY, RAINFALL];

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Input is missing required column '{0}'")]
    MissingColumn(String),
    #[error("No records found for location '{location}'")]
    NoRecords { location: String },
    #[error("Column '{column}' has no values to compute an imputation mean from")]
    AllMissing { column: &'static str },
}

#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Value of the `Location` column to keep.
    pub location: String,
    /// strftime format used to parse string dates.
    pub date_format: String,
}

/// Turns the raw weather frame into a [`WeatherTable`].
pub struct DataCleaner {
    options: CleanOptions,
}

impl DataCleaner {
    pub fn new(options: CleanOptions) -> Self {
        Self { options }
    }

    /// Clean the raw frame.
    ///
    /// Steps, in order: keep rows for the configured location, parse `Date`,
    /// derive `Temperature` and `Humidity` as the mean of their two sources
    /// (null if either source is null), fill nulls in Temperature, Humidity
    /// and Rainfall with the mean of the filtered column, then project to the
    /// four output columns.
    ///
    /// Fails when nothing matches the location or when a column to impute
    /// has no values at all; neither case falls back to a fill value.
    pub fn clean(&self, raw: &DataFrame) -> Result<WeatherTable, CleanError> {
        for name in REQUIRED_COLUMNS {
            if raw.column(name).is_err() {
                return Err(CleanError::MissingColumn(name.to_string()));
            }
        }

        let location = self.options.location.as_str();
        let derived = raw
            .clone()
            .lazy()
            .filter(col(LOCATION).eq(lit(location)))
            .with_columns([
                self.date_expr(raw.column(DATE)?.dtype()).alias(DATE),
                mean_of(MIN_TEMP, MAX_TEMP).alias(TEMPERATURE),
                mean_of(HUMIDITY_9AM, HUMIDITY_3PM).alias(HUMIDITY),
                as_f64(RAINFALL).alias(RAINFALL),
            ])
            .collect()?;

        info!(location, rows = derived.height(), "Filtered data for location");

        if derived.height() == 0 {
            return Err(CleanError::NoRecords {
                location: location.to_string(),
            });
        }

        for column in IMPUTED_COLUMNS {
            let missing = derived.column(column)?.null_count();
            if missing == derived.height() {
                return Err(CleanError::AllMissing { column });
            }
            if missing > 0 {
                debug!(column, missing, "Imputing with column mean");
            }
        }

        // Every fill expression sees the un-imputed columns, so each mean is
        // taken over the filtered rows before any column is touched.
        let cleaned = derived
            .lazy()
            .with_columns(IMPUTED_COLUMNS.map(|c| col(c).fill_null(col(c).mean())))
            .select(CLEANED_COLUMNS.map(col))
            .collect()?;

        info!("Data cleaning completed");
        Ok(WeatherTable::new(cleaned))
    }

    fn date_expr(&self, dtype: &DataType) -> Expr {
        match dtype {
            DataType::Date => col(DATE),
            DataType::Datetime(_, _) => col(DATE).cast(DataType::Date),
            _ => col(DATE).str().to_date(StrptimeOptions {
                format: Some(self.options.date_format.as_str().into()),
                strict: true,
                exact: true,
                ..Default::default()
            }),
        }
    }
}

/// Strict cast: an unparseable number is an error, not a null.
fn as_f64(name: &str) -> Expr {
    col(name).strict_cast(DataType::Float64)
}

fn mean_of(a: &str, b: &str) -> Expr {
    (as_f64(a) + as_f64(b)) / lit(2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cleaner(location: &str) -> DataCleaner {
        DataCleaner::new(CleanOptions {
            location: location.to_string(),
            date_format: "%Y-%m-%d".to_string(),
        })
    }

    fn raw_frame() -> DataFrame {
        df!(
            "Date" => ["2010-01-01", "2010-01-02", "2010-01-03", "2010-01-01"],
            "Location" => ["Albury", "Albury", "Albury", "Sydney"],
            "MinTemp" => [Some(10.0), Some(14.0), None, Some(1.0)],
            "MaxTemp" => [Some(20.0), Some(16.0), None, Some(3.0)],
            "Humidity9am" => [Some(40.0), Some(60.0), Some(80.0), Some(10.0)],
            "Humidity3pm" => [Some(20.0), None, Some(40.0), Some(10.0)],
            "Rainfall" => [Some(0.0), Some(5.0), None, Some(100.0)],
            "WindDir" => ["N", "S", "E", "W"],
        )
        .unwrap()
    }

    #[test]
    fn test_keeps_only_configured_location() {
        let table = cleaner("Albury").clean(&raw_frame()).unwrap();
        assert_eq!(table.height(), 3);

        let sydney = cleaner("Sydney").clean(&raw_frame()).unwrap();
        assert_eq!(sydney.height(), 1);
        assert_eq!(sydney.rainfall().unwrap(), vec![100.0]);
    }

    #[test]
    fn test_output_columns() {
        let table = cleaner("Albury").clean(&raw_frame()).unwrap();
        let names: Vec<String> = table
            .frame()
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["Date", "Temperature", "Humidity", "Rainfall"]);
        assert_eq!(table.frame().column("Date").unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn test_derived_columns_are_pair_means() {
        let table = cleaner("Albury").clean(&raw_frame()).unwrap();
        let temps = table.temperatures().unwrap();
        assert_eq!(temps[0], 15.0);
        assert_eq!(temps[1], 15.0);

        let humidity = table.humidities().unwrap();
        assert_eq!(humidity[0], 30.0);
        assert_eq!(humidity[2], 60.0);
    }

    #[test]
    fn test_missing_values_take_filtered_column_mean() {
        let table = cleaner("Albury").clean(&raw_frame()).unwrap();

        // (10+20)/2 and (14+16)/2 average to 15
        assert_eq!(table.temperatures().unwrap()[2], 15.0);
        // Row 2 humidity is null because 3pm is missing; mean of 30 and 60
        assert_eq!(table.humidities().unwrap()[1], 45.0);
        // Sydney's 100mm must not leak into Albury's mean
        assert_eq!(table.rainfall().unwrap()[2], 2.5);

        for name in IMPUTED_COLUMNS {
            assert_eq!(table.frame().column(name).unwrap().null_count(), 0);
        }
    }

    #[test]
    fn test_dates_parsed_in_order() {
        let table = cleaner("Albury").clean(&raw_frame()).unwrap();
        let dates = table.dates().unwrap();
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2010, 1, 1));
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2010, 1, 3));
    }

    #[test]
    fn test_no_records_for_location() {
        let result = cleaner("Nowhere").clean(&raw_frame());
        match result {
            Err(CleanError::NoRecords { location }) => assert_eq!(location, "Nowhere"),
            other => panic!("Expected NoRecords, got {:?}", other),
        }
    }

    #[test]
    fn test_all_missing_column_fails() {
        let raw = df!(
            "Date" => ["2010-01-01", "2010-01-02"],
            "Location" => ["Albury", "Albury"],
            "MinTemp" => [10.0, 12.0],
            "MaxTemp" => [20.0, 22.0],
            "Humidity9am" => [None::<f64>, None],
            "Humidity3pm" => [50.0, 55.0],
            "Rainfall" => [0.0, 1.0],
        )
        .unwrap();

        let result = cleaner("Albury").clean(&raw);
        assert!(matches!(
            result,
            Err(CleanError::AllMissing { column: "Humidity" })
        ));
    }

    #[test]
    fn test_missing_required_column() {
        let raw = raw_frame().drop("Humidity3pm").unwrap();
        let result = cleaner("Albury").clean(&raw);
        assert!(matches!(result, Err(CleanError::MissingColumn(name)) if name == "Humidity3pm"));
    }

    #[test]
    fn test_unparseable_date_is_fatal() {
        let mut raw = raw_frame();
        raw.with_column(Column::new(
            "Date".into(),
            ["2010-01-01", "not a date", "2010-01-03", "2010-01-01"],
        ))
        .unwrap();

        let result = cleaner("Albury").clean(&raw);
        assert!(matches!(result, Err(CleanError::PolarsError(_))));
    }

    #[test]
    fn test_unparseable_number_is_fatal() {
        let mut raw = raw_frame();
        raw.with_column(Column::new(
            "Rainfall".into(),
            ["0.0", "abc", "1.0", "2.0"],
        ))
        .unwrap();

        let result = cleaner("Albury").clean(&raw);
        assert!(matches!(result, Err(CleanError::PolarsError(_))));
    }

    #[test]
    fn test_input_frame_untouched() {
        let raw = raw_frame();
        let _ = cleaner("Albury").clean(&raw).unwrap();
        assert_eq!(raw.height(), 4);
        assert_eq!(raw.width(), 8);
    }
}
