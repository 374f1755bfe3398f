//! Cleaned Data Exporter
//! Serialises the cleaned table as CSV with a header and no index column.

use crate::data::WeatherTable;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Encode the table as CSV bytes. Dates are written as `YYYY-MM-DD`.
pub fn to_csv_bytes(table: &WeatherTable) -> Result<Vec<u8>, ExportError> {
    let mut df = table.frame().clone();
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut df)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CleanOptions, DataCleaner};

    #[test]
    fn test_header_and_rows_without_index() {
        let raw = df!(
            "Date" => ["2012-03-04", "2012-03-05"],
            "Location" => ["Albury", "Albury"],
            "MinTemp" => [10.0, 12.0],
            "MaxTemp" => [20.0, 22.0],
            "Humidity9am" => [50.0, 60.0],
            "Humidity3pm" => [30.0, 40.0],
            "Rainfall" => [0.5, 0.0],
        )
        .unwrap();
        let table = DataCleaner::new(CleanOptions {
            location: "Albury".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        })
        .clean(&raw)
        .unwrap();

        let csv = String::from_utf8(to_csv_bytes(&table).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Date,Temperature,Humidity,Rainfall");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("2012-03-04,15"));
        assert_eq!(lines[1].split(',').count(), 4);
    }
}
