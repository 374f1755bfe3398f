//! CSV Data Loader Module
//! Reads the raw weather CSV into a Polars DataFrame.

use polars::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{0}' is not a regular file")]
    NotAFile(PathBuf),
}

/// Options for reading the raw file.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Cell values read as null, on top of empty cells.
    pub null_values: Vec<String>,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    options: LoadOptions,
}

impl DataLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Load a CSV file.
    ///
    /// A missing file is not an error: it is reported and `Ok(None)` is
    /// returned so the caller can stop before any other stage runs. Every
    /// other read or parse failure is returned as an error.
    pub fn load_csv(&self, file_path: &Path) -> Result<Option<DataFrame>, LoaderError> {
        match std::fs::metadata(file_path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(LoaderError::NotAFile(file_path.to_path_buf())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    path = %file_path.display(),
                    "Input file not found, please check the file name"
                );
                return Ok(None);
            }
            Err(source) => {
                return Err(LoaderError::Io {
                    path: file_path.to_path_buf(),
                    source,
                })
            }
        }

        let null_values = NullValues::AllColumns(
            self.options
                .null_values
                .iter()
                .map(|v| PlSmallStr::from(v.as_str()))
                .collect(),
        );

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_null_values(Some(null_values))
            .finish()?
            .collect()?;

        info!(path = %file_path.display(), rows = df.height(), "Data loaded");
        info!("Columns: {:?}", Self::column_names(&df));

        Ok(Some(df))
    }

    /// Get list of column names from a DataFrame.
    pub fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}
