//! Data module - CSV loading, cleaning and export

mod cleaner;
mod exporter;
mod loader;
mod table;

pub use cleaner::{CleanError, CleanOptions, DataCleaner, REQUIRED_COLUMNS};
pub use exporter::{to_csv_bytes, ExportError};
pub use loader::{DataLoader, LoadOptions, LoaderError};
pub use table::{WeatherTable, CLEANED_COLUMNS, DATE, HUMIDITY, RAINFALL, TEMPERATURE};
