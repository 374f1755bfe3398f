//! Pipeline Configuration
//! Input path, location filter and output names, each with a documented default.

use crate::data::{CleanOptions, LoadOptions};
use clap::Parser;
use std::path::PathBuf;

/// Default input dataset (weatherAUS layout).
pub const DEFAULT_INPUT: &str = "weatherAUS.csv";
/// Default location kept by the cleaner.
pub const DEFAULT_LOCATION: &str = "Albury";
/// Date format of the `Date` column.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
/// Cell values read as missing, in addition to empty cells.
pub const DEFAULT_NULL_VALUES: [&str; 2] = ["NA", "NaN"];
/// Number of leading rows shown in the temperature trend chart.
pub const DEFAULT_TREND_WINDOW: usize = 365;

pub const DEFAULT_TREND_CHART: &str = "temp_trend.png";
pub const DEFAULT_SCATTER_CHART: &str = "humidity_vs_temp.png";
pub const DEFAULT_RAINFALL_CHART: &str = "monthly_rainfall.png";
pub const DEFAULT_CLEANED_CSV: &str = "cleaned_weather_data.csv";

/// Everything the pipeline reads from the outside world.
///
/// Running the binary without flags uses the defaults above, which reproduce
/// the fixed-path behaviour: read `weatherAUS.csv`, keep `Albury`, and write
/// three charts plus the cleaned CSV into the working directory.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Clean, summarise and chart a weather CSV", long_about = None)]
pub struct PipelineConfig {
    /// Input CSV file
    #[arg(long, env = "WEATHER_INPUT", default_value = DEFAULT_INPUT)]
    pub input_path: PathBuf,

    /// Location to analyse
    #[arg(long, env = "WEATHER_LOCATION", default_value = DEFAULT_LOCATION)]
    pub location: String,

    /// strftime format of the Date column
    #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// Cell values treated as missing (repeatable)
    #[arg(long = "null-value", default_values = DEFAULT_NULL_VALUES)]
    pub null_values: Vec<String>,

    /// Directory receiving charts and the cleaned CSV
    #[arg(long, env = "WEATHER_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Rows shown in the temperature trend chart
    #[arg(long, default_value_t = DEFAULT_TREND_WINDOW)]
    pub trend_window: usize,

    #[arg(long, default_value = DEFAULT_TREND_CHART)]
    pub trend_chart: String,

    #[arg(long, default_value = DEFAULT_SCATTER_CHART)]
    pub scatter_chart: String,

    #[arg(long, default_value = DEFAULT_RAINFALL_CHART)]
    pub rainfall_chart: String,

    #[arg(long, default_value = DEFAULT_CLEANED_CSV)]
    pub cleaned_csv: String,

    /// Also store the run report as JSON under this name in the output directory
    #[arg(long, env = "WEATHER_SUMMARY_JSON")]
    pub summary_json: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            location: DEFAULT_LOCATION.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            null_values: DEFAULT_NULL_VALUES.iter().map(|v| v.to_string()).collect(),
            output_dir: PathBuf::from("."),
            trend_window: DEFAULT_TREND_WINDOW,
            trend_chart: DEFAULT_TREND_CHART.to_string(),
            scatter_chart: DEFAULT_SCATTER_CHART.to_string(),
            rainfall_chart: DEFAULT_RAINFALL_CHART.to_string(),
            cleaned_csv: DEFAULT_CLEANED_CSV.to_string(),
            summary_json: None,
        }
    }
}

impl PipelineConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            null_values: self.null_values.clone(),
        }
    }

    pub fn clean_options(&self) -> CleanOptions {
        CleanOptions {
            location: self.location.clone(),
            date_format: self.date_format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_matches_default() {
        let parsed = PipelineConfig::try_parse_from(["weather-pipeline"]).unwrap();
        let default = PipelineConfig::default();

        // Env overrides would make this comparison meaningless
        if std::env::var_os("WEATHER_INPUT").is_none()
            && std::env::var_os("WEATHER_LOCATION").is_none()
            && std::env::var_os("WEATHER_OUTPUT_DIR").is_none()
        {
            assert_eq!(parsed.input_path, default.input_path);
            assert_eq!(parsed.location, default.location);
            assert_eq!(parsed.output_dir, default.output_dir);
        }
        assert_eq!(parsed.null_values, vec!["NA".to_string(), "NaN".to_string()]);
        assert_eq!(parsed.trend_window, 365);
        assert_eq!(parsed.cleaned_csv, "cleaned_weather_data.csv");
    }

    #[test]
    fn test_flags_override_defaults() {
        let parsed = PipelineConfig::try_parse_from([
            "weather-pipeline",
            "--location",
            "Sydney",
            "--trend-window",
            "30",
            "--null-value",
            "missing",
        ])
        .unwrap();

        assert_eq!(parsed.location, "Sydney");
        assert_eq!(parsed.trend_window, 30);
        assert_eq!(parsed.null_values, vec!["missing".to_string()]);
        assert_eq!(parsed.clean_options().location, "Sydney");
    }
}
