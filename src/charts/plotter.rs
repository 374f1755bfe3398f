//! Chart Plotter Module
//! Builds chart models from the cleaned table. Nothing here draws or writes files.

use crate::data::WeatherTable;
use crate::stats::MonthlyRainfall;
use chrono::NaiveDate;
use plotters::style::RGBColor;
use polars::prelude::PolarsResult;

/// Matplotlib's tab:red.
pub const TREND_COLOR: RGBColor = RGBColor(214, 39, 40);
pub const SCATTER_COLOR: RGBColor = RGBColor(0, 0, 255);
pub const BAR_COLOR: RGBColor = RGBColor(0, 128, 128);

/// Time series line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series_label: String,
    pub color: RGBColor,
    pub size: (u32, u32),
    pub points: Vec<(NaiveDate, f64)>,
}

/// X/Y scatter chart with translucent markers.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: RGBColor,
    pub alpha: f64,
    pub marker_size: u32,
    pub size: (u32, u32),
    pub points: Vec<(f64, f64)>,
}

/// Categorical bar chart. A `None` bar is drawn as a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub y_label: String,
    pub color: RGBColor,
    pub size: (u32, u32),
    pub bars: Vec<(String, Option<f64>)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Line(LineChart),
    Scatter(ScatterChart),
    Bar(BarChart),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Line(c) => &c.title,
            Chart::Scatter(c) => &c.title,
            Chart::Bar(c) => &c.title,
        }
    }

    /// Pixel size of the rendered image.
    pub fn size(&self) -> (u32, u32) {
        match self {
            Chart::Line(c) => c.size,
            Chart::Scatter(c) => c.size,
            Chart::Bar(c) => c.size,
        }
    }
}

/// Creates chart models for the three report charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Temperature over date for the first `window` rows in table order.
    ///
    /// This is a row slice, not a calendar filter. Rows without a date are
    /// skipped.
    pub fn temperature_trend(table: &WeatherTable, window: usize) -> PolarsResult<LineChart> {
        let points = table
            .dates()?
            .into_iter()
            .zip(table.temperatures()?)
            .take(window)
            .filter_map(|(date, temp)| date.map(|d| (d, temp)))
            .collect();

        Ok(LineChart {
            title: "Daily Temperature Trends (First Year)".to_string(),
            x_label: "Date".to_string(),
            y_label: "Temperature (°C)".to_string(),
            series_label: "Daily Avg Temp".to_string(),
            color: TREND_COLOR,
            size: (1000, 500),
            points,
        })
    }

    /// Humidity (x) against temperature (y) over the whole table.
    pub fn humidity_vs_temperature(table: &WeatherTable) -> PolarsResult<ScatterChart> {
        let points = table
            .humidities()?
            .into_iter()
            .zip(table.temperatures()?)
            .collect();

        Ok(ScatterChart {
            title: "Humidity vs. Temperature".to_string(),
            x_label: "Humidity (%)".to_string(),
            y_label: "Temperature (°C)".to_string(),
            color: SCATTER_COLOR,
            alpha: 0.5,
            marker_size: 3,
            size: (800, 600),
            points,
        })
    }

    pub fn monthly_rainfall(monthly: &MonthlyRainfall) -> BarChart {
        BarChart {
            title: "Total Monthly Rainfall".to_string(),
            y_label: "Rainfall (mm)".to_string(),
            color: BAR_COLOR,
            size: (1000, 500),
            bars: monthly
                .totals()
                .iter()
                .map(|t| (t.month.to_string(), t.rainfall))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CleanOptions, DataCleaner};
    use polars::prelude::*;

    fn table() -> WeatherTable {
        let raw = df!(
            "Date" => ["2009-05-01", "2009-05-02", "2009-05-03", "2009-05-04", "2009-05-05"],
            "Location" => ["Albury"; 5],
            "MinTemp" => [1.0, 2.0, 3.0, 4.0, 5.0],
            "MaxTemp" => [11.0, 12.0, 13.0, 14.0, 15.0],
            "Humidity9am" => [90.0, 80.0, 70.0, 60.0, 50.0],
            "Humidity3pm" => [50.0, 40.0, 30.0, 20.0, 10.0],
            "Rainfall" => [0.0, 0.2, 0.0, 4.0, 1.0],
        )
        .unwrap();
        DataCleaner::new(CleanOptions {
            location: "Albury".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        })
        .clean(&raw)
        .unwrap()
    }

    #[test]
    fn test_trend_is_a_row_slice() {
        let chart = ChartPlotter::temperature_trend(&table(), 3).unwrap();
        assert_eq!(chart.points.len(), 3);
        assert_eq!(
            chart.points[0],
            (NaiveDate::from_ymd_opt(2009, 5, 1).unwrap(), 6.0)
        );
        assert_eq!(chart.points[2].1, 8.0);
    }

    #[test]
    fn test_trend_window_larger_than_table() {
        let chart = ChartPlotter::temperature_trend(&table(), 365).unwrap();
        assert_eq!(chart.points.len(), 5);
    }

    #[test]
    fn test_scatter_uses_every_row() {
        let chart = ChartPlotter::humidity_vs_temperature(&table()).unwrap();
        assert_eq!(chart.points.len(), 5);
        assert_eq!(chart.points[0], (70.0, 6.0));
        assert_eq!(chart.alpha, 0.5);
    }

    #[test]
    fn test_building_charts_leaves_table_unchanged() {
        let table = table();
        let before = table.frame().clone();
        let _ = ChartPlotter::temperature_trend(&table, 2).unwrap();
        let _ = ChartPlotter::humidity_vs_temperature(&table).unwrap();
        assert!(table.frame().equals(&before));
    }

    #[test]
    fn test_monthly_bars_follow_calendar() {
        let monthly = MonthlyRainfall::from_table(&table()).unwrap();
        let chart = ChartPlotter::monthly_rainfall(&monthly);

        assert_eq!(chart.bars.len(), 12);
        assert_eq!(chart.bars[0], ("January".to_string(), None));
        let (name, total) = &chart.bars[4];
        assert_eq!(name, "May");
        assert!((total.unwrap() - 5.2).abs() < 1e-9);
    }
}
