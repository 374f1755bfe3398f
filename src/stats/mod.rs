//! Stats module - Summary statistics and monthly aggregation

mod calculator;
mod monthly;

pub use calculator::{ColumnStats, StatsCalculator, WeatherSummary};
pub use monthly::{with_month_labels, MonthTotal, MonthlyRainfall, CALENDAR_MONTHS, MONTH};
