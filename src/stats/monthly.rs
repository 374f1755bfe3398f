//! Monthly Rainfall Aggregation
//! Rainfall summed per calendar month name, presented January to December.

use crate::data::{WeatherTable, DATE, RAINFALL};
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// Name of the month label column added by [`with_month_labels`].
pub const MONTH: &str = "Month";

/// Calendar order used for presentation, regardless of which months have data.
pub const CALENDAR_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Rainfall total for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub month: &'static str,
    /// `None` when no record falls in this month.
    pub rainfall: Option<f64>,
}

/// Twelve month totals in calendar order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRainfall {
    totals: Vec<MonthTotal>,
}

/// Copy of the table with a `Month` column holding the full month name.
///
/// The table itself is left as is.
pub fn with_month_labels(table: &WeatherTable) -> PolarsResult<DataFrame> {
    table
        .frame()
        .clone()
        .lazy()
        .with_column(col(DATE).dt().strftime("%B").alias(MONTH))
        .collect()
}

impl MonthlyRainfall {
    /// Sum rainfall per month name across all years, then reindex onto
    /// January..December. Months without records stay `None` rather than 0.
    pub fn from_table(table: &WeatherTable) -> PolarsResult<Self> {
        let grouped = with_month_labels(table)?
            .lazy()
            .group_by([col(MONTH)])
            .agg([col(RAINFALL).sum()])
            .collect()?;

        let months = grouped.column(MONTH)?.as_materialized_series().str()?;
        let sums = grouped.column(RAINFALL)?.f64()?;
        let by_month: HashMap<&str, f64> = months
            .into_iter()
            .zip(sums.into_iter())
            .filter_map(|(month, sum)| Some((month?, sum?)))
            .collect();

        let totals = CALENDAR_MONTHS
            .iter()
            .map(|&month| MonthTotal {
                month,
                rainfall: by_month.get(month).copied(),
            })
            .collect();

        Ok(Self { totals })
    }

    pub fn totals(&self) -> &[MonthTotal] {
        &self.totals
    }

    /// Total for a month by name, `None` if the month had no records.
    pub fn get(&self, month: &str) -> Option<f64> {
        self.totals
            .iter()
            .find(|t| t.month == month)
            .and_then(|t| t.rainfall)
    }

    pub fn print_report(&self) {
        println!("\n--- Grouping Data ---");
        println!("Total Rainfall by Month:");
        for total in &self.totals {
            match total.rainfall {
                Some(mm) => println!("{:<10} {:>10.2}", total.month, mm),
                None => println!("{:<10} {:>10}", total.month, "missing"),
            }
        }
    }
}
