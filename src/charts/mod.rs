//! Charts module - Chart models and rendering

mod plotter;
mod renderer;

pub use plotter::{
    BarChart, Chart, ChartPlotter, LineChart, ScatterChart, BAR_COLOR, SCATTER_COLOR, TREND_COLOR,
};
pub use renderer::{ChartRenderer, RenderError, StaticChartRenderer};
