//! Static Chart Renderer
//! Draws chart models into in-memory PNG images with plotters.
//!
//! Rendering goes to an RGB buffer, never to disk. Persisting the bytes is
//! the caller's job (see `crate::output`).

use crate::charts::{BarChart, Chart, LineChart, ScatterChart};
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Chart '{0}' has no points to draw")]
    NoData(String),
    #[error("Pixel buffer does not match image size")]
    Buffer,
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Turns a chart model into encoded image bytes.
pub trait ChartRenderer {
    fn render(&self, chart: &Chart) -> Result<Vec<u8>, RenderError>;
}

/// Plotters bitmap renderer producing PNG bytes.
pub struct StaticChartRenderer;

type Root<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const FONT: &str = "sans-serif";

fn drawing<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

impl ChartRenderer for StaticChartRenderer {
    fn render(&self, chart: &Chart) -> Result<Vec<u8>, RenderError> {
        let (width, height) = chart.size();
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(drawing)?;
            match chart {
                Chart::Line(c) => Self::draw_line(&root, c)?,
                Chart::Scatter(c) => Self::draw_scatter(&root, c)?,
                Chart::Bar(c) => Self::draw_bars(&root, c)?,
            }
            root.present().map_err(drawing)?;
        }
        Self::encode_png(buffer, width, height)
    }
}

impl StaticChartRenderer {
    fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let image = RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer)?;
        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    /// Pad a value range so flat series still get a visible axis.
    fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        let pad = if (max - min).abs() > 1e-6 {
            (max - min) * 0.05
        } else {
            1.0
        };
        (min - pad, max + pad)
    }

    fn draw_line(root: &Root<'_>, chart: &LineChart) -> Result<(), RenderError> {
        let (Some(first), Some(last)) = (
            chart.points.iter().map(|p| p.0).min(),
            chart.points.iter().map(|p| p.0).max(),
        ) else {
            return Err(RenderError::NoData(chart.title.clone()));
        };
        let last = if last == first {
            first.succ_opt().unwrap_or(last)
        } else {
            last
        };
        let (y_min, y_max) = Self::padded_range(chart.points.iter().map(|p| p.1));

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(first..last, y_min..y_max)
            .map_err(drawing)?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&|d: &chrono::NaiveDate| d.format("%Y-%m").to_string())
            .light_line_style(BLACK.mix(0.1))
            .draw()
            .map_err(drawing)?;

        let color = chart.color;
        ctx.draw_series(LineSeries::new(
            chart.points.iter().copied(),
            color.stroke_width(2),
        ))
        .map_err(drawing)?
        .label(chart.series_label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(drawing)?;

        Ok(())
    }

    fn draw_scatter(root: &Root<'_>, chart: &ScatterChart) -> Result<(), RenderError> {
        if chart.points.is_empty() {
            return Err(RenderError::NoData(chart.title.clone()));
        }
        let (x_min, x_max) = Self::padded_range(chart.points.iter().map(|p| p.0));
        let (y_min, y_max) = Self::padded_range(chart.points.iter().map(|p| p.1));

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(drawing)?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .light_line_style(BLACK.mix(0.1))
            .draw()
            .map_err(drawing)?;

        let style = chart.color.mix(chart.alpha).filled();
        ctx.draw_series(
            chart
                .points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), chart.marker_size, style)),
        )
        .map_err(drawing)?;

        Ok(())
    }

    fn draw_bars(root: &Root<'_>, chart: &BarChart) -> Result<(), RenderError> {
        let count = chart.bars.len() as u32;
        if count == 0 {
            return Err(RenderError::NoData(chart.title.clone()));
        }
        let top = chart
            .bars
            .iter()
            .filter_map(|(_, v)| *v)
            .fold(0.0f64, f64::max);
        let y_max = if top > 0.0 { top * 1.1 } else { 1.0 };
        let labels: Vec<&str> = chart.bars.iter().map(|(name, _)| name.as_str()).collect();

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(90)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..count).into_segmented(), 0f64..y_max)
            .map_err(drawing)?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|v: &SegmentValue<u32>| match v {
                SegmentValue::CenterOf(i) => labels
                    .get(*i as usize)
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .x_label_style((FONT, 14).into_font().transform(FontTransform::Rotate90))
            .y_desc(chart.y_label.as_str())
            .light_line_style(BLACK.mix(0.1))
            .draw()
            .map_err(drawing)?;

        ctx.draw_series(
            Histogram::vertical(&ctx)
                .style(chart.color.filled())
                .margin(8)
                .data(
                    chart
                        .bars
                        .iter()
                        .enumerate()
                        .filter_map(|(i, (_, v))| v.map(|mm| (i as u32, mm))),
                ),
        )
        .map_err(drawing)?;

        Ok(())
    }
}
