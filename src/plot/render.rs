use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;

use crate::math::savgol::savgol_filter;
use crate::plot::error::PlotError;

#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub raw_alpha: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 600,
            raw_alpha: 0.2,
        }
    }
}

/// Axis labels and caption of one chart.
#[derive(Clone, Debug)]
pub struct ChartText<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// Raw and smoothed y over a shared x, non-finite points already dropped.
#[derive(Clone, Debug)]
pub struct SmoothedSeries {
    pub x: Vec<f64>,
    pub raw: Vec<f64>,
    pub smoothed: Vec<f64>,
}

impl SmoothedSeries {
    pub fn build(
        x: &[f64],
        y: &[f64],
        window: usize,
        polyorder: usize,
    ) -> Result<Self, PlotError> {
        if x.len() != y.len() {
            return Err(PlotError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        let (xs, raw): (Vec<f64>, Vec<f64>) = x
            .iter()
            .zip(y)
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .map(|(a, b)| (*a, *b))
            .unzip();
        if xs.is_empty() {
            return Err(PlotError::EmptySeries);
        }
        if raw.len() < window {
            return Err(PlotError::WindowTooLarge {
                window,
                len: raw.len(),
            });
        }
        let smoothed = savgol_filter(&raw, window, polyorder)
            .map_err(|err| PlotError::Smoothing(format!("{err:#}")))?;
        Ok(Self {
            x: xs,
            raw,
            smoothed,
        })
    }
}

fn bounds<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Draws raw data faintly in black with the smoothed curve in red on top.
pub fn render_smoothed_png(
    series: &SmoothedSeries,
    text: &ChartText<'_>,
    style: &PlotStyle,
) -> Result<Vec<u8>, PlotError> {
    if series.x.is_empty() {
        return Err(PlotError::EmptySeries);
    }
    let x_bounds = bounds(series.x.iter());
    let y_bounds = bounds(series.raw.iter().chain(series.smoothed.iter()));

    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .caption(text.title, ("sans-serif", 22))
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 45)
            .build_cartesian_2d(x_bounds.0..x_bounds.1, y_bounds.0..y_bounds.1)?;
        chart
            .configure_mesh()
            .x_desc(text.x_label)
            .y_desc(text.y_label)
            .light_line_style(&BLACK.mix(0.05))
            .draw()?;

        let raw_style = BLACK.mix(style.raw_alpha).stroke_width(1);
        let raw = series.x.iter().copied().zip(series.raw.iter().copied());
        chart
            .draw_series(LineSeries::new(raw, raw_style))?
            .label("Raw data")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], raw_style));

        let smooth_style = RED.stroke_width(2);
        let smoothed = series.x.iter().copied().zip(series.smoothed.iter().copied());
        chart
            .draw_series(LineSeries::new(smoothed, smooth_style))?
            .label("Smoothed data")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], smooth_style));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .border_style(&BLACK.mix(0.3))
            .background_style(&WHITE.mix(0.8))
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, PlotError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| PlotError::Render("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
