//! PNG charts
//!
//! Charts carry no text (no captions, tick labels or legends) so the bitmap
//! backend needs no font support. Colours identify the series instead: red,
//! green and blue for colour channels, black for grayscale profiles and for
//! measured data, red for a fitted curve.

use std::fmt::Display;
use std::ops::Range;
use std::path::Path;
use plotters::prelude::*;
use tracing::{debug, instrument};
use crate::fitting::{combined_function, FitDataset, PeakParameters};
use crate::image_pipeline::IntensityProfile;
use crate::report::error::{ReportError, Result};

const PLOT_SIZE: (u32, u32) = (800, 600);

/// Evenly spaced x values the fitted curve is drawn through.
pub const FIT_CURVE_POINTS: usize = 500;

fn plot_error(err: impl Display) -> ReportError {
    ReportError::Plot(err.to_string())
}

fn series_colour(channel: &str) -> RGBColor {
    match channel {
        "Red" => RED,
        "Green" => GREEN,
        "Blue" => BLUE,
        _ => BLACK,
    }
}

/// Pads a value range by 5% on each side, widening empty ranges.
fn padded(lo: f64, hi: f64) -> Range<f64> {
    let span = hi - lo;
    if span > 0.0 {
        (lo - 0.05 * span)..(hi + 0.05 * span)
    } else {
        (lo - 1.0)..(hi + 1.0)
    }
}

/// Draws every channel of `profile` against sample index.
#[instrument(skip_all, fields(path = %path.as_ref().display(), samples = profile.len()))]
pub fn plot_profile(path: impl AsRef<Path>, profile: &IntensityProfile) -> Result<()> {
    if profile.is_empty() {
        return Err(ReportError::EmptyData);
    }

    let channels = profile.channels();
    let peak = channels
        .iter()
        .flat_map(|(_, values)| values.iter())
        .copied()
        .max()
        .unwrap_or(0);
    let last_index = (profile.len() - 1) as f64;

    let root = BitMapBackend::new(path.as_ref(), PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(padded(0.0, last_index), padded(0.0, peak as f64))
        .map_err(plot_error)?;

    for (name, values) in channels {
        let points = values.iter().enumerate().map(|(i, &v)| (i as f64, v as f64));
        chart
            .draw_series(LineSeries::new(points, series_colour(name).stroke_width(2)))
            .map_err(plot_error)?;
    }

    root.present().map_err(plot_error)?;
    debug!("Profile plot written");
    Ok(())
}

/// Draws the measured points and the model curve for `params`.
#[instrument(skip_all, fields(path = %path.as_ref().display(), points = dataset.len()))]
pub fn plot_fit(path: impl AsRef<Path>, dataset: &FitDataset, params: &PeakParameters) -> Result<()> {
    let (x_min, x_max) = dataset.x_range().ok_or(ReportError::EmptyData)?;

    let curve: Vec<(f64, f64)> = (0..FIT_CURVE_POINTS)
        .map(|i| {
            let x = x_min + (x_max - x_min) * i as f64 / (FIT_CURVE_POINTS - 1) as f64;
            (x, combined_function(x, params))
        })
        .collect();

    let (y_min, y_max) = dataset
        .y()
        .iter()
        .copied()
        .chain(curve.iter().map(|&(_, y)| y))
        .filter(|y| y.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
    if y_min > y_max {
        return Err(ReportError::EmptyData);
    }

    let root = BitMapBackend::new(path.as_ref(), PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(padded(x_min, x_max), padded(y_min, y_max))
        .map_err(plot_error)?;

    chart
        .draw_series(
            dataset
                .x()
                .iter()
                .zip(dataset.y())
                .map(|(&x, &y)| Circle::new((x, y), 2, BLACK.filled())),
        )
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(curve, RED.stroke_width(2)))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    debug!("Fit plot written");
    Ok(())
}
