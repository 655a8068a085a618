//! Shaded region between a lower and an upper curve.

use plotters::prelude::*;
use simulac_core::{ErrorInfo, SimulacError};

use crate::{plot_error, Chart};

/// Outline of the band: upper curve left to right, then lower curve back.
pub fn band_polygon(x: &[f64], lower: &[f64], upper: &[f64]) -> Result<Vec<(f64, f64)>, SimulacError> {
    if lower.len() != upper.len() || x.len() != lower.len() {
        return Err(SimulacError::Plot(
            ErrorInfo::new("band_length_mismatch", "x, lower and upper must have equal lengths")
                .with_context("x", x.len().to_string())
                .with_context("lower", lower.len().to_string())
                .with_context("upper", upper.len().to_string()),
        ));
    }
    let forward = x.iter().copied().zip(upper.iter().copied());
    let backward = x.iter().copied().zip(lower.iter().copied()).rev();
    Ok(forward.chain(backward).collect())
}

/// Fills the band with `color` at opacity `alpha`. Nothing is drawn on error.
pub fn draw_shaded_band<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    x: &[f64],
    lower: &[f64],
    upper: &[f64],
    color: &RGBColor,
    alpha: f64,
) -> Result<(), SimulacError> {
    let outline = band_polygon(x, lower, upper)?;
    if outline.is_empty() {
        return Ok(());
    }
    chart
        .draw_series(std::iter::once(Polygon::new(outline, color.mix(alpha).filled())))
        .map_err(plot_error)?;
    Ok(())
}
