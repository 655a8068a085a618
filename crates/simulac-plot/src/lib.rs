#![deny(missing_docs)]
#![doc = "SVG rendering of simulac statistics with plotters."]

pub mod band;
pub mod figures;
pub mod panels;

use std::fmt::Display;

use plotters::coord::types::RangedCoordf64;
use plotters::prelude::{Cartesian2d, ChartContext};
use serde::{Deserialize, Serialize};
use simulac_core::{ErrorInfo, SimulacError};

pub use band::{band_polygon, draw_shaded_band};
pub use figures::{activity, compare_fate, fig3, loading, Fig3Summary};
pub use panels::{
    activity_panel, dist_panel, instance_extent, instance_panel, plot_distribution, ActivityPanel,
    DistPanel, DistStyle, SpeciesSeries, DEFAULT_SPECIES, SPECIES_COLORS,
};

/// Chart with linear `f64` axes, the only coordinate system used here.
pub type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Output size and band transparency of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Opacity of shaded confidence bands.
    pub alpha: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            alpha: 0.25,
        }
    }
}

pub(crate) fn plot_error<E: Display>(err: E) -> SimulacError {
    SimulacError::Plot(ErrorInfo::new("render", err.to_string()))
}
