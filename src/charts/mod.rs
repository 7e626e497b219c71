//! Charts module - Chart rendering

mod plotter;

pub use plotter::{ChartPlotter, ChartSeries, ChartSpec, CO2_CHART, CO2_COLOR, FUEL_CHART, PALETTE};
