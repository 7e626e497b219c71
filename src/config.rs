//! Dashboard Configuration
//! Fixed input location, sheet layout and window geometry.

use std::path::PathBuf;

/// Spreadsheet read at startup, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "stats.ods";

/// Sheet holding car registrations by fuel type.
pub const CAR_SHEET_INDEX: usize = 0;

/// Sheet holding yearly CO₂ totals.
pub const CO2_SHEET_INDEX: usize = 2;

/// Initial slider position before clamping to the data.
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (2014, 2024);

/// Static settings for one dashboard process.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub car_sheet: usize,
    pub co2_sheet: usize,
    pub default_year_range: (i32, i32),
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            car_sheet: CAR_SHEET_INDEX,
            co2_sheet: CO2_SHEET_INDEX,
            default_year_range: DEFAULT_YEAR_RANGE,
            window_size: [1400.0, 900.0],
            min_window_size: [1000.0, 700.0],
        }
    }
}
