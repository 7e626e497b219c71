//! Chart Viewer Widget
//! Central scrollable panel: dashboard title, the two year-series charts and the caption.

use crate::charts::{ChartPlotter, ChartSeries, CO2_CHART, FUEL_CHART};
use crate::data::{CombinedRecord, YearRange};
use egui::{RichText, ScrollArea};

pub const TITLE: &str = "Car Registrations by Fuel Type and CO₂ Emissions Dashboard";
pub const FUEL_SUBHEADER: &str = "Car Registrations by Fuel Type";
pub const CO2_SUBHEADER: &str = "CO₂ Emissions Over Time";
pub const CAPTION: &str = "This dashboard allows users to interactively explore the relationship \
between car registrations and CO₂ emissions in the UK over time.";

const SECTION_SPACING: f32 = 15.0;

/// Both charts share one filtered record set.
pub struct ChartViewer {
    pub range: YearRange,
    fuel_series: Vec<ChartSeries>,
    co2_series: ChartSeries,
    row_count: usize,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            range: YearRange::default(),
            fuel_series: ChartPlotter::fuel_series(&[]),
            co2_series: ChartPlotter::co2_series(&[]),
            row_count: 0,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the plotted data with a freshly filtered set.
    pub fn set_records(&mut self, records: &[CombinedRecord], range: YearRange) {
        self.range = range;
        self.fuel_series = ChartPlotter::fuel_series(records);
        self.co2_series = ChartPlotter::co2_series(records);
        self.row_count = records.len();
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Draw the title, both chart sections and the caption
    pub fn show(&self, ui: &mut egui::Ui) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new(TITLE).size(26.0).strong());
                ui.add_space(SECTION_SPACING);

                ui.label(RichText::new(FUEL_SUBHEADER).size(18.0).strong());
                ui.add_space(5.0);
                ChartPlotter::draw_line_chart(ui, FUEL_CHART, &self.fuel_series, self.range);

                ui.add_space(SECTION_SPACING);

                ui.label(RichText::new(CO2_SUBHEADER).size(18.0).strong());
                ui.add_space(5.0);
                ChartPlotter::draw_line_chart(
                    ui,
                    CO2_CHART,
                    std::slice::from_ref(&self.co2_series),
                    self.range,
                );

                ui.add_space(SECTION_SPACING);
                ui.label(CAPTION);
            });
    }
}
