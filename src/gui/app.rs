//! Dashboard Main Application
//! Main window with the year filter panel and the chart viewer.

use crate::config::DashboardConfig;
use crate::data::{Dataset, YearRange};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::sync::Arc;
use tracing::{debug, error};

/// Main application window.
pub struct DashboardApp {
    dataset: Arc<Dataset>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset: Arc<Dataset>,
        config: &DashboardConfig,
    ) -> Self {
        Self::with_dataset(dataset, config)
    }

    /// Build the app state without a window, starting at the configured default range.
    pub fn with_dataset(dataset: Arc<Dataset>, config: &DashboardConfig) -> Self {
        let control_panel = ControlPanel::new(
            config.data_path.clone(),
            dataset.year_bounds(),
            config.default_year_range,
        );
        let initial = control_panel.range;

        let mut app = Self {
            dataset,
            control_panel,
            chart_viewer: ChartViewer::new(),
        };
        app.apply_range(initial);
        app
    }

    pub fn chart_viewer(&self) -> &ChartViewer {
        &self.chart_viewer
    }

    /// Re-run the filter for `range` and hand the result to the chart viewer.
    pub fn apply_range(&mut self, range: YearRange) {
        match self.dataset.filter(range) {
            Ok(records) => {
                debug!(
                    low = range.low,
                    high = range.high,
                    rows = records.len(),
                    "range applied"
                );
                self.chart_viewer.set_records(&records, range);
                self.control_panel.set_status(&format!(
                    "Showing {} of {} years",
                    records.len(),
                    self.dataset.len()
                ));
            }
            Err(e) => {
                error!(error = %e, "filtering failed");
                self.chart_viewer.set_records(&[], range);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Year filter
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                if let ControlPanelAction::RangeChanged(range) = self.control_panel.show(ui) {
                    self.apply_range(range);
                }
            });

        // Central panel - Charts
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
