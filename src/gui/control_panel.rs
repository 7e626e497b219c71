//! Control Panel Widget
//! Left side panel with the year-range filter and data status.

use crate::data::YearRange;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Left side control panel: "Filter by Year" slider pair and status line.
pub struct ControlPanel {
    pub data_path: Option<PathBuf>,
    /// Full span of years in the dataset; `None` when it is empty
    pub bounds: Option<(i32, i32)>,
    pub range: YearRange,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            data_path: None,
            bounds: None,
            range: YearRange::default(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new(
        data_path: PathBuf,
        bounds: Option<(i32, i32)>,
        default_range: (i32, i32),
    ) -> Self {
        Self {
            data_path: Some(data_path),
            bounds,
            range: YearRange::default_for(default_range, bounds),
            status: "Ready".to_string(),
        }
    }

    /// Apply new slider values, pushing the other handle along when they cross.
    pub fn link_handles(previous: YearRange, low: i32, high: i32) -> YearRange {
        if low != previous.low && low > high {
            YearRange { low, high: low }
        } else if high != previous.high && high < low {
            YearRange { low: high, high }
        } else {
            YearRange::new(low, high)
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(5.0);
        ui.heading("Filter by Year");
        ui.add_space(8.0);

        ui.label("Select Year Range:");
        ui.add_space(5.0);

        let (min, max) = self.bounds.unwrap_or((self.range.low, self.range.high));
        let mut low = self.range.low;
        let mut high = self.range.high;

        ui.add_enabled_ui(self.bounds.is_some(), |ui| {
            ui.add(egui::Slider::new(&mut low, min..=max).text("From"));
            ui.add(egui::Slider::new(&mut high, min..=max).text("To"));
        });

        let updated = Self::link_handles(self.range, low, high);
        if updated != self.range {
            self.range = updated;
            action = ControlPanelAction::RangeChanged(updated);
        }

        ui.add_space(5.0);
        ui.label(
            RichText::new(format!("{} – {}", self.range.low, self.range.high))
                .size(13.0)
                .strong(),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        let path_text = self
            .data_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "No file".to_string());
        ui.label(RichText::new(path_text).size(12.0));

        let span = match self.bounds {
            Some((min, max)) => format!("Years {} – {}", min, max),
            None => "No years available".to_string(),
        };
        ui.label(RichText::new(span).size(11.0).color(Color32::GRAY));

        ui.add_space(5.0);
        ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    RangeChanged(YearRange),
}
