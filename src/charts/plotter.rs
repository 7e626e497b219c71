//! Chart Plotter Module
//! Creates the interactive year-series line charts using egui_plot.

use crate::data::{CombinedRecord, FuelType, YearRange};
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};

/// CO₂ series colour
pub const CO2_COLOR: Color32 = Color32::from_rgb(214, 39, 40); // Red

/// Fuel series colours (matplotlib default cycle)
pub const PALETTE: [Color32; 5] = [
    Color32::from_rgb(31, 119, 180),  // Blue
    Color32::from_rgb(255, 127, 14),  // Orange
    Color32::from_rgb(44, 160, 44),   // Green
    Color32::from_rgb(214, 39, 40),   // Red
    Color32::from_rgb(148, 103, 189), // Purple
];

const CHART_HEIGHT: f32 = 360.0;
const MARKER_RADIUS: f32 = 4.0;

/// One named line of `[year, value]` points.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

/// Axis labels and identity for one chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec<'a> {
    pub id: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

pub const FUEL_CHART: ChartSpec<'static> = ChartSpec {
    id: "fuel_registrations",
    x_label: "Year",
    y_label: "Number of Cars (in thousands)",
};

pub const CO2_CHART: ChartSpec<'static> = ChartSpec {
    id: "co2_emissions",
    x_label: "Year",
    y_label: "CO₂ Emissions (mil. tonnes)",
};

/// Builds plot series from combined records and draws them.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for a fuel type.
    pub fn fuel_color(fuel: FuelType) -> Color32 {
        PALETTE[fuel.index() % PALETTE.len()]
    }

    /// One series per fuel type, in sheet column order.
    pub fn fuel_series(records: &[CombinedRecord]) -> Vec<ChartSeries> {
        FuelType::ALL
            .iter()
            .map(|&fuel| ChartSeries {
                name: fuel.column_name().to_string(),
                color: Self::fuel_color(fuel),
                points: records
                    .iter()
                    .map(|r| [r.year as f64, r.counts.get(fuel)])
                    .collect(),
            })
            .collect()
    }

    /// Single CO₂ series.
    pub fn co2_series(records: &[CombinedRecord]) -> ChartSeries {
        ChartSeries {
            name: "CO₂ Emissions".to_string(),
            color: CO2_COLOR,
            points: records.iter().map(|r| [r.year as f64, r.co2_mt]).collect(),
        }
    }

    /// Draw a line chart with circular markers and a legend.
    ///
    /// The x axis always spans `range`, so an empty series list still renders axes.
    pub fn draw_line_chart(
        ui: &mut egui::Ui,
        spec: ChartSpec<'_>,
        series: &[ChartSeries],
        range: YearRange,
    ) {
        let has_points = series.iter().any(|s| !s.points.is_empty());

        Plot::new(spec.id)
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label(spec.x_label)
            .y_axis_label(spec.y_label)
            .allow_scroll(false)
            .include_x(range.low as f64)
            .include_x(range.high as f64)
            .include_y(0.0)
            // Years only, no fractional ticks
            .x_axis_formatter(|mark, _range| {
                if mark.value.fract() == 0.0 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for s in series {
                    if s.points.is_empty() {
                        continue;
                    }
                    plot_ui.line(
                        Line::new(PlotPoints::new(s.points.clone()))
                            .color(s.color)
                            .width(2.0)
                            .name(&s.name),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::new(s.points.clone()))
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(MARKER_RADIUS)
                            .color(s.color)
                            .name(&s.name),
                    );
                }
            });

        if !has_points {
            ui.label(
                RichText::new("No data in selected range")
                    .size(12.0)
                    .color(Color32::GRAY),
            );
        }
    }
}
