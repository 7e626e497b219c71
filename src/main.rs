//! Emissions Dashboard - UK car registrations and CO₂ emissions viewer
//!
//! Loads the statistics spreadsheet once at startup and shows it in a native window.

use anyhow::{Context, Result};
use eframe::egui;
use emissions_dashboard::config::DashboardConfig;
use emissions_dashboard::data::DatasetCache;
use emissions_dashboard::gui::DashboardApp;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = DashboardConfig::default();

    // Load failures are fatal: no window without data
    let dataset = DatasetCache::global(&config)
        .get_or_load()
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    info!(years = dataset.len(), "starting dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title("Car Registrations & CO₂ Emissions"),
        ..Default::default()
    };

    eframe::run_native(
        "Emissions Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, dataset, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {}", e))
}
