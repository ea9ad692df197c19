//! CrickView entry point.
//!
//! Startup sequence:
//! 1. Initialize tracing
//! 2. Load config (optional config.toml, defaults otherwise)
//! 3. Load the delivery dataset - fatal if missing or malformed
//! 4. Hand the immutable dataset to the GUI event loop

use anyhow::Context;
use eframe::egui;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crickview::config::Config;
use crickview::data;
use crickview::gui::CrickViewApp;

fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("CrickView starting up");

    let config =
        Config::load(Path::new("config.toml")).context("failed to load configuration")?;
    info!(
        deliveries = %config.deliveries_path.display(),
        "config loaded"
    );

    let dataset = data::load_dataset(&config).context("failed to load the delivery dataset")?;
    info!(
        deliveries = dataset.delivery_count(),
        matches = dataset.match_count(),
        seasons = dataset.seasons().len(),
        "dataset ready"
    );

    let dataset = Arc::new(dataset);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("CrickView"),
        ..Default::default()
    };

    eframe::run_native(
        "CrickView",
        options,
        Box::new(move |cc| Ok(Box::new(CrickViewApp::new(cc, dataset, config)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crickview=info,warn")),
        )
        .init();
}
