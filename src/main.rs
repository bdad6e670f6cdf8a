//! All-Star Proximity - vote share near division rival counties
//!
//! Joins per-county All-Star votes to Census county centroids, keeps the
//! counties within a fixed radius of each division rival, and charts the
//! mean vote share per candidate.

mod analysis;
mod charts;
mod config;
mod data;
mod geo;
mod gui;
mod stats;

use anyhow::{anyhow, Context, Result};
use charts::StaticChartRenderer;
use config::{AnalysisConfig, CONFIG_PATH};
use eframe::egui;
use gui::AllStarApp;
use std::io;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber; `RUST_LOG` overrides the level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let config = AnalysisConfig::load_or_default(Path::new(CONFIG_PATH))
        .context("Failed to load configuration")?;
    let report = analysis::run(&config).context("Failed to load input data")?;
    let colors = config.candidate_colors();

    if let Some(path) = &config.export_png {
        StaticChartRenderer::render_png(&report, &colors, path)
            .with_context(|| format!("Failed to export {}", path.display()))?;
    }

    info!("Opening chart window");
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([900.0, 500.0])
            .with_title("All-Star Proximity"),
        ..Default::default()
    };

    eframe::run_native(
        "All-Star Proximity",
        options,
        Box::new(move |cc| Ok(Box::new(AllStarApp::new(cc, report, colors)))),
    )
    .map_err(|e| anyhow!("Chart window failed: {e}"))
}
