//! Townsfolk - a small living pixel town
//!
//! Entry point: logging, settings, the dialogue client and the window.

mod app;
mod settings;
mod ui;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use townsfolk_game::{default_roster, Simulation};
use townsfolk_integration::IntegrationClient;
use townsfolk_render::FrameRenderer;

use crate::app::TownApp;
use crate::settings::GameSettings;

fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting Townsfolk...");

    let settings = GameSettings::load();
    // First run: write the defaults out so they can be edited
    if GameSettings::settings_path().is_some_and(|p| !p.exists()) {
        if let Err(e) = settings.save() {
            warn!("Could not write default settings: {}", e);
        }
    }
    info!("Dialogue endpoint: {}", settings.dialogue.endpoint);

    let client = IntegrationClient::new(&settings.dialogue)
        .context("Failed to create dialogue client")?;
    let simulation = Simulation::new(settings.simulation.clone(), default_roster(), client)
        .context("Failed to create simulation")?;
    let renderer = FrameRenderer::new(settings.day.clone(), settings.simulation.arrival_epsilon);

    let (width, height) = settings.video.resolution();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Townsfolk")
            .with_inner_size([width as f32, height as f32]),
        ..Default::default()
    };

    eframe::run_native(
        "Townsfolk",
        options,
        Box::new(move |_cc| Ok(Box::new(TownApp::new(settings, simulation, renderer)))),
    )
    .map_err(|e| anyhow::anyhow!("Window error: {}", e))?;

    info!("Townsfolk shut down");
    Ok(())
}
