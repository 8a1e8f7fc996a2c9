mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use shared::PressureDocument;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::PersistCommand;
use crate::config::{load_settings, AppPaths, StartupConfig};
use crate::controller::events::UiEvent;
use crate::ui::{AppInit, PressureStudioApp};

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let startup = StartupConfig::parse();
    let paths = AppPaths::from_startup(&startup).context("failed to resolve app paths")?;
    let settings = load_settings(&paths.settings_path);

    init_tracing(&settings.log_filter);
    for warning in &settings.warnings {
        tracing::warn!("{warning}");
    }

    let document_path = paths.document_path(&startup, &settings);
    tracing::info!(
        document = %document_path.display(),
        settings = %paths.settings_path.display(),
        autosave = settings.autosave,
        "starting pressure studio"
    );
    let loaded = PressureDocument::load_or_default(&document_path);

    let (cmd_tx, cmd_rx) = bounded::<PersistCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let worker = backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let app = PressureStudioApp::new(AppInit {
        document_path,
        loaded,
        autosave: settings.autosave,
        cmd_tx,
        ui_rx,
        worker,
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Pressure Studio")
            .with_inner_size([720.0, 820.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Pressure Studio",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow::anyhow!("pressure studio window failed: {err}"))
}
