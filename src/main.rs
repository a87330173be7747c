//! Entry point for the factory QC dashboard.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use eframe::egui;
use factory_qc::config::{self, DashboardConfig};
use factory_qc::egui_app::controller::EguiController;
use factory_qc::egui_app::ui::EguiApp;
use factory_qc::logging;

const MIN_VIEWPORT_SIZE: [f32; 2] = [960.0, 640.0];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Resolve before any thread exists.
    logging::local_offset();
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = load_config();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 900.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_drag_and_drop(true);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Factory QC",
        native_options,
        Box::new(move |_cc| {
            let controller = EguiController::with_http_backend(config)?;
            Ok(Box::new(EguiApp::new(controller)))
        }),
    )?;
    Ok(())
}

/// Config file plus environment overrides, or defaults when either is unusable.
fn load_config() -> DashboardConfig {
    config::load_or_default().unwrap_or_else(|err| {
        tracing::warn!("Using default configuration: {err}");
        DashboardConfig::default()
    })
}
