//! TorqueWizard - Main Entry Point
//!
//! Spawns the serial polling backend on its own thread and runs the
//! eframe UI on the main thread.

use torque_wizard::{frontend::TorqueWizardApp, SerialBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,torque_wizard=trace")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TorqueWizard");

    let (backend, frontend) = SerialBackend::new();
    let backend_handle = std::thread::spawn(move || {
        backend.run();
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 640.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("TorqueWizard"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "TorqueWizard",
        native_options,
        Box::new(|cc| Ok(Box::new(TorqueWizardApp::new(cc, frontend)))),
    );

    tracing::info!("Shutting down...");
    let _ = backend_handle.join();

    result
}
