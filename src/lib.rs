//! # TorqueWizard
//!
//! Desktop client for ESP32 load-cell force rigs. The device streams one
//! integer force reading per line over USB serial; this application plots
//! the live readings, records full sessions and saves them as CSV.
//!
//! ## Architecture
//!
//! - **Backend**: Polls the serial port on a dedicated thread via
//!   `serialport` and parses each line into a sample
//! - **Frontend**: Renders the UI using eframe/egui with egui_plot for
//!   the live and imported traces
//! - **Communication**: Crossbeam channels for thread-safe data transfer
//!
//! ## Configuration
//!
//! Application state (last connection, preferences) is stored in the
//! platform-appropriate data directory under `dev.torque-wizard`:
//!
//! - **Linux**: `~/.local/share/dev.torque-wizard/`
//! - **macOS**: `~/Library/Application Support/dev.torque-wizard/`
//! - **Windows**: `%APPDATA%\dev.torque-wizard\`

pub mod backend;
pub mod config;
pub mod error;
pub mod frontend;
pub mod session;
pub mod types;

pub use backend::{FrontendReceiver, SerialBackend};
pub use error::{Result, TorqueError};
pub use frontend::TorqueWizardApp;
