//! Configuration module for Torque Wizard
//!
//! This module handles application configuration including:
//! - Application state persistence (last port/baud, UI preferences)
//! - Runtime settings during execution
//! - Fixed constants shared by the backend and frontend
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.torque-wizard/`
//! - **macOS**: `~/Library/Application Support/dev.torque-wizard/`
//! - **Windows**: `%APPDATA%\dev.torque-wizard\`
//!
//! # Files
//!
//! - `app_state.json` - Last used port/baud and UI preferences

pub mod settings;

pub use settings::RuntimeSettings;

use crate::error::{Result, TorqueError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application identifier for data directories
pub const APP_ID: &str = "dev.torque-wizard";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Device sampling rate in Hz; row index times the period reconstructs
/// timestamps on CSV import
pub const SAMPLING_RATE_HZ: f64 = 80.0;

/// Seconds between consecutive device samples
pub const SAMPLE_PERIOD: f64 = 1.0 / SAMPLING_RATE_HZ;

/// Backend polling rate in Hz (matches the device sampling rate)
pub const POLL_RATE_HZ: u32 = 80;

/// Serial read timeout in milliseconds
pub const READ_TIMEOUT_MS: u64 = 100;

/// Selectable baud rates, slowest first
pub const BAUD_RATES: &[u32] = &[
    600, 1200, 2400, 4800, 9600, 14400, 19200, 28800, 38400, 57600, 115200, 230400,
];

/// Default baud rate
pub const DEFAULT_BAUD: u32 = 115_200;

/// Default calibration reference weight in grams
pub const DEFAULT_CALIBRATION_WEIGHT_G: u32 = 500;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        TorqueError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            TorqueError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

// ==================== App State ====================

/// Persistent application state
///
/// Stores what the user last used so the next session starts where the
/// previous one left off, separate from per-frame runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// Version for future migration support
    #[serde(default = "default_app_state_version")]
    pub version: u32,

    /// Last used serial port path
    #[serde(default)]
    pub last_port: Option<String>,

    /// Last used baud rate
    #[serde(default = "default_baud")]
    pub last_baud: u32,

    /// UI preferences that persist across sessions
    #[serde(default)]
    pub ui_preferences: UiPreferences,
}

fn default_app_state_version() -> u32 {
    1
}

fn default_baud() -> u32 {
    DEFAULT_BAUD
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            last_port: None,
            last_baud: DEFAULT_BAUD,
            ui_preferences: UiPreferences::default(),
        }
    }
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            TorqueError::Config("Could not determine app state path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| TorqueError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| TorqueError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        let path = dir.join(APP_STATE_FILE);

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TorqueError::Config(format!("Failed to serialize app state: {}", e)))?;

        std::fs::write(&path, content)
            .map_err(|e| TorqueError::Config(format!("Failed to write app state: {}", e)))
    }

    /// Remember the last used connection parameters
    pub fn update_last_connection(&mut self, port: Option<&str>, baud: u32) {
        self.last_port = port.map(|s| s.to_string());
        self.last_baud = baud;
    }
}

/// UI preferences that persist across sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Enable dark mode
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Font scale factor
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,

    /// Auto-scroll the serial monitor log
    #[serde(default = "default_true")]
    pub auto_scroll: bool,
}

fn default_true() -> bool {
    true
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_scale: 1.0,
            auto_scroll: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_app_state() {
        let state = AppState::default();
        assert_eq!(state.version, 1);
        assert_eq!(state.last_baud, DEFAULT_BAUD);
        assert!(state.last_port.is_none());
        assert!(state.ui_preferences.auto_scroll);
    }

    #[test]
    fn test_app_state_roundtrip() {
        let mut state = AppState::default();
        state.update_last_connection(Some("/dev/ttyUSB0"), 9600);

        let json = serde_json::to_string(&state).unwrap();
        let restored: AppState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.last_port.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(restored.last_baud, 9600);
    }

    #[test]
    fn test_app_state_parses_missing_fields() {
        // Old state files may lack newer fields; serde defaults fill them in
        let restored: AppState = serde_json::from_str("{}").unwrap();
        assert_eq!(restored.last_baud, DEFAULT_BAUD);
        assert!(restored.ui_preferences.dark_mode);
    }

    #[test]
    fn test_baud_list_contains_default() {
        assert!(BAUD_RATES.contains(&DEFAULT_BAUD));
        assert_eq!(BAUD_RATES.len(), 12);
    }

    #[test]
    fn test_sample_period() {
        assert!((SAMPLE_PERIOD - 0.0125).abs() < 1e-12);
    }
}
