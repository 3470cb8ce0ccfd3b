//! Runtime settings that can be modified during application execution
//!
//! This module contains settings that may change during runtime,
//! separate from the persistent configuration. These settings control
//! the current connection selection, the serial monitor display, and
//! the optional value clamp applied by the backend.

use crate::config::{DEFAULT_BAUD, DEFAULT_CALIBRATION_WEIGHT_G};

/// Runtime settings for the application
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    /// Currently selected serial port path
    pub selected_port: Option<String>,

    /// Currently selected baud rate
    pub selected_baud: u32,

    /// Desired state of the connect switch; reverted on connect failure
    pub connect_switch: bool,

    /// Auto-scroll the serial monitor log
    pub auto_scroll: bool,

    /// Whether incoming values are clamped to a symmetric range
    pub clamp_enabled: bool,

    /// Symmetric clamp limit; values outside [-limit, limit] are clamped
    pub clamp_limit: i64,

    /// Calibration reference weight in grams
    pub calibration_weight_g: u32,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            selected_port: None,
            selected_baud: DEFAULT_BAUD,
            connect_switch: false,
            auto_scroll: true,
            clamp_enabled: false,
            clamp_limit: 10_000,
            calibration_weight_g: DEFAULT_CALIBRATION_WEIGHT_G,
        }
    }
}

impl RuntimeSettings {
    /// Create new runtime settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clamp limit, or None when clamping is disabled
    pub fn clamp(&self) -> Option<i64> {
        if self.clamp_enabled {
            Some(self.clamp_limit)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = RuntimeSettings::default();
        assert!(!settings.connect_switch);
        assert!(settings.auto_scroll);
        assert_eq!(settings.selected_baud, DEFAULT_BAUD);
        assert_eq!(settings.calibration_weight_g, 500);
    }

    #[test]
    fn test_clamp_disabled_by_default() {
        let settings = RuntimeSettings::default();
        assert_eq!(settings.clamp(), None);
    }

    #[test]
    fn test_clamp_enabled() {
        let settings = RuntimeSettings {
            clamp_enabled: true,
            clamp_limit: 500,
            ..Default::default()
        };
        assert_eq!(settings.clamp(), Some(500));
    }
}
