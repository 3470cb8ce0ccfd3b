//! Shared state types for the frontend
//!
//! Pages receive `SharedState` via borrowing and return `AppAction`s
//! instead of mutating the main app directly.

use std::path::PathBuf;

use crate::backend::FrontendReceiver;
use crate::config::settings::RuntimeSettings;
use crate::config::AppState;
use crate::frontend::notifications::Notifications;
use crate::session::ImportedTrace;
use crate::types::{ConnectionStatus, SampleWindow, SessionRecording};

/// Identifies one of the application's pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageId {
    #[default]
    Menu,
    Play,
    View,
    Calibrate,
    Monitor,
    Credits,
}

impl PageId {
    pub const ALL: [PageId; 6] = [
        PageId::Menu,
        PageId::Play,
        PageId::View,
        PageId::Calibrate,
        PageId::Monitor,
        PageId::Credits,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PageId::Menu => "Main Menu",
            PageId::Play => "Play",
            PageId::View => "View",
            PageId::Calibrate => "Calibrate",
            PageId::Monitor => "Serial Monitor",
            PageId::Credits => "Credits",
        }
    }
}

/// Shared state accessible by all pages (borrowed, not owned)
pub struct SharedState<'a> {
    // Communication
    pub frontend: &'a FrontendReceiver,

    // Configuration (read-write by pages)
    pub settings: &'a mut RuntimeSettings,
    pub app_state: &'a mut AppState,

    // Connection
    pub connection_status: ConnectionStatus,
    pub available_ports: &'a [String],

    // Live data
    pub window: &'a SampleWindow,
    pub recording: &'a SessionRecording,
    pub monitor_log: &'a [String],
    pub view_trace: Option<&'a ImportedTrace>,

    // User feedback
    pub notifications: &'a mut Notifications,
}

/// Cap on retained monitor lines, old entries roll off
pub const MONITOR_LOG_CAPACITY: usize = 2_000;

/// Route one raw device line to the monitor log
///
/// Only the Serial Monitor page consumes raw lines; while any other
/// page is visible the line is discarded unread. The log never grows
/// past [`MONITOR_LOG_CAPACITY`] entries.
pub fn route_raw_line(log: &mut Vec<String>, line: String, current_page: PageId) {
    if current_page != PageId::Monitor {
        return;
    }
    log.push(line);
    if log.len() > MONITOR_LOG_CAPACITY {
        let excess = log.len() - MONITOR_LOG_CAPACITY;
        log.drain(..excess);
    }
}

/// Actions that any page can emit
///
/// Pages return `Vec<AppAction>` instead of mutating state directly,
/// which keeps page logic testable and action handling centralized.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Open the serial port with the given settings
    Connect { port: String, baud: u32 },
    /// Close the serial port
    Disconnect,
    /// Send a text command to the device
    SendCommand(String),
    /// Re-enumerate serial ports
    RefreshPorts,
    /// Limit sample magnitude, `None` disables clamping
    SetClamp(Option<i64>),
    /// Write the current recording to disk
    ExportCsv(PathBuf),
    /// Load a trace from disk into the View page
    ImportCsv(PathBuf),
    /// Clear the serial monitor log
    ClearLog,
    /// Clear the recording and the live window
    ClearRecording,
    /// Navigate to another page
    SwitchPage(PageId),
    /// Open the tutorial dialog
    OpenTutorial,
}
