//! Page modules for the frontend
//!
//! Each page implements the Page trait, receiving shared state via
//! borrowing and returning actions instead of mutating directly. Pages
//! don't know about each other; action handling is centralized in the
//! main app.

mod calibrate;
mod credits;
mod menu;
mod monitor;
mod play;
mod view;

pub use calibrate::{CalibratePage, CalibratePageState};
pub use credits::{CreditsPage, CreditsPageState};
pub use menu::{MenuPage, MenuPageState};
pub use monitor::{MonitorPage, MonitorPageState};
pub use play::{PlayPage, PlayPageState};
pub use view::{ViewPage, ViewPageState};

use crate::frontend::state::{AppAction, SharedState};
use egui::Ui;

/// Trait for page components
///
/// Pages receive shared state via `SharedState` and return actions
/// instead of mutating the main app directly.
pub trait Page {
    /// Page-specific UI state, owned by the main app and persistent
    /// across frames
    type State: Default;

    /// Render the page into the central panel and return any actions
    /// to perform. Actions are processed after rendering finishes.
    fn render(
        state: &mut Self::State,
        shared: &mut SharedState<'_>,
        ui: &mut Ui,
    ) -> Vec<AppAction>;
}
