//! Calibration page
//!
//! Sends a calibration command with a reference weight to the device.
//! The firmware side of this flow is still being worked out, so the page
//! is labelled as such.

use egui::Ui;

use crate::frontend::pages::Page;
use crate::frontend::state::{AppAction, SharedState};
use crate::types::ConnectionStatus;

#[derive(Default)]
pub struct CalibratePageState;

pub struct CalibratePage;

impl Page for CalibratePage {
    type State = CalibratePageState;

    fn render(
        _state: &mut Self::State,
        shared: &mut SharedState<'_>,
        ui: &mut Ui,
    ) -> Vec<AppAction> {
        let mut actions = Vec::new();

        ui.heading("Calibrate");
        ui.colored_label(ui.visuals().warn_fg_color, "Work in progress");
        ui.separator();

        ui.label("Place a known reference weight on the load cell, then send it to the device:");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Reference weight");
            ui.add(
                egui::DragValue::new(&mut shared.settings.calibration_weight_g)
                    .range(1..=50_000)
                    .suffix(" g"),
            );

            let connected = shared.connection_status == ConnectionStatus::Connected;
            if ui
                .add_enabled(connected, egui::Button::new("Calibrate"))
                .clicked()
            {
                actions.push(AppAction::SendCommand(format!(
                    "cal {}",
                    shared.settings.calibration_weight_g
                )));
            }
            if !connected {
                ui.label("Not connected!");
            }
        });

        actions
    }
}
