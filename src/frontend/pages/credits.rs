//! Credits page

use egui::Ui;

use crate::frontend::pages::Page;
use crate::frontend::state::{AppAction, SharedState};

#[derive(Default)]
pub struct CreditsPageState;

pub struct CreditsPage;

impl Page for CreditsPage {
    type State = CreditsPageState;

    fn render(
        _state: &mut Self::State,
        _shared: &mut SharedState<'_>,
        ui: &mut Ui,
    ) -> Vec<AppAction> {
        ui.heading("Credits");
        ui.separator();

        ui.label("TorqueWizard");
        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
        ui.add_space(12.0);

        ui.group(|ui| {
            ui.label("Software");
            ui.label("Desktop client for ESP32 load-cell force rigs.");
        });
        ui.add_space(8.0);
        ui.group(|ui| {
            ui.label("Hardware");
            ui.label("ESP32 microcontroller with an HX711 load-cell amplifier.");
        });
        ui.add_space(12.0);

        ui.hyperlink_to("egui", "https://github.com/emilk/egui");
        ui.hyperlink_to("serialport-rs", "https://github.com/serialport/serialport-rs");

        Vec::new()
    }
}
