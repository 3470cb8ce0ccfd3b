//! Serial monitor page
//!
//! Port and baud selection, the connection toggle, raw line log and a
//! command input. Changing the port or baud while connected drops the
//! connection rather than silently reopening with new settings.

use egui::Ui;

use crate::config::settings::RuntimeSettings;
use crate::config::BAUD_RATES;
use crate::frontend::notifications::Notifications;
use crate::frontend::pages::Page;
use crate::frontend::state::{AppAction, SharedState};
use crate::types::ConnectionStatus;

#[derive(Default)]
pub struct MonitorPageState {
    pub command_input: String,
}

pub struct MonitorPage;

impl Page for MonitorPage {
    type State = MonitorPageState;

    fn render(
        state: &mut Self::State,
        shared: &mut SharedState<'_>,
        ui: &mut Ui,
    ) -> Vec<AppAction> {
        let mut actions = Vec::new();

        ui.heading("Serial Monitor");
        ui.separator();

        actions.extend(render_connection_row(state, shared, ui));
        ui.separator();
        actions.extend(render_command_row(state, shared, ui));
        ui.separator();
        render_log(shared, ui, &mut actions);

        actions
    }
}

fn render_connection_row(
    _state: &mut MonitorPageState,
    shared: &mut SharedState<'_>,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let mut actions = Vec::new();
    let ports = shared.available_ports;
    let previous_port = shared.settings.selected_port.clone();
    let previous_baud = shared.settings.selected_baud;

    ui.horizontal(|ui| {
        ui.label("Port");
        egui::ComboBox::from_id_salt("port_select")
            .selected_text(
                shared
                    .settings
                    .selected_port
                    .as_deref()
                    .unwrap_or("select..."),
            )
            .show_ui(ui, |ui| {
                for port in ports {
                    ui.selectable_value(
                        &mut shared.settings.selected_port,
                        Some(port.clone()),
                        port,
                    );
                }
            });

        if ui.button("⟳").on_hover_text("Refresh port list").clicked() {
            actions.push(AppAction::RefreshPorts);
        }

        ui.label("Baud");
        egui::ComboBox::from_id_salt("baud_select")
            .selected_text(shared.settings.selected_baud.to_string())
            .show_ui(ui, |ui| {
                for &baud in BAUD_RATES {
                    ui.selectable_value(
                        &mut shared.settings.selected_baud,
                        baud,
                        baud.to_string(),
                    );
                }
            });

        let changed = shared.settings.selected_port != previous_port
            || shared.settings.selected_baud != previous_baud;
        if changed && shared.settings.connect_switch {
            actions.extend(reset_connection(shared.settings, shared.notifications));
        }

        let toggled = ui
            .toggle_value(&mut shared.settings.connect_switch, "Connect")
            .changed();
        if toggled {
            if shared.settings.connect_switch {
                match shared.settings.selected_port.clone() {
                    Some(port) => actions.push(AppAction::Connect {
                        port,
                        baud: shared.settings.selected_baud,
                    }),
                    None => {
                        shared.settings.connect_switch = false;
                        shared.notifications.warning("Select a port first");
                    }
                }
            } else {
                actions.push(AppAction::Disconnect);
            }
        }

        ui.label(shared.connection_status.to_string());
    });

    actions
}

fn render_command_row(
    state: &mut MonitorPageState,
    shared: &mut SharedState<'_>,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.label("Command");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.command_input)
                .hint_text("text to send")
                .desired_width(240.0),
        );
        let submitted =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if (ui.button("Send").clicked() || submitted) && !state.command_input.is_empty() {
            if shared.connection_status == ConnectionStatus::Connected {
                actions.push(AppAction::SendCommand(std::mem::take(
                    &mut state.command_input,
                )));
            } else {
                shared.notifications.warning("Not connected!");
            }
        }

        ui.checkbox(&mut shared.settings.auto_scroll, "Auto-scroll");
        if ui.button("Clear").clicked() {
            actions.push(AppAction::ClearLog);
        }
    });

    actions
}

fn render_log(shared: &SharedState<'_>, ui: &mut Ui, _actions: &mut Vec<AppAction>) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(shared.settings.auto_scroll)
        .show(ui, |ui| {
            for line in shared.monitor_log {
                ui.monospace(line);
            }
        });
}

/// Drop the connection after a port or baud change
///
/// The device keeps streaming with the old settings otherwise, which
/// produces garbage. The switch goes off and the user is told why.
pub fn reset_connection(
    settings: &mut RuntimeSettings,
    notifications: &mut Notifications,
) -> Vec<AppAction> {
    settings.connect_switch = false;
    notifications.info("Connection lost due to change in baud/port");
    vec![AppAction::Disconnect]
}
