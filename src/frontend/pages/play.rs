//! Live measurement page
//!
//! Shows the rolling window of recent samples and lets the user save the
//! full recording to CSV.

use egui::Ui;

use crate::frontend::pages::Page;
use crate::frontend::plot::live_plot;
use crate::frontend::state::{AppAction, SharedState};
use crate::types::ConnectionStatus;

#[derive(Default)]
pub struct PlayPageState;

pub struct PlayPage;

impl Page for PlayPage {
    type State = PlayPageState;

    fn render(
        _state: &mut Self::State,
        shared: &mut SharedState<'_>,
        ui: &mut Ui,
    ) -> Vec<AppAction> {
        let mut actions = Vec::new();

        ui.horizontal(|ui| {
            ui.heading("Play");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let can_export = !shared.recording.is_empty();
                if ui
                    .add_enabled(can_export, egui::Button::new("Record into CSV"))
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .set_file_name(default_export_name())
                        .add_filter("CSV", &["csv"])
                        .save_file()
                    {
                        actions.push(AppAction::ExportCsv(path));
                    }
                }
                if ui
                    .add_enabled(can_export, egui::Button::new("Clear"))
                    .clicked()
                {
                    actions.push(AppAction::ClearRecording);
                }
            });
        });

        if shared.connection_status != ConnectionStatus::Connected {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                "Not connected. Open a port in the Serial Monitor.",
            );
        }

        ui.horizontal(|ui| {
            ui.label(format!("{} samples recorded", shared.recording.len()));
            ui.separator();

            let mut clamp_changed = ui
                .checkbox(&mut shared.settings.clamp_enabled, "Clamp")
                .changed();
            if shared.settings.clamp_enabled {
                clamp_changed |= ui
                    .add(
                        egui::DragValue::new(&mut shared.settings.clamp_limit)
                            .range(1..=1_000_000)
                            .prefix("±"),
                    )
                    .changed();
            }
            if clamp_changed {
                actions.push(AppAction::SetClamp(shared.settings.clamp()));
            }
        });
        ui.separator();

        live_plot(ui, shared.window);

        actions
    }
}

/// Timestamped default filename for exports
fn default_export_name() -> String {
    format!("torque_{}.csv", chrono::Local::now().format("%Y-%m-%d_%H-%M-%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_export_name_has_csv_extension() {
        let name = default_export_name();
        assert!(name.starts_with("torque_"));
        assert!(name.ends_with(".csv"));
    }
}
