//! Saved-session viewer page

use egui::Ui;

use crate::frontend::pages::Page;
use crate::frontend::plot::trace_plot;
use crate::frontend::state::{AppAction, SharedState};

#[derive(Default)]
pub struct ViewPageState;

pub struct ViewPage;

impl Page for ViewPage {
    type State = ViewPageState;

    fn render(
        _state: &mut Self::State,
        shared: &mut SharedState<'_>,
        ui: &mut Ui,
    ) -> Vec<AppAction> {
        let mut actions = Vec::new();

        ui.horizontal(|ui| {
            ui.heading("View");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Import CSV").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("CSV", &["csv"])
                        .pick_file()
                    {
                        actions.push(AppAction::ImportCsv(path));
                    }
                }
            });
        });

        match shared.view_trace {
            Some(trace) => {
                ui.label(format!("File: {} ({} samples)", trace.name, trace.len()));
                ui.separator();
                trace_plot(ui, trace);
            }
            None => {
                ui.separator();
                ui.centered_and_justified(|ui| {
                    ui.label("No file loaded. Import a CSV to view a recorded session.");
                });
            }
        }

        actions
    }
}
