//! Tutorial dialog, a short walkthrough of every page

use egui::Ui;

use crate::frontend::dialogs::{Dialog, DialogAction, DialogState, DialogWindowConfig};
use crate::frontend::state::PageId;

#[derive(Default)]
pub struct TutorialDialogState;

impl DialogState for TutorialDialogState {}

pub struct TutorialDialog;

fn page_help(page: PageId) -> &'static str {
    match page {
        PageId::Menu => "Pick where to go. Every page is also reachable from the side bar.",
        PageId::Play => {
            "Live force readout. The plot shows the most recent samples; \
             the full session keeps recording in the background and can be \
             saved with \"Record into CSV\"."
        }
        PageId::View => "Load a previously saved CSV and inspect the whole trace.",
        PageId::Calibrate => {
            "Send a reference weight to the device to calibrate the load cell. \
             Still a work in progress."
        }
        PageId::Monitor => {
            "Choose port and baud, flip the Connect switch, watch raw device \
             output and send text commands."
        }
        PageId::Credits => "Who and what made this.",
    }
}

impl Dialog for TutorialDialog {
    type State = TutorialDialogState;
    type Action = ();
    type Context<'a> = ();

    fn title(_state: &Self::State) -> &'static str {
        "Tutorial"
    }

    fn window_config() -> DialogWindowConfig {
        DialogWindowConfig::centered(460.0)
    }

    fn render(
        _state: &mut Self::State,
        _ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        ui.label("Plug in the device over USB, then:");
        ui.add_space(6.0);

        for page in PageId::ALL {
            ui.group(|ui| {
                ui.strong(page.display_name());
                ui.label(page_help(page));
            });
            ui.add_space(4.0);
        }

        ui.add_space(6.0);
        ui.vertical_centered(|ui| {
            if ui.button("Got it").clicked() {
                return DialogAction::Close;
            }
            DialogAction::None
        })
        .inner
    }
}
