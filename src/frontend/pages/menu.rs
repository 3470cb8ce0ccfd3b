//! Main menu page

use egui::{Color32, RichText, Ui};

use crate::frontend::pages::Page;
use crate::frontend::state::{AppAction, PageId, SharedState};

/// Rainbow palette for the title letters
const TITLE_COLORS: [Color32; 7] = [
    Color32::from_rgb(230, 60, 60),
    Color32::from_rgb(240, 140, 40),
    Color32::from_rgb(240, 210, 50),
    Color32::from_rgb(80, 200, 100),
    Color32::from_rgb(60, 160, 240),
    Color32::from_rgb(120, 90, 230),
    Color32::from_rgb(200, 80, 200),
];

#[derive(Default)]
pub struct MenuPageState;

pub struct MenuPage;

impl Page for MenuPage {
    type State = MenuPageState;

    fn render(
        _state: &mut Self::State,
        _shared: &mut SharedState<'_>,
        ui: &mut Ui,
    ) -> Vec<AppAction> {
        let mut actions = Vec::new();

        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                // center the title by padding with the remaining width
                let title = "TorqueWizard";
                let approx_width = title.len() as f32 * 22.0;
                ui.add_space((ui.available_width() - approx_width).max(0.0) / 2.0);
                for (i, letter) in title.chars().enumerate() {
                    ui.label(
                        RichText::new(letter)
                            .size(36.0)
                            .strong()
                            .color(TITLE_COLORS[i % TITLE_COLORS.len()]),
                    );
                }
            });
            ui.add_space(8.0);
            ui.label("Force measurement for ESP32 load-cell rigs");
            ui.add_space(30.0);

            for page in [PageId::Play, PageId::View, PageId::Calibrate, PageId::Monitor, PageId::Credits] {
                if ui
                    .add_sized([220.0, 36.0], egui::Button::new(page.display_name()))
                    .clicked()
                {
                    actions.push(AppAction::SwitchPage(page));
                }
                ui.add_space(6.0);
            }

            ui.add_space(12.0);
            if ui.add_sized([220.0, 28.0], egui::Button::new("Tutorial")).clicked() {
                actions.push(AppAction::OpenTutorial);
            }
        });

        actions
    }
}
