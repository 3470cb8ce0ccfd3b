//! Frontend application
//!
//! The eframe application that owns all UI state, drains the backend
//! message channel each frame and dispatches page actions.

pub mod dialogs;
pub mod notifications;
pub mod pages;
pub mod plot;
pub mod state;

use egui::Color32;

use crate::backend::{BackendMessage, FrontendReceiver};
use crate::config::settings::RuntimeSettings;
use crate::config::AppState;
use crate::error::TorqueError;
use crate::frontend::dialogs::{show_dialog, TutorialDialog, TutorialDialogState};
use crate::frontend::notifications::Notifications;
use crate::frontend::pages::{
    CalibratePage, CalibratePageState, CreditsPage, CreditsPageState, MenuPage, MenuPageState,
    MonitorPage, MonitorPageState, Page, PlayPage, PlayPageState, ViewPage, ViewPageState,
};
use crate::frontend::state::{route_raw_line, AppAction, PageId, SharedState};
use crate::session::{self, ImportedTrace};
use crate::types::{ConnectionStatus, SampleWindow, SessionRecording};

pub struct TorqueWizardApp {
    frontend: FrontendReceiver,

    settings: RuntimeSettings,
    app_state: AppState,

    connection_status: ConnectionStatus,
    available_ports: Vec<String>,

    window: SampleWindow,
    recording: SessionRecording,
    monitor_log: Vec<String>,
    view_trace: Option<ImportedTrace>,

    notifications: Notifications,

    current_page: PageId,
    menu_state: MenuPageState,
    play_state: PlayPageState,
    view_state: ViewPageState,
    calibrate_state: CalibratePageState,
    monitor_state: MonitorPageState,
    credits_state: CreditsPageState,

    tutorial_open: bool,
    tutorial_state: TutorialDialogState,
}

impl TorqueWizardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, frontend: FrontendReceiver) -> Self {
        let app_state = AppState::load_or_default();

        if app_state.ui_preferences.dark_mode {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
        } else {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
        }
        cc.egui_ctx
            .set_zoom_factor(app_state.ui_preferences.font_scale);

        let mut settings = RuntimeSettings::default();
        settings.selected_port = app_state.last_port.clone();
        settings.selected_baud = app_state.last_baud;
        settings.auto_scroll = app_state.ui_preferences.auto_scroll;

        Self {
            frontend,
            settings,
            app_state,
            connection_status: ConnectionStatus::Disconnected,
            available_ports: Vec::new(),
            window: SampleWindow::default(),
            recording: SessionRecording::default(),
            monitor_log: Vec::new(),
            view_trace: None,
            notifications: Notifications::new(),
            current_page: PageId::Menu,
            menu_state: MenuPageState::default(),
            play_state: PlayPageState::default(),
            view_state: ViewPageState::default(),
            calibrate_state: CalibratePageState::default(),
            monitor_state: MonitorPageState::default(),
            credits_state: CreditsPageState::default(),
            tutorial_open: false,
            tutorial_state: TutorialDialogState::default(),
        }
    }

    /// Drain the backend channel. Returns whether anything arrived.
    fn process_backend_messages(&mut self) -> bool {
        let messages = self.frontend.drain_messages();
        let had_messages = !messages.is_empty();

        for message in messages {
            match message {
                BackendMessage::ConnectionStatus(status) => {
                    if status == ConnectionStatus::Connected
                        && self.connection_status != ConnectionStatus::Connected
                    {
                        let port = self.settings.selected_port.as_deref().unwrap_or("?");
                        self.notifications.success(format!("Connected to {}", port));
                    }
                    self.connection_status = status;
                }
                BackendMessage::ConnectionError(text) => {
                    // the worker follows up with a ConnectionStatus message
                    self.settings.connect_switch = false;
                    self.notifications.error(text);
                }
                BackendMessage::Sample(sample) => {
                    self.window.push(sample);
                    self.recording.push(sample);
                }
                BackendMessage::RawLine(line) => {
                    route_raw_line(&mut self.monitor_log, line, self.current_page);
                }
                BackendMessage::PortList(ports) => {
                    self.available_ports = ports;
                }
                BackendMessage::SendError(text) => {
                    self.notifications.warning(text);
                }
                BackendMessage::Shutdown => {}
            }
        }

        had_messages
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Connect { port, baud } => {
                self.frontend.connect(port, baud);
            }
            AppAction::Disconnect => {
                self.frontend.disconnect();
            }
            AppAction::SendCommand(text) => {
                self.frontend.send_device_command(text);
            }
            AppAction::RefreshPorts => {
                self.frontend.refresh_ports();
            }
            AppAction::SetClamp(limit) => {
                self.frontend.set_clamp(limit);
            }
            AppAction::ExportCsv(path) => {
                match session::export_csv(&path, &self.recording.values()) {
                    Ok(()) => self
                        .notifications
                        .success(format!("Saved {}", path.display())),
                    Err(err) => self.notify_error(err),
                }
            }
            AppAction::ImportCsv(path) => match session::import_csv(&path) {
                Ok(trace) => {
                    self.notifications
                        .success(format!("Loaded {} samples", trace.len()));
                    self.view_trace = Some(trace);
                }
                Err(err) => self.notify_error(err),
            },
            AppAction::ClearLog => {
                self.monitor_log.clear();
            }
            AppAction::ClearRecording => {
                self.recording.clear();
                self.window.clear();
            }
            AppAction::SwitchPage(page) => {
                self.current_page = page;
            }
            AppAction::OpenTutorial => {
                self.tutorial_open = true;
            }
        }
    }

    fn notify_error(&mut self, err: TorqueError) {
        self.notifications.error(err.to_string());
    }

    fn render_current_page(&mut self, ui: &mut egui::Ui) -> Vec<AppAction> {
        let mut shared = SharedState {
            frontend: &self.frontend,
            settings: &mut self.settings,
            app_state: &mut self.app_state,
            connection_status: self.connection_status,
            available_ports: &self.available_ports,
            window: &self.window,
            recording: &self.recording,
            monitor_log: &self.monitor_log,
            view_trace: self.view_trace.as_ref(),
            notifications: &mut self.notifications,
        };

        match self.current_page {
            PageId::Menu => MenuPage::render(&mut self.menu_state, &mut shared, ui),
            PageId::Play => PlayPage::render(&mut self.play_state, &mut shared, ui),
            PageId::View => ViewPage::render(&mut self.view_state, &mut shared, ui),
            PageId::Calibrate => CalibratePage::render(&mut self.calibrate_state, &mut shared, ui),
            PageId::Monitor => MonitorPage::render(&mut self.monitor_state, &mut shared, ui),
            PageId::Credits => CreditsPage::render(&mut self.credits_state, &mut shared, ui),
        }
    }
}

impl eframe::App for TorqueWizardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_messages = self.process_backend_messages();

        if self.connection_status == ConnectionStatus::Connected || had_messages {
            ctx.request_repaint();
        }

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.label("TorqueWizard");
                if ui.button("?").on_hover_text("Tutorial").clicked() {
                    actions.push(AppAction::OpenTutorial);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let (color, text) = match self.connection_status {
                        ConnectionStatus::Connected => (Color32::GREEN, "Connected"),
                        ConnectionStatus::Disconnected => (Color32::GRAY, "Disconnected"),
                        ConnectionStatus::Error => (Color32::RED, "Error"),
                    };
                    ui.colored_label(color, text);
                });
            });
        });

        egui::SidePanel::left("nav")
            .resizable(false)
            .default_width(140.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                for page in PageId::ALL {
                    if ui
                        .selectable_label(self.current_page == page, page.display_name())
                        .clicked()
                    {
                        actions.push(AppAction::SwitchPage(page));
                    }
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            actions.extend(self.render_current_page(ui));
        });

        show_dialog::<TutorialDialog>(ctx, &mut self.tutorial_open, &mut self.tutorial_state, ());

        for action in actions {
            self.handle_action(action);
        }

        self.notifications.show(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.frontend.shutdown();

        self.app_state.update_last_connection(
            self.settings.selected_port.as_deref(),
            self.settings.selected_baud,
        );
        self.app_state.ui_preferences.auto_scroll = self.settings.auto_scroll;

        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
    }
}
