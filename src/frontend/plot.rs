//! Plot rendering helpers
//!
//! Thin wrappers over `egui_plot` shared by the Play and View pages.

use egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::session::ImportedTrace;
use crate::types::SampleWindow;

/// Draw the live window of the most recent samples
pub fn live_plot(ui: &mut Ui, window: &SampleWindow) {
    let points = window.plot_points();

    Plot::new("play_plot")
        .legend(Legend::default())
        .x_axis_label("Time [s]")
        .y_axis_label("Force [N]")
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new("Force", PlotPoints::from(points)));
        });
}

/// Draw a full imported trace with free zoom and pan
pub fn trace_plot(ui: &mut Ui, trace: &ImportedTrace) {
    Plot::new("view_plot")
        .legend(Legend::default())
        .x_axis_label("Time [s]")
        .y_axis_label("Force [N]")
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(
                trace.name.clone(),
                PlotPoints::from(trace.points.clone()),
            ));
        });
}
