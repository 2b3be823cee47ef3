use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, pie, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: records in view ----
        if let Some(charts) = &self.state.charts {
            egui::TopBottomPanel::bottom("records_panel")
                .resizable(true)
                .default_height(160.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::horizontal().show(ui, |ui| {
                        table::records_table(ui, &charts.scatter);
                    });
                });
        }

        // ---- Central panel: distribution above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("SpaceX Launch Records Dashboard");
            });
            ui.separator();

            let Some(charts) = &self.state.charts else {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a launch records file  (File → Open…)");
                });
                return;
            };

            let half = ui.available_height() * 0.45;
            ui.allocate_ui(egui::vec2(ui.available_width(), half), |ui| {
                pie::distribution_pie(ui, &charts.distribution);
            });
            ui.separator();
            plot::scatter_plot(ui, &charts.scatter, self.state.booster_colors.as_ref());
        });
    }
}
