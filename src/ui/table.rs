use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::chart::ChartSpec;

const ROW_HEIGHT: f32 = 18.0;

/// Rows behind the scatter chart.
pub fn records_table(ui: &mut Ui, spec: &ChartSpec) {
    let points = spec.points();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Launch Site", "Payload Mass (kg)", "Outcome", "Booster"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, points.len(), |mut row| {
                let p = &points[row.index()];
                row.col(|ui| {
                    ui.label(&p.launch_site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", p.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(p.outcome.to_string());
                });
                row.col(|ui| {
                    ui.label(&p.booster_version_category);
                });
            });
        });
}
