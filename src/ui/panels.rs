use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Slider, TextEdit, Ui};

use crate::dashboard::{search_options, DashboardCharts};
use crate::data::loader::load_file;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – site dropdown and payload range
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let (min, max, total) = match &state.store {
        Some(store) => (store.min_payload_kg(), store.max_payload_kg(), store.len()),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };
    let Some(selection) = state.selection.clone() else {
        return;
    };

    // ---- Site dropdown (searchable) ----
    ui.strong("Launch Site");
    let mut picked = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selection.site.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                TextEdit::singleline(&mut state.site_search)
                    .hint_text("Select a Launch Site here"),
            );
            for opt in search_options(&state.options, &state.site_search) {
                if ui
                    .selectable_label(opt.value == selection.site, &opt.label)
                    .clicked()
                {
                    picked = Some(opt.value.clone());
                }
            }
        });
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let mut low = selection.payload.low;
    let mut high = selection.payload.high;
    let low_changed = ui
        .add(Slider::new(&mut low, min..=max).text("from"))
        .changed();
    let high_changed = ui
        .add(Slider::new(&mut high, min..=max).text("to"))
        .changed();
    ui.separator();

    if ui.button("Reset").clicked() {
        state.reset_selection();
    } else {
        if let Some(site) = picked {
            state.set_site(site);
        }
        if low_changed || high_changed {
            state.set_payload(low, high);
        }
    }

    if let Some(charts) = &state.charts {
        ui.label(format!(
            "{} of {total} launches in view",
            charts.scatter.points().len()
        ));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.charts.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export charts…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(store), Some(source)) = (&state.store, &state.source) {
            ui.label(format!(
                "{}: {} launches from {} sites",
                source.display(),
                store.len(),
                store.sites().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match load_file(&path) {
            Ok(store) => {
                log::info!(
                    "Loaded {} launches from {} with sites {:?}",
                    store.len(),
                    path.display(),
                    store.sites()
                );
                state.set_store(store, path);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

fn export_dialog(state: &mut AppState) {
    let Some(charts) = &state.charts else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export chart specifications")
        .add_filter("JSON", &["json"])
        .set_file_name("charts.json")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = export_charts(&path, charts) {
            log::error!("{e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        } else {
            log::info!("Exported charts to {}", path.display());
        }
    }
}

/// Write both chart specs as pretty JSON.
pub fn export_charts(path: &Path, charts: &DashboardCharts) -> Result<()> {
    let json = serde_json::to_string_pretty(charts).context("serializing charts")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{on_selection_change, Selection};
    use crate::data::loader::read_csv;
    use crate::data::model::RecordStore;

    #[test]
    fn exported_file_holds_both_charts() {
        let records = read_csv(
            "Launch Site,Payload Mass (kg),class,Booster Version Category\n\
             KSC LC-39A,2490,1,FT\nCCAFS LC-40,0,0,v1.0\n"
                .as_bytes(),
        )
        .unwrap();
        let store = RecordStore::from_records(records).unwrap();
        let charts = on_selection_change(&store, &Selection::initial(&store)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.json");
        export_charts(&path, &charts).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["distribution"]["kind"], "distribution");
        assert_eq!(json["scatter"]["data"]["points"].as_array().unwrap().len(), 2);
    }
}
