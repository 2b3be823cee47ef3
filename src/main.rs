mod app;
mod chart;
mod color;
mod config;
mod dashboard;
mod data;
mod error;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use app::LaunchDashApp;
use clap::Parser;
use config::{Cli, Settings};
use data::filter::validate_selector;
use data::model::SiteSelector;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = Settings::resolve(Cli::parse())?;
    let state = initial_state(&settings)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window.width, settings.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}

/// Load the configured dataset, if any. A bad data file is fatal; a bad
/// default site is reported in the UI and ignored.
fn initial_state(settings: &Settings) -> anyhow::Result<AppState> {
    let mut state = AppState::default();
    let Some(path) = &settings.data else {
        return Ok(state);
    };

    let store = data::loader::load_file(path)
        .with_context(|| format!("loading launch records from {}", path.display()))?;
    log::info!(
        "Loaded {} launches from {} with sites {:?}",
        store.len(),
        path.display(),
        store.sites()
    );

    let default_site = settings.default_site.as_deref().map(SiteSelector::parse);
    let rejected = default_site
        .as_ref()
        .and_then(|site| validate_selector(&store, site).err());

    state.set_store(store, path.clone());
    match (default_site, rejected) {
        (_, Some(e)) => {
            log::warn!("ignoring default site: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
        (Some(site), None) => state.set_site(site),
        (None, None) => {}
    }
    Ok(state)
}
