use std::path::PathBuf;

use crate::color::ColorMap;
use crate::dashboard::{on_selection_change, selector_options, DashboardCharts, Selection, SelectorOption};
use crate::data::model::{RecordStore, SiteSelector};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub store: Option<RecordStore>,

    /// File the store was loaded from.
    pub source: Option<PathBuf>,

    /// Dropdown entries, built once per store.
    pub options: Vec<SelectorOption>,

    /// Current control values.
    pub selection: Option<Selection>,

    /// Charts for `selection` (cached until a control changes).
    pub charts: Option<DashboardCharts>,

    /// Booster category colours for the scatter chart.
    pub booster_colors: Option<ColorMap>,

    /// Text typed into the site search box.
    pub site_search: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded store and compute the initial charts.
    pub fn set_store(&mut self, store: RecordStore, source: PathBuf) {
        self.options = selector_options(&store);
        self.booster_colors = Some(ColorMap::new(store.booster_categories()));
        self.selection = Some(Selection::initial(&store));
        self.site_search.clear();
        self.store = Some(store);
        self.source = Some(source);
        self.status_message = None;
        self.refresh();
    }

    /// Recompute both charts for the current selection.
    pub fn refresh(&mut self) {
        let (Some(store), Some(selection)) = (&self.store, &self.selection) else {
            return;
        };
        log::debug!(
            "selection changed: site={} payload=[{}, {}]",
            selection.site,
            selection.payload.low,
            selection.payload.high
        );
        match on_selection_change(store, selection) {
            Ok(charts) => {
                self.charts = Some(charts);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("rejected selection: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Change the site dropdown value.
    pub fn set_site(&mut self, site: SiteSelector) {
        if let Some(selection) = &mut self.selection {
            if selection.site != site {
                selection.site = site;
                self.refresh();
            }
        }
    }

    /// Change the payload control, keeping `low <= high` the way a range
    /// slider does: the handle being dragged pushes the other one.
    pub fn set_payload(&mut self, low: f64, high: f64) {
        let Some(selection) = &mut self.selection else {
            return;
        };
        let old = selection.payload;
        let (low, high) = if low > high {
            if low != old.low {
                (low, low)
            } else {
                (high, high)
            }
        } else {
            (low, high)
        };
        if (low, high) != (old.low, old.high) {
            selection.payload.low = low;
            selection.payload.high = high;
            self.refresh();
        }
    }

    /// Restore the full payload range and every site.
    pub fn reset_selection(&mut self) {
        if let Some(store) = &self.store {
            self.selection = Some(Selection::initial(store));
            self.refresh();
        }
    }
}
