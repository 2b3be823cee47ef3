//! Entry point the presentation shell calls whenever a control changes.
//!
//! ```text
//!  site dropdown ─┐
//!                 ├─▶ on_selection_change ─▶ DashboardCharts { distribution, scatter }
//!  payload range ─┘
//! ```

use serde::Serialize;

use crate::chart::{build_distribution_spec, build_scatter_spec, ChartSpec};
use crate::data::model::{PayloadRange, RecordStore, SiteSelector};
use crate::error::QueryError;

/// Fixed display domain of the payload control, in kg.
pub const PAYLOAD_DISPLAY_MIN: f64 = 0.0;
pub const PAYLOAD_DISPLAY_MAX: f64 = 10_000.0;
/// Spacing of the payload tick marks.
pub const PAYLOAD_MARK_STEP: f64 = 1_000.0;

/// Current values of both dashboard controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub site: SiteSelector,
    pub payload: PayloadRange,
}

impl Selection {
    /// Start-up state: every site, full payload range.
    pub fn initial(store: &RecordStore) -> Self {
        Selection {
            site: SiteSelector::All,
            payload: store.payload_bounds(),
        }
    }
}

/// Both charts for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub distribution: ChartSpec,
    pub scatter: ChartSpec,
}

/// Recompute both charts for `selection`. Errors go straight back to the
/// caller; nothing is logged or retried here.
pub fn on_selection_change(
    store: &RecordStore,
    selection: &Selection,
) -> Result<DashboardCharts, QueryError> {
    Ok(DashboardCharts {
        distribution: build_distribution_spec(&selection.site, store)?,
        scatter: build_scatter_spec(&selection.site, &selection.payload, store)?,
    })
}

/// An entry of the site dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorOption {
    pub label: String,
    pub value: SiteSelector,
}

/// `ALL` first, then every site in first-seen order.
pub fn selector_options(store: &RecordStore) -> Vec<SelectorOption> {
    std::iter::once(SiteSelector::All)
        .chain(store.sites().iter().cloned().map(SiteSelector::Site))
        .map(|value| SelectorOption {
            label: value.label().to_string(),
            value,
        })
        .collect()
}

/// Options whose label contains `query`, case-insensitively.
pub fn search_options<'a>(options: &'a [SelectorOption], query: &str) -> Vec<&'a SelectorOption> {
    let query = query.trim().to_lowercase();
    options
        .iter()
        .filter(|o| query.is_empty() || o.label.to_lowercase().contains(&query))
        .collect()
}

/// Tick positions 0, 1000, …, 10000.
pub fn payload_marks() -> Vec<f64> {
    let n = ((PAYLOAD_DISPLAY_MAX - PAYLOAD_DISPLAY_MIN) / PAYLOAD_MARK_STEP).round() as usize;
    (0..=n)
        .map(|i| PAYLOAD_DISPLAY_MIN + i as f64 * PAYLOAD_MARK_STEP)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn store() -> RecordStore {
        let rows = [
            ("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            ("VAFB SLC-4E", 500.0, Outcome::Failure, "v1.1"),
            ("KSC LC-39A", 5300.0, Outcome::Success, "B4"),
            ("CCAFS LC-40", 2296.0, Outcome::Success, "v1.1"),
            ("CCAFS SLC-40", 4707.0, Outcome::Success, "B5"),
        ];
        RecordStore::from_records(
            rows.iter()
                .map(|&(site, mass, outcome, booster)| LaunchRecord {
                    launch_site: site.to_string(),
                    payload_mass_kg: mass,
                    outcome,
                    booster_version_category: booster.to_string(),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn initial_selection_shows_everything() {
        let store = store();
        let charts = on_selection_change(&store, &Selection::initial(&store)).unwrap();
        assert_eq!(charts.scatter.points().len(), store.len());
        assert_eq!(
            charts.distribution.counts().values().sum::<usize>(),
            store.len()
        );
    }

    #[test]
    fn payload_range_does_not_narrow_distribution() {
        let store = store();
        let wide = on_selection_change(&store, &Selection::initial(&store)).unwrap();
        let narrow = on_selection_change(
            &store,
            &Selection {
                site: SiteSelector::All,
                payload: PayloadRange::new(4000.0, 5000.0),
            },
        )
        .unwrap();

        assert_eq!(wide.distribution, narrow.distribution);
        assert_eq!(narrow.scatter.points().len(), 1);
    }

    #[test]
    fn bad_selection_is_an_error() {
        let store = store();
        let err = on_selection_change(
            &store,
            &Selection {
                site: SiteSelector::All,
                payload: PayloadRange::new(6000.0, 1000.0),
            },
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::InvalidRange { .. }));
    }

    #[test]
    fn options_start_with_all_then_first_seen_sites() {
        let store = store();
        let labels: Vec<String> = selector_options(&store)
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(
            labels,
            ["All Sites", "CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
    }

    #[test]
    fn option_search_is_case_insensitive() {
        let store = store();
        let options = selector_options(&store);
        let hits: Vec<&str> = search_options(&options, "ccafs")
            .into_iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(hits, ["CCAFS LC-40", "CCAFS SLC-40"]);
        assert_eq!(search_options(&options, "  ").len(), options.len());
    }

    #[test]
    fn marks_cover_display_domain() {
        let marks = payload_marks();
        assert_eq!(marks.len(), 11);
        assert_eq!(marks.first(), Some(&0.0));
        assert_eq!(marks.last(), Some(&10_000.0));
    }
}
