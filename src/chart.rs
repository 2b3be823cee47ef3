use serde::Serialize;

use crate::data::aggregate::{count_by_outcome, count_by_site, CategoryKey};
#[cfg(test)]
use crate::data::aggregate::CategoryCount;
use crate::data::filter::{filter_records, validate_range, validate_selector};
use crate::data::model::{LaunchRecord, Outcome, PayloadRange, RecordStore, SiteSelector};
use crate::error::QueryError;

pub const SCATTER_X_LABEL: &str = "Payload Mass (kg)";
pub const SCATTER_Y_LABEL: &str = "Launch Outcome (0 = Failure, 1 = Success)";

// ---------------------------------------------------------------------------
// Declarative chart description handed to the renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Distribution,
    Scatter,
}

/// One wedge of the distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub key: CategoryKey,
    pub count: usize,
}

/// One point of the scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Colour group.
    pub booster_version_category: String,
    pub launch_site: String,
}

impl From<&LaunchRecord> for ScatterPoint {
    fn from(r: &LaunchRecord) -> Self {
        ScatterPoint {
            payload_mass_kg: r.payload_mass_kg,
            outcome: r.outcome,
            booster_version_category: r.booster_version_category.clone(),
            launch_site: r.launch_site.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartData {
    Slices(Vec<Slice>),
    Points(Vec<ScatterPoint>),
}

/// Everything a renderer needs to draw one chart. Built fresh per query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    pub data: ChartData,
}

impl ChartSpec {
    pub fn slices(&self) -> &[Slice] {
        match &self.data {
            ChartData::Slices(s) => s,
            ChartData::Points(_) => &[],
        }
    }

    pub fn points(&self) -> &[ScatterPoint] {
        match &self.data {
            ChartData::Points(p) => p,
            ChartData::Slices(_) => &[],
        }
    }

    /// Category counts as an unordered mapping.
    #[cfg(test)]
    pub fn counts(&self) -> CategoryCount {
        self.slices()
            .iter()
            .map(|s| (s.key.clone(), s.count))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Outcome breakdown. Driven by the site selector only: the payload range
/// never narrows this chart.
pub fn build_distribution_spec(
    selector: &SiteSelector,
    store: &RecordStore,
) -> Result<ChartSpec, QueryError> {
    validate_selector(store, selector)?;

    let counts = match selector.site() {
        None => count_by_site(store.records()),
        Some(site) => count_by_outcome(store.records(), site),
    };
    let slices = counts
        .into_iter()
        .map(|(key, count)| Slice {
            label: key.label(),
            key,
            count,
        })
        .collect();

    Ok(ChartSpec {
        kind: ChartKind::Distribution,
        title: format!("Success vs Failed Launches for {}", title_subject(selector)),
        x_label: None,
        y_label: None,
        data: ChartData::Slices(slices),
    })
}

/// Payload vs outcome for every record inside `range` and the selected site.
pub fn build_scatter_spec(
    selector: &SiteSelector,
    range: &PayloadRange,
    store: &RecordStore,
) -> Result<ChartSpec, QueryError> {
    validate_selector(store, selector)?;
    validate_range(store, range)?;

    let points = filter_records(store, selector, range)
        .into_iter()
        .map(ScatterPoint::from)
        .collect();

    Ok(ChartSpec {
        kind: ChartKind::Scatter,
        title: format!(
            "Scatter Plot of Payload Mass vs. Launch Outcome for {}",
            title_subject(selector)
        ),
        x_label: Some(SCATTER_X_LABEL.to_string()),
        y_label: Some(SCATTER_Y_LABEL.to_string()),
        data: ChartData::Points(points),
    })
}

fn title_subject(selector: &SiteSelector) -> &str {
    match selector {
        SiteSelector::All => "All Sites",
        SiteSelector::Site(site) => site,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(site: &str, mass: f64, class: u8, booster: &str) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: mass,
            outcome: if class == 1 {
                Outcome::Success
            } else {
                Outcome::Failure
            },
            booster_version_category: booster.to_string(),
        }
    }

    fn small_store() -> RecordStore {
        RecordStore::from_records(vec![
            rec("SiteA", 500.0, 0, "v1.0"),
            rec("SiteA", 3000.0, 1, "FT"),
            rec("SiteB", 7000.0, 1, "B5"),
        ])
        .unwrap()
    }

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            rec("CCAFS LC-40", 0.0, 0, "v1.0"),
            rec("CCAFS LC-40", 677.0, 0, "v1.0"),
            rec("CCAFS LC-40", 2296.0, 1, "v1.1"),
            rec("VAFB SLC-4E", 500.0, 0, "v1.1"),
            rec("VAFB SLC-4E", 9600.0, 1, "FT"),
            rec("KSC LC-39A", 2490.0, 1, "FT"),
            rec("KSC LC-39A", 5300.0, 1, "B4"),
            rec("KSC LC-39A", 3310.0, 0, "FT"),
            rec("CCAFS SLC-40", 4707.0, 1, "B5"),
        ])
        .unwrap()
    }

    #[test]
    fn scatter_example_keeps_points_in_range() {
        let store = small_store();
        let spec = build_scatter_spec(
            &SiteSelector::All,
            &PayloadRange::new(500.0, 7000.0),
            &store,
        )
        .unwrap();
        assert_eq!(spec.points().len(), 3);

        let spec = build_scatter_spec(
            &SiteSelector::All,
            &PayloadRange::new(1000.0, 7000.0),
            &store,
        )
        .unwrap();
        let pts: Vec<(f64, u8)> = spec
            .points()
            .iter()
            .map(|p| (p.payload_mass_kg, p.outcome.class()))
            .collect();
        assert_eq!(pts, [(3000.0, 1), (7000.0, 1)]);
        assert_eq!(
            spec.title,
            "Scatter Plot of Payload Mass vs. Launch Outcome for All Sites"
        );
        assert_eq!(spec.kind, ChartKind::Scatter);
        assert_eq!(spec.x_label.as_deref(), Some(SCATTER_X_LABEL));
    }

    #[test]
    fn scatter_for_site_narrows_after_payload() {
        let store = store();
        let site = SiteSelector::Site("KSC LC-39A".to_string());
        let spec = build_scatter_spec(&site, &PayloadRange::new(2490.0, 5300.0), &store).unwrap();

        assert_eq!(spec.points().len(), 3);
        assert!(spec.points().iter().all(|p| p.launch_site == "KSC LC-39A"));
        assert_eq!(
            spec.title,
            "Scatter Plot of Payload Mass vs. Launch Outcome for KSC LC-39A"
        );
    }

    #[test]
    fn distribution_for_all_counts_site_outcome_pairs() {
        let store = store();
        let spec = build_distribution_spec(&SiteSelector::All, &store).unwrap();

        assert_eq!(spec.kind, ChartKind::Distribution);
        assert_eq!(spec.title, "Success vs Failed Launches for All Sites");
        // CCAFS LC-40 x2, VAFB SLC-4E x2, KSC LC-39A x2, CCAFS SLC-40 x1
        assert_eq!(spec.slices().len(), 7);
        assert_eq!(spec.counts().values().sum::<usize>(), store.len());

        let ksc_success = CategoryKey::SiteOutcome {
            site: "KSC LC-39A".to_string(),
            outcome: Outcome::Success,
        };
        assert_eq!(spec.counts().get(&ksc_success), Some(&2));
    }

    #[test]
    fn distribution_for_site_sums_to_site_total() {
        let store = store();
        let spec =
            build_distribution_spec(&SiteSelector::Site("CCAFS LC-40".to_string()), &store).unwrap();

        assert_eq!(spec.title, "Success vs Failed Launches for CCAFS LC-40");
        let counts = spec.counts();
        assert_eq!(counts.get(&CategoryKey::Outcome(Outcome::Failure)), Some(&2));
        assert_eq!(counts.get(&CategoryKey::Outcome(Outcome::Success)), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), 3);
    }

    #[test]
    fn empty_scatter_keeps_true_distribution() {
        let store = store();
        let site = SiteSelector::Site("VAFB SLC-4E".to_string());

        let scatter = build_scatter_spec(&site, &PayloadRange::new(1000.0, 9000.0), &store).unwrap();
        assert!(scatter.points().is_empty());

        let distribution = build_distribution_spec(&site, &store).unwrap();
        assert_eq!(distribution.counts().values().sum::<usize>(), 2);
    }

    #[test]
    fn invalid_parameters_propagate() {
        let store = store();
        assert!(matches!(
            build_scatter_spec(&SiteSelector::All, &PayloadRange::new(6000.0, 1000.0), &store),
            Err(QueryError::InvalidRange { .. })
        ));
        let unknown = SiteSelector::parse("Boca Chica");
        assert_eq!(
            build_distribution_spec(&unknown, &store),
            Err(QueryError::InvalidSelector("Boca Chica".to_string()))
        );
        assert!(matches!(
            build_scatter_spec(&unknown, &store.payload_bounds(), &store),
            Err(QueryError::InvalidSelector(_))
        ));
    }

    #[test]
    fn builders_are_deterministic() {
        let store = store();
        let range = PayloadRange::new(0.0, 5000.0);
        assert_eq!(
            build_scatter_spec(&SiteSelector::All, &range, &store),
            build_scatter_spec(&SiteSelector::All, &range, &store)
        );
        assert_eq!(
            build_distribution_spec(&SiteSelector::All, &store),
            build_distribution_spec(&SiteSelector::All, &store)
        );
    }

    #[test]
    fn spec_serializes_for_external_renderer() {
        let store = small_store();
        let spec = build_scatter_spec(&SiteSelector::All, &store.payload_bounds(), &store).unwrap();
        let json = serde_json::to_value(&spec).unwrap();

        assert_eq!(json["kind"], "scatter");
        assert_eq!(json["data"]["points"][1]["outcome"], 1);
        assert_eq!(json["data"]["points"][1]["booster_version_category"], "FT");

        let spec = build_distribution_spec(&SiteSelector::Site("SiteA".to_string()), &store).unwrap();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["data"]["slices"][0]["key"]["outcome"], 0);
        assert!(json.get("x_label").is_none());
    }
}
