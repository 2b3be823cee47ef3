use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Outcome – the binary launch class
// ---------------------------------------------------------------------------

/// Launch outcome. Serialized as the dataset's `class` value (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub const ALL: [Outcome; 2] = [Outcome::Failure, Outcome::Success];

    /// Interpret a numeric class value. Only exact 0 and 1 are accepted.
    pub fn from_class(value: f64) -> Option<Self> {
        if value == 1.0 {
            Some(Outcome::Success)
        } else if value == 0.0 {
            Some(Outcome::Failure)
        } else {
            None
        }
    }

    /// Parse a textual cell: `0`, `1`, `0.0`, `1.0`, `true` or `false`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "true" => Some(Outcome::Success),
            "false" => Some(Outcome::Failure),
            _ => s.parse::<f64>().ok().and_then(Outcome::from_class),
        }
    }

    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.class()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "Failure"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Only used to colour scatter points.
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// RecordStore – the frozen, loaded dataset
// ---------------------------------------------------------------------------

/// The immutable table of launch records plus the indices computed once at
/// load time. No mutation is exposed after construction.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<LaunchRecord>,
    sites: Vec<String>,
    booster_categories: Vec<String>,
    min_payload_kg: f64,
    max_payload_kg: f64,
}

impl RecordStore {
    /// Freeze `records` into a store. Fails on an empty table since the
    /// payload bounds would be undefined.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DataLoadError> {
        if records.is_empty() {
            return Err(DataLoadError::Empty);
        }

        let sites = first_seen(records.iter().map(|r| r.launch_site.as_str()));
        let booster_categories =
            first_seen(records.iter().map(|r| r.booster_version_category.as_str()));

        let (min_payload_kg, max_payload_kg) = records.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), r| (lo.min(r.payload_mass_kg), hi.max(r.payload_mass_kg)),
        );

        Ok(RecordStore {
            records,
            sites,
            booster_categories,
            min_payload_kg,
            max_payload_kg,
        })
    }

    /// All records in load order.
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct launch sites in first-seen order.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Distinct booster categories in first-seen order.
    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    pub fn min_payload_kg(&self) -> f64 {
        self.min_payload_kg
    }

    pub fn max_payload_kg(&self) -> f64 {
        self.max_payload_kg
    }

    /// The widest valid range: `[min, max]` observed at load.
    pub fn payload_bounds(&self) -> PayloadRange {
        PayloadRange::new(self.min_payload_kg, self.max_payload_kg)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// The site dropdown value: every site, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    /// Wire value used by the dropdown for "all sites".
    pub const ALL_VALUE: &'static str = "ALL";

    pub fn parse(value: &str) -> Self {
        if value == Self::ALL_VALUE {
            SiteSelector::All
        } else {
            SiteSelector::Site(value.to_string())
        }
    }

    pub fn site(&self) -> Option<&str> {
        match self {
            SiteSelector::All => None,
            SiteSelector::Site(s) => Some(s),
        }
    }

    /// Human label shown in the dropdown.
    pub fn label(&self) -> &str {
        match self {
            SiteSelector::All => "All Sites",
            SiteSelector::Site(s) => s,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::All => write!(f, "{}", Self::ALL_VALUE),
            SiteSelector::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Closed payload interval `[low, high]` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, mass_kg: f64) -> bool {
        self.low <= mass_kg && mass_kg <= self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(site: &str, mass: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: mass,
            outcome,
            booster_version_category: booster.to_string(),
        }
    }

    #[test]
    fn store_indexes_sites_in_first_seen_order() {
        let store = RecordStore::from_records(vec![
            rec("KSC LC-39A", 2500.0, Outcome::Success, "FT"),
            rec("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            rec("KSC LC-39A", 9600.0, Outcome::Success, "B5"),
            rec("VAFB SLC-4E", 500.0, Outcome::Failure, "FT"),
        ])
        .unwrap();

        assert_eq!(store.sites(), ["KSC LC-39A", "CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(store.booster_categories(), ["FT", "v1.0", "B5"]);
        assert_eq!(store.min_payload_kg(), 0.0);
        assert_eq!(store.max_payload_kg(), 9600.0);
        assert!(store.has_site("VAFB SLC-4E"));
        assert!(!store.has_site("Boca Chica"));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn empty_store_is_rejected() {
        assert!(matches!(
            RecordStore::from_records(Vec::new()),
            Err(DataLoadError::Empty)
        ));
    }

    #[test]
    fn outcome_parsing_accepts_only_binary_classes() {
        assert_eq!(Outcome::parse("1"), Some(Outcome::Success));
        assert_eq!(Outcome::parse(" 0.0 "), Some(Outcome::Failure));
        assert_eq!(Outcome::parse("TRUE"), Some(Outcome::Success));
        assert_eq!(Outcome::parse("2"), None);
        assert_eq!(Outcome::parse("yes"), None);
    }

    #[test]
    fn selector_round_trips_through_wire_value() {
        assert_eq!(SiteSelector::parse("ALL"), SiteSelector::All);
        let site = SiteSelector::parse("CCAFS SLC-40");
        assert_eq!(site.site(), Some("CCAFS SLC-40"));
        assert_eq!(site.to_string(), "CCAFS SLC-40");
        assert_eq!(SiteSelector::All.label(), "All Sites");
    }

    #[test]
    fn payload_range_is_inclusive() {
        let r = PayloadRange::new(1000.0, 1000.0);
        assert!(r.contains(1000.0));
        assert!(!r.contains(999.9));
        assert!(!r.contains(1000.1));
    }
}
