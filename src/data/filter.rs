use crate::error::QueryError;

use super::model::{LaunchRecord, PayloadRange, RecordStore, SiteSelector};

// ---------------------------------------------------------------------------
// Parameter validation
// ---------------------------------------------------------------------------

/// Reject a selector naming a site that is not in the store.
pub fn validate_selector(store: &RecordStore, selector: &SiteSelector) -> Result<(), QueryError> {
    match selector.site() {
        Some(site) if !store.has_site(site) => Err(QueryError::InvalidSelector(site.to_string())),
        _ => Ok(()),
    }
}

/// Reject `low > high` and bounds outside the payload range seen at load.
/// NaN bounds fail every comparison and are rejected too.
pub fn validate_range(store: &RecordStore, range: &PayloadRange) -> Result<(), QueryError> {
    let min = store.min_payload_kg();
    let max = store.max_payload_kg();
    let ok = range.low <= range.high && range.low >= min && range.high <= max;
    if ok {
        Ok(())
    } else {
        Err(QueryError::InvalidRange {
            low: range.low,
            high: range.high,
            min,
            max,
        })
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Records whose payload lies in `range` (both ends inclusive), in input order.
pub fn filter_by_payload<'a, I>(records: I, range: &PayloadRange) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|r| range.contains(r.payload_mass_kg))
        .collect()
}

/// Records launched from the selected site, in input order.
/// `SiteSelector::All` passes everything through.
pub fn filter_by_site<'a, I>(records: I, selector: &SiteSelector) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    match selector.site() {
        None => records.into_iter().collect(),
        Some(site) => records
            .into_iter()
            .filter(|r| r.launch_site == site)
            .collect(),
    }
}

/// Payload first, then site: the order the scatter view uses.
pub fn filter_records<'a>(
    store: &'a RecordStore,
    selector: &SiteSelector,
    range: &PayloadRange,
) -> Vec<&'a LaunchRecord> {
    let in_range = filter_by_payload(store.records(), range);
    filter_by_site(in_range, selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;

    fn store() -> RecordStore {
        let rows = [
            ("CCAFS LC-40", 0.0, Outcome::Failure),
            ("CCAFS LC-40", 500.0, Outcome::Failure),
            ("VAFB SLC-4E", 500.0, Outcome::Success),
            ("KSC LC-39A", 3000.0, Outcome::Success),
            ("CCAFS LC-40", 5300.0, Outcome::Success),
            ("KSC LC-39A", 9600.0, Outcome::Failure),
        ];
        RecordStore::from_records(
            rows.iter()
                .map(|&(site, mass, outcome)| LaunchRecord {
                    launch_site: site.to_string(),
                    payload_mass_kg: mass,
                    outcome,
                    booster_version_category: "FT".to_string(),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn payload_filter_keeps_inclusive_bounds_in_order() {
        let store = store();
        let hits = filter_by_payload(store.records(), &PayloadRange::new(500.0, 5300.0));
        let masses: Vec<f64> = hits.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(masses, [500.0, 500.0, 3000.0, 5300.0]);
    }

    #[test]
    fn degenerate_range_matches_exact_mass() {
        let store = store();
        let hits = filter_by_payload(store.records(), &PayloadRange::new(500.0, 500.0));
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|r| r.payload_mass_kg == 500.0));
    }

    #[test]
    fn all_selector_is_identity() {
        let store = store();
        let hits = filter_by_site(store.records(), &SiteSelector::All);
        assert_eq!(hits.len(), store.len());
    }

    #[test]
    fn combined_filter_satisfies_both_predicates_and_commutes() {
        let store = store();
        let range = PayloadRange::new(400.0, 6000.0);
        let selector = SiteSelector::Site("CCAFS LC-40".to_string());

        let payload_first = filter_records(&store, &selector, &range);
        let site_first = filter_by_payload(filter_by_site(store.records(), &selector), &range);

        assert_eq!(payload_first, site_first);
        assert_eq!(payload_first.len(), 2);
        for r in &payload_first {
            assert!(range.contains(r.payload_mass_kg));
            assert_eq!(r.launch_site, "CCAFS LC-40");
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let store = store();
        let range = PayloadRange::new(0.0, 3000.0);
        let selector = SiteSelector::Site("KSC LC-39A".to_string());

        let once = filter_records(&store, &selector, &range);
        let twice = filter_by_site(filter_by_payload(once.iter().copied(), &range), &selector);
        assert_eq!(once, twice);
    }

    #[test]
    fn no_match_is_an_empty_subset() {
        let store = store();
        let hits = filter_records(
            &store,
            &SiteSelector::Site("VAFB SLC-4E".to_string()),
            &PayloadRange::new(1000.0, 9600.0),
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn unknown_site_is_rejected() {
        let store = store();
        let err = validate_selector(&store, &SiteSelector::parse("Boca Chica")).unwrap_err();
        assert_eq!(err, QueryError::InvalidSelector("Boca Chica".to_string()));
        assert!(validate_selector(&store, &SiteSelector::All).is_ok());
    }

    #[test]
    fn inverted_or_out_of_bounds_range_is_rejected() {
        let store = store();
        assert!(matches!(
            validate_range(&store, &PayloadRange::new(6000.0, 1000.0)),
            Err(QueryError::InvalidRange { .. })
        ));
        assert!(validate_range(&store, &PayloadRange::new(-1.0, 1000.0)).is_err());
        assert!(validate_range(&store, &PayloadRange::new(0.0, 10000.0)).is_err());
        assert!(validate_range(&store, &PayloadRange::new(f64::NAN, 1000.0)).is_err());
        assert!(validate_range(&store, &store.payload_bounds()).is_ok());
    }
}
