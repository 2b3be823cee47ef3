use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Category keys and counts
// ---------------------------------------------------------------------------

/// What a single count in a [`CategoryCount`] refers to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    /// By-site mode: one key per observed `(site, outcome)` pair.
    SiteOutcome { site: String, outcome: Outcome },
    /// By-outcome mode, scoped to one site.
    Outcome(Outcome),
}

impl CategoryKey {
    pub fn label(&self) -> String {
        match self {
            CategoryKey::SiteOutcome { site, outcome } => format!("{site} ({outcome})"),
            CategoryKey::Outcome(outcome) => outcome.to_string(),
        }
    }
}

/// Count per category. Iteration order is only for display.
pub type CategoryCount = BTreeMap<CategoryKey, usize>;

// ---------------------------------------------------------------------------
// Grouping modes
// ---------------------------------------------------------------------------

/// Group by `(launch site, outcome)`. Only pairs that occur get a key.
pub fn count_by_site<'a, I>(records: I) -> CategoryCount
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let mut counts = CategoryCount::new();
    for r in records {
        let key = CategoryKey::SiteOutcome {
            site: r.launch_site.clone(),
            outcome: r.outcome,
        };
        *counts.entry(key).or_default() += 1;
    }
    counts
}

/// Restrict to `site`, then group by outcome. Both outcomes are always
/// present; an unobserved one counts zero.
pub fn count_by_outcome<'a, I>(records: I, site: &str) -> CategoryCount
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let mut counts: CategoryCount = Outcome::ALL
        .iter()
        .map(|&o| (CategoryKey::Outcome(o), 0))
        .collect();
    for r in records.into_iter().filter(|r| r.launch_site == site) {
        *counts.entry(CategoryKey::Outcome(r.outcome)).or_default() += 1;
    }
    counts
}
