//! Gap-category counting.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::Serialize;
use vobvoc_core::{localized_label, GapType, Review};

/// Count of reviews per gap category for one product group.
///
/// Rows without any gap label are excluded. Iteration order of the mapping
/// carries no meaning; use [`GapDistribution::ascending`] for display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GapDistribution {
    counts: BTreeMap<GapType, usize>,
}

impl GapDistribution {
    #[must_use]
    pub fn from_reviews<'a, I>(reviews: I) -> Self
    where
        I: IntoIterator<Item = &'a Review>,
    {
        let mut counts = BTreeMap::new();
        for gap in reviews.into_iter().filter_map(|r| r.gap_type.as_ref()) {
            *counts.entry(gap.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    #[must_use]
    pub fn count(&self, gap: &GapType) -> usize {
        self.counts.get(gap).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of labelled rows counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<GapType, usize> {
        &self.counts
    }

    /// Entries sorted by count ascending, ties by label.
    #[must_use]
    pub fn ascending(&self) -> Vec<(&GapType, usize)> {
        let mut entries: Vec<(&GapType, usize)> =
            self.counts.iter().map(|(g, c)| (g, *c)).collect();
        entries.sort_by(|a, b| {
            a.1.cmp(&b.1)
                .then_with(|| a.0.label().cmp(b.0.label()))
        });
        entries
    }

    /// Entries keyed by localized label, ascending by count.
    #[must_use]
    pub fn localized(&self) -> Vec<(String, usize)> {
        self.ascending()
            .into_iter()
            .map(|(gap, count)| (localized_label(Some(gap)), count))
            .collect()
    }
}

/// Tally keys and return them by descending frequency.
///
/// Equal counts keep first-appearance order, so the result is deterministic
/// for a given input order.
pub(crate) fn tally<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in keys {
        if let Some(&i) = index.get(&key) {
            counts[i].1 += 1;
        } else {
            index.insert(key.clone(), counts.len());
            counts.push((key, 1));
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
