use std::collections::BTreeMap;

use crate::{foundation::math::percent_of, generate::generator::Combination};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Realized trait frequencies over one generated collection.
pub struct DistributionReport {
    /// Occurrences per category, then trait name.
    pub trait_counts: BTreeMap<String, BTreeMap<String, u64>>,
    /// `100 * count / total_items` per category, then trait name (unrounded).
    pub category_percents: BTreeMap<String, BTreeMap<String, f64>>,
    /// Number of items analyzed.
    pub total_items: u64,
}

impl DistributionReport {
    /// Realized percent of `trait_name` in `category`, if it occurred.
    pub fn percent(&self, category: &str, trait_name: &str) -> Option<f64> {
        self.category_percents
            .get(category)
            .and_then(|traits| traits.get(trait_name))
            .copied()
    }

    /// Realized count of `trait_name` in `category` (zero if absent).
    pub fn count(&self, category: &str, trait_name: &str) -> u64 {
        self.trait_counts
            .get(category)
            .and_then(|traits| traits.get(trait_name))
            .copied()
            .unwrap_or(0)
    }
}

/// Count how often each trait occurs in `items`.
///
/// Pure audit pass: independent of the weights used to generate `items`. An
/// empty slice yields an empty report.
#[tracing::instrument(skip(items), fields(items = items.len()))]
pub fn analyze(items: &[Combination]) -> DistributionReport {
    let mut trait_counts: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
    for item in items {
        for (category, record) in item.iter() {
            *trait_counts
                .entry(category.to_string())
                .or_default()
                .entry(record.trait_name.clone())
                .or_default() += 1;
        }
    }

    let total_items = items.len() as u64;
    let category_percents = trait_counts
        .iter()
        .map(|(category, traits)| {
            let percents = traits
                .iter()
                .map(|(name, &count)| (name.clone(), percent_of(count, total_items)))
                .collect();
            (category.clone(), percents)
        })
        .collect();

    DistributionReport {
        trait_counts,
        category_percents,
        total_items,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/distribution.rs"]
mod tests;
