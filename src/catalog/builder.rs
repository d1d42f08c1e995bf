use std::collections::BTreeMap;

use crate::catalog::model::{
    Catalog, CatalogSource, DEFAULT_RARITY_PERCENT, LayerListing, TraitMetadata, TraitRecord,
};

/// Build a normalized [`Catalog`] from a layer listing and its rarity table.
///
/// Categories without layers are dropped. With `respect_rarity`, each weight is
/// `rarity / 100` (missing metadata counts as 100, values above 100 are capped);
/// otherwise every weight is `1.0`. Never fails.
#[tracing::instrument(skip(layers, metadata), fields(categories = layers.len()))]
pub fn build_catalog(
    layers: &LayerListing,
    metadata: &TraitMetadata,
    respect_rarity: bool,
) -> Catalog {
    let mut categories = BTreeMap::new();
    let mut total = 1u64;

    for (category, entries) in layers {
        if entries.is_empty() {
            continue;
        }
        let meta = metadata.get(category);
        let records = entries
            .iter()
            .map(|entry| {
                let rarity_weight = if respect_rarity {
                    let percent = meta
                        .and_then(|m| m.get(&entry.name))
                        .map_or(DEFAULT_RARITY_PERCENT, |m| m.rarity)
                        .min(100);
                    f64::from(percent) / 100.0
                } else {
                    1.0
                };
                TraitRecord {
                    category: category.clone(),
                    trait_id: entry.id.clone(),
                    trait_name: entry.name.clone(),
                    rarity_weight,
                }
            })
            .collect::<Vec<_>>();

        total = total.saturating_mul(records.len() as u64);
        categories.insert(category.clone(), records);
    }

    tracing::debug!(
        kept = categories.len(),
        total_possible_combinations = total,
        "catalog built"
    );

    Catalog {
        categories,
        total_possible_combinations: total,
    }
}

impl Catalog {
    /// Build a catalog straight from a parsed [`CatalogSource`].
    pub fn from_source(src: &CatalogSource, respect_rarity: bool) -> Self {
        build_catalog(&src.layers, &src.traits, respect_rarity)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/builder.rs"]
mod tests;
