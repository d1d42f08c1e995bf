use std::{collections::BTreeMap, path::Path};

use crate::foundation::error::{LayerforgeError, LayerforgeResult};

/// Rarity percent assumed for traits without metadata.
pub const DEFAULT_RARITY_PERCENT: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One uploaded layer image, identified by id and display name.
///
/// Image content never reaches the generator; only identity and category
/// membership matter here.
pub struct LayerEntry {
    /// Stable layer identifier assigned by the upload store.
    pub id: String,
    /// Trait display name (unique within its category).
    pub name: String,
}

/// Layer listing keyed by category.
pub type LayerListing = BTreeMap<String, Vec<LayerEntry>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Per-trait rarity side table entry.
pub struct TraitMeta {
    /// Rarity percent in `0..=100`.
    #[serde(default = "default_rarity")]
    pub rarity: u32,
}

impl Default for TraitMeta {
    fn default() -> Self {
        Self {
            rarity: DEFAULT_RARITY_PERCENT,
        }
    }
}

fn default_rarity() -> u32 {
    DEFAULT_RARITY_PERCENT
}

/// Rarity metadata keyed by category, then trait name.
pub type TraitMetadata = BTreeMap<String, BTreeMap<String, TraitMeta>>;

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Raw generator input: the layer listing plus its rarity side table.
pub struct CatalogSource {
    /// Layers grouped by category.
    pub layers: LayerListing,
    /// Rarity metadata; missing entries count as full weight.
    #[serde(default)]
    pub traits: TraitMetadata,
}

impl CatalogSource {
    /// Parse a catalog source from a JSON string and validate it.
    pub fn from_json_str(s: &str) -> LayerforgeResult<Self> {
        let src: Self = serde_json::from_str(s)
            .map_err(|e| LayerforgeError::serde(format!("parse catalog JSON: {e}")))?;
        src.validate()?;
        Ok(src)
    }

    /// Read, parse and validate a catalog source JSON file.
    pub fn from_path(path: &Path) -> LayerforgeResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            LayerforgeError::Other(
                anyhow::Error::new(e).context(format!("read catalog '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&s)
    }

    /// Check listing and metadata invariants.
    pub fn validate(&self) -> LayerforgeResult<()> {
        for (category, entries) in &self.layers {
            if category.trim().is_empty() {
                return Err(LayerforgeError::validation("category key must be non-empty"));
            }
            let mut seen = std::collections::BTreeSet::new();
            for entry in entries {
                if entry.name.trim().is_empty() {
                    return Err(LayerforgeError::validation(format!(
                        "category '{category}' has a layer with an empty name"
                    )));
                }
                if !seen.insert(entry.name.as_str()) {
                    return Err(LayerforgeError::validation(format!(
                        "category '{category}' lists trait '{}' more than once",
                        entry.name
                    )));
                }
            }
        }

        for (category, traits) in &self.traits {
            for (name, meta) in traits {
                if meta.rarity > 100 {
                    return Err(LayerforgeError::validation(format!(
                        "trait '{category}:{name}' rarity {} is outside 0..=100",
                        meta.rarity
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A weighted trait option inside one category.
pub struct TraitRecord {
    /// Owning category key.
    pub category: String,
    /// Layer identifier the trait was built from.
    pub trait_id: String,
    /// Trait display name.
    pub trait_name: String,
    /// Normalized sampling weight in `[0, 1]`.
    pub rarity_weight: f64,
}

impl TraitRecord {
    /// `"category:traitName"` key used in canonical combination keys.
    pub fn key(&self) -> String {
        format!("{}:{}", self.category, self.trait_name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Normalized trait catalog: non-empty categories and their weighted traits.
pub struct Catalog {
    pub(crate) categories: BTreeMap<String, Vec<TraitRecord>>,
    pub(crate) total_possible_combinations: u64,
}

impl Catalog {
    /// Iterate categories in generation order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[TraitRecord])> {
        self.categories
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Traits of one category, if present.
    pub fn category(&self, key: &str) -> Option<&[TraitRecord]> {
        self.categories.get(key).map(Vec::as_slice)
    }

    /// Number of (non-empty) categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// `true` when no category has any trait.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Product of per-category trait counts (`1` for an empty catalog).
    ///
    /// Saturates at `u64::MAX`.
    pub fn total_possible_combinations(&self) -> u64 {
        self.total_possible_combinations
    }

    /// Number of distinct combinations a sampler can actually reach.
    ///
    /// With rarity respected, zero-weight traits are unreachable unless every
    /// trait in their category has zero weight (the sampler then picks
    /// uniformly).
    pub fn reachable_combinations(&self, respect_rarity: bool) -> u64 {
        if !respect_rarity {
            return self.total_possible_combinations;
        }
        self.categories
            .values()
            .map(|traits| {
                let positive = traits.iter().filter(|t| t.rarity_weight > 0.0).count();
                if positive == 0 { traits.len() } else { positive }
            })
            .fold(1u64, |acc, n| acc.saturating_mul(n as u64))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
