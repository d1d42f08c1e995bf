use super::*;
use crate::catalog::model::{LayerEntry, TraitMeta};

fn entry(id: &str, name: &str) -> LayerEntry {
    LayerEntry {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn listing() -> LayerListing {
    let mut layers = LayerListing::new();
    layers.insert(
        "Background".to_string(),
        vec![entry("bg-1", "Blue"), entry("bg-2", "Red"), entry("bg-3", "Gold")],
    );
    layers.insert("Eyes".to_string(), vec![entry("ey-1", "Laser"), entry("ey-2", "Sleepy")]);
    layers.insert("Hat".to_string(), vec![]);
    layers
}

fn metadata() -> TraitMetadata {
    let mut meta = TraitMetadata::new();
    meta.entry("Background".to_string())
        .or_default()
        .insert("Gold".to_string(), TraitMeta { rarity: 5 });
    meta.entry("Eyes".to_string())
        .or_default()
        .insert("Laser".to_string(), TraitMeta { rarity: 250 });
    meta
}

#[test]
fn empty_categories_are_omitted() {
    let catalog = build_catalog(&listing(), &metadata(), true);
    assert_eq!(catalog.len(), 2);
    assert!(catalog.category("Hat").is_none());
    assert_eq!(catalog.total_possible_combinations(), 6);
}

#[test]
fn weights_follow_metadata_when_respecting_rarity() {
    let catalog = build_catalog(&listing(), &metadata(), true);
    let bg = catalog.category("Background").unwrap();
    assert_eq!(bg[0].rarity_weight, 1.0);
    assert!((bg[2].rarity_weight - 0.05).abs() < 1e-12);
    // Out-of-range percents are capped at full weight.
    assert_eq!(catalog.category("Eyes").unwrap()[0].rarity_weight, 1.0);
}

#[test]
fn weights_are_uniform_when_ignoring_rarity() {
    let catalog = build_catalog(&listing(), &metadata(), false);
    for (_, traits) in catalog.categories() {
        assert!(traits.iter().all(|t| t.rarity_weight == 1.0));
    }
}

#[test]
fn records_keep_upload_order_and_identity() {
    let catalog = build_catalog(&listing(), &TraitMetadata::new(), true);
    let bg = catalog.category("Background").unwrap();
    let names = bg.iter().map(|t| t.trait_name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Blue", "Red", "Gold"]);
    assert_eq!(bg[1].trait_id, "bg-2");
    assert_eq!(bg[1].category, "Background");
}

#[test]
fn empty_listing_has_one_degenerate_combination() {
    let catalog = build_catalog(&LayerListing::new(), &TraitMetadata::new(), true);
    assert!(catalog.is_empty());
    assert_eq!(catalog.total_possible_combinations(), 1);
}

#[test]
fn total_saturates_instead_of_overflowing() {
    let mut layers = LayerListing::new();
    for c in 0..20 {
        let entries = (0..100)
            .map(|i| entry(&format!("{c}-{i}"), &format!("t{i}")))
            .collect();
        layers.insert(format!("cat{c:02}"), entries);
    }
    let catalog = build_catalog(&layers, &TraitMetadata::new(), true);
    assert_eq!(catalog.total_possible_combinations(), u64::MAX);
}
