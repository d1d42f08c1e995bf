use super::*;
use crate::catalog::model::TraitRecord;

fn item(traits: &[(&str, &str)]) -> Combination {
    traits
        .iter()
        .map(|(category, name)| TraitRecord {
            category: category.to_string(),
            trait_id: format!("{category}-{name}"),
            trait_name: name.to_string(),
            rarity_weight: 0.5,
        })
        .collect()
}

fn sample() -> Vec<Combination> {
    vec![
        item(&[("Background", "Blue"), ("Eyes", "Laser")]),
        item(&[("Background", "Blue"), ("Eyes", "Wink")]),
        item(&[("Background", "Red"), ("Eyes", "Laser")]),
        item(&[("Background", "Blue"), ("Eyes", "Laser")]),
    ]
}

#[test]
fn empty_input_gives_empty_report() {
    let report = analyze(&[]);
    assert_eq!(report, DistributionReport::default());
    assert_eq!(report.total_items, 0);
    assert!(report.trait_counts.is_empty());
    assert!(report.category_percents.is_empty());
}

#[test]
fn counts_and_percents_follow_realized_items() {
    let report = analyze(&sample());
    assert_eq!(report.total_items, 4);
    assert_eq!(report.count("Background", "Blue"), 3);
    assert_eq!(report.count("Background", "Red"), 1);
    assert_eq!(report.count("Background", "Gold"), 0);
    assert_eq!(report.percent("Background", "Blue"), Some(75.0));
    assert_eq!(report.percent("Eyes", "Wink"), Some(25.0));
    assert_eq!(report.percent("Eyes", "Sleepy"), None);
}

#[test]
fn category_percents_sum_to_one_hundred() {
    let report = analyze(&sample());
    for (category, traits) in &report.category_percents {
        let sum: f64 = traits.values().sum();
        assert!((sum - 100.0).abs() < 1e-9, "{category} sums to {sum}");
    }
}

#[test]
fn percents_are_not_rounded() {
    let items = vec![
        item(&[("Body", "A")]),
        item(&[("Body", "B")]),
        item(&[("Body", "B")]),
    ];
    let report = analyze(&items);
    let a = report.percent("Body", "A").unwrap();
    assert!((a - 100.0 / 3.0).abs() < 1e-12);
}

#[test]
fn analysis_is_idempotent() {
    let items = sample();
    assert_eq!(analyze(&items), analyze(&items));
}

#[test]
fn degenerate_items_count_but_add_no_traits() {
    let items = vec![Combination::default(), Combination::default()];
    let report = analyze(&items);
    assert_eq!(report.total_items, 2);
    assert!(report.trait_counts.is_empty());
}
