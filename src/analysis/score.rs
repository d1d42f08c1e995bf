use crate::{analysis::distribution::DistributionReport, generate::generator::Combination};

/// Aggregate rarity of one item: the sum of `100 / percent` over its traits.
///
/// Rarer traits contribute more. Traits missing from `report` (or with a zero
/// percent) are skipped. Scores are only comparable within one collection.
pub fn rarity_score(combination: &Combination, report: &DistributionReport) -> f64 {
    combination
        .iter()
        .filter_map(|(category, record)| report.percent(category, &record.trait_name))
        .filter(|&percent| percent > 0.0)
        .map(|percent| 100.0 / percent)
        .sum()
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// An item's position in a rarity ranking.
pub struct RankedItem {
    /// Index of the item in generation order.
    pub index: usize,
    /// Rarity score from [`rarity_score`].
    pub score: f64,
    /// 1-based rank, rarest first.
    pub rank: usize,
}

/// Rank `items` rarest-first; equal scores keep generation order.
pub fn rank_by_rarity(items: &[Combination], report: &DistributionReport) -> Vec<RankedItem> {
    let mut scored = items
        .iter()
        .enumerate()
        .map(|(index, c)| (index, rarity_score(c, report)))
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    scored
        .into_iter()
        .enumerate()
        .map(|(pos, (index, score))| RankedItem {
            index,
            score,
            rank: pos + 1,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/score.rs"]
mod tests;
