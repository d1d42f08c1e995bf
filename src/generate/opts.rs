use std::path::Path;

use crate::foundation::{
    core::Seed,
    error::{LayerforgeError, LayerforgeResult},
};

/// What to do when a duplicate-free run asks for more items than can exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Fail with [`LayerforgeError::Capacity`] before drawing anything.
    #[default]
    Reject,
    /// Produce as many unique items as possible and record the shortfall.
    Clamp,
}

/// Per-category weighted sampling algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SamplingStrategy {
    /// Prefix sums plus binary search; one draw per pick.
    #[default]
    Cumulative,
    /// Draw an index, accept with probability `weight`; after `max_attempts`
    /// rejections, pick uniformly.
    StochasticAcceptance {
        /// Upper bound on (index, accept) draw pairs per pick.
        max_attempts: u32,
    },
}

/// Default bound on consecutive duplicate draws before a run gives up.
pub const DEFAULT_MAX_DUPLICATE_STREAK: u64 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Options for one generation run.
pub struct GenerateOpts {
    /// Requested collection size.
    pub size: u64,
    /// PRNG seed.
    pub seed: Seed,
    /// Sample by rarity weight instead of uniformly.
    pub respect_rarity: bool,
    /// Reject repeated trait-sets.
    pub avoid_duplicates: bool,
    /// Behavior when `size` exceeds the reachable unique combinations.
    pub overflow: OverflowPolicy,
    /// Weighted sampling algorithm (ignored when `respect_rarity` is off).
    pub sampling: SamplingStrategy,
    /// Consecutive duplicate draws tolerated before stopping early.
    pub max_duplicate_streak: u64,
}

impl Default for GenerateOpts {
    fn default() -> Self {
        Self {
            size: 0,
            seed: Seed::default(),
            respect_rarity: true,
            avoid_duplicates: true,
            overflow: OverflowPolicy::default(),
            sampling: SamplingStrategy::default(),
            max_duplicate_streak: DEFAULT_MAX_DUPLICATE_STREAK,
        }
    }
}

impl GenerateOpts {
    /// Options for `size` items from `seed`, other fields at their defaults.
    pub fn new(size: u64, seed: u32) -> Self {
        Self {
            size,
            seed: Seed(seed),
            ..Self::default()
        }
    }

    /// Load options from a JSON config file.
    pub fn from_path(path: &Path) -> LayerforgeResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            LayerforgeError::Other(
                anyhow::Error::new(e).context(format!("read options '{}'", path.display())),
            )
        })?;
        let opts: Self = serde_json::from_str(&s)
            .map_err(|e| LayerforgeError::serde(format!("parse options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Check option invariants.
    pub fn validate(&self) -> LayerforgeResult<()> {
        if let SamplingStrategy::StochasticAcceptance { max_attempts: 0 } = self.sampling {
            return Err(LayerforgeError::validation(
                "stochastic acceptance max_attempts must be > 0",
            ));
        }
        if self.max_duplicate_streak == 0 {
            return Err(LayerforgeError::validation(
                "max_duplicate_streak must be > 0",
            ));
        }
        if usize::try_from(self.size).is_err() {
            return Err(LayerforgeError::validation(
                "size does not fit in addressable memory",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/opts.rs"]
mod tests;
