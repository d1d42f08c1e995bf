use crate::{
    catalog::model::TraitRecord, generate::opts::SamplingStrategy, random::mt::MersenneTwister,
};

/// Result of one per-category draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Pick {
    pub(crate) index: usize,
    /// Stochastic acceptance ran out of attempts and fell back to a uniform pick.
    pub(crate) fell_back: bool,
}

impl Pick {
    fn direct(index: usize) -> Self {
        Self {
            index,
            fell_back: false,
        }
    }
}

/// Sampler bound to one category's trait list.
#[derive(Clone, Debug)]
pub(crate) enum CategorySampler<'a> {
    Uniform {
        traits: &'a [TraitRecord],
    },
    Cumulative {
        traits: &'a [TraitRecord],
        prefix: Vec<f64>,
        total: f64,
    },
    Acceptance {
        traits: &'a [TraitRecord],
        max_attempts: u32,
        /// Positive-weight indices; the fallback draws from these unless empty.
        eligible: Vec<usize>,
    },
}

impl<'a> CategorySampler<'a> {
    pub(crate) fn new(
        traits: &'a [TraitRecord],
        respect_rarity: bool,
        strategy: SamplingStrategy,
    ) -> Self {
        if !respect_rarity {
            return Self::Uniform { traits };
        }
        match strategy {
            SamplingStrategy::Cumulative => {
                let mut prefix = Vec::with_capacity(traits.len());
                let mut total = 0.0;
                for t in traits {
                    total += sanitize_weight(t.rarity_weight);
                    prefix.push(total);
                }
                if total <= 0.0 {
                    tracing::debug!(
                        category = traits.first().map(|t| t.category.as_str()),
                        "all weights are zero, sampling uniformly"
                    );
                    return Self::Uniform { traits };
                }
                Self::Cumulative {
                    traits,
                    prefix,
                    total,
                }
            }
            SamplingStrategy::StochasticAcceptance { max_attempts } => Self::Acceptance {
                traits,
                max_attempts: max_attempts.max(1),
                eligible: traits
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| sanitize_weight(t.rarity_weight) > 0.0)
                    .map(|(i, _)| i)
                    .collect(),
            },
        }
    }

    pub(crate) fn traits(&self) -> &'a [TraitRecord] {
        match self {
            Self::Uniform { traits }
            | Self::Cumulative { traits, .. }
            | Self::Acceptance { traits, .. } => *traits,
        }
    }

    pub(crate) fn pick(&self, rng: &mut MersenneTwister) -> Pick {
        match self {
            Self::Uniform { traits } => Pick::direct(rng.next_index(traits.len())),
            Self::Cumulative { prefix, total, .. } => {
                let r = rng.next_f64() * total;
                // First slot whose running total exceeds r; zero-weight slots
                // repeat the previous total and are never selected.
                let idx = prefix.partition_point(|&p| p <= r);
                Pick::direct(idx.min(prefix.len() - 1))
            }
            Self::Acceptance {
                traits,
                max_attempts,
                eligible,
            } => {
                for _ in 0..*max_attempts {
                    let idx = rng.next_index(traits.len());
                    if rng.next_f64() < sanitize_weight(traits[idx].rarity_weight) {
                        return Pick::direct(idx);
                    }
                }
                let index = if eligible.is_empty() {
                    rng.next_index(traits.len())
                } else {
                    eligible[rng.next_index(eligible.len())]
                };
                Pick {
                    index,
                    fell_back: true,
                }
            }
        }
    }
}

fn sanitize_weight(w: f64) -> f64 {
    if w.is_finite() { w.clamp(0.0, 1.0) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/sampler.rs"]
mod tests;
