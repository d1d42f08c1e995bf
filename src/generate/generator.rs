use std::{
    collections::{BTreeMap, HashSet},
    sync::atomic::{AtomicBool, Ordering},
};

use crate::{
    catalog::model::{Catalog, TraitRecord},
    foundation::{
        core::{Seed, TokenId},
        error::{LayerforgeError, LayerforgeResult},
    },
    generate::{
        opts::{GenerateOpts, OverflowPolicy},
        sampler::CategorySampler,
    },
    random::mt::MersenneTwister,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// One NFT's trait assignment: exactly one trait per catalog category.
pub struct Combination(BTreeMap<String, TraitRecord>);

impl Combination {
    /// Canonical duplicate-detection key: `"cat:name"` pairs sorted by
    /// category and joined with `|`.
    pub fn key(&self) -> String {
        self.0
            .values()
            .map(TraitRecord::key)
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Trait chosen for `category`.
    pub fn get(&self, category: &str) -> Option<&TraitRecord> {
        self.0.get(category)
    }

    /// Name of the trait chosen for `category`.
    pub fn trait_name(&self, category: &str) -> Option<&str> {
        self.0.get(category).map(|t| t.trait_name.as_str())
    }

    /// Iterate `(category, trait)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TraitRecord)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of categories filled.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for the degenerate combination of an empty catalog.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<TraitRecord> for Combination {
    fn from_iter<I: IntoIterator<Item = TraitRecord>>(iter: I) -> Self {
        Self(iter.into_iter().map(|t| (t.category.clone(), t)).collect())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
/// How a generation run ended.
pub enum GenerationOutcome {
    /// Every requested item was produced.
    Complete,
    /// The request exceeded the unique capacity and was clamped.
    Clamped {
        /// Originally requested size.
        requested: u64,
        /// Items actually produced.
        produced: u64,
    },
    /// Too many consecutive duplicate draws; the run stopped early.
    Exhausted {
        /// Items produced before stopping.
        produced: u64,
    },
    /// The caller cancelled the run.
    Cancelled {
        /// Items produced before cancellation.
        produced: u64,
    },
}

impl GenerationOutcome {
    /// `true` when fewer items than requested were produced.
    pub fn is_partial(self) -> bool {
        !matches!(self, Self::Complete)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Ordered output of one generation run.
///
/// Item order is generation order and is stable for the lifetime of the set.
pub struct GeneratedSet {
    /// Seed the run was started from.
    pub seed: Seed,
    /// Size the caller asked for.
    pub requested: u64,
    /// Generated combinations in generation order.
    pub items: Vec<Combination>,
    /// How the run ended.
    pub outcome: GenerationOutcome,
}

impl GeneratedSet {
    /// Number of generated items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when nothing was generated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate items in generation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Combination> {
        self.items.iter()
    }

    /// Pair every item with its token id, counting up from `base`.
    pub fn token_ids(&self, base: u64) -> impl Iterator<Item = (TokenId, &Combination)> {
        self.items
            .iter()
            .enumerate()
            .map(move |(i, c)| (TokenId::at(base, i), c))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Snapshot of a running generation.
pub struct Progress {
    /// Items produced so far.
    pub produced: u64,
    /// Items the run is aiming for (after any clamping).
    pub target: u64,
}

impl Progress {
    /// Completion in `[0, 1]`; an empty target counts as complete.
    pub fn fraction(self) -> f64 {
        if self.target == 0 {
            return 1.0;
        }
        (self.produced as f64 / self.target as f64).min(1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Result of one outer-loop iteration.
pub enum Step {
    /// A new combination was appended.
    Produced,
    /// The draw repeated an earlier combination and was discarded.
    Duplicate,
    /// The run is over; further calls keep returning `Done`.
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stop {
    Finished,
    Exhausted,
    Cancelled,
}

/// Incremental, caller-driven generation run.
///
/// Each [`Generator::step`] performs one draw of a full combination, so callers
/// can report progress or cancel between items. [`generate`] drives it to the
/// end in one call.
#[derive(Debug)]
pub struct Generator<'a> {
    samplers: Vec<CategorySampler<'a>>,
    rng: MersenneTwister,
    seen: HashSet<String>,
    items: Vec<Combination>,
    seed: Seed,
    requested: u64,
    target: u64,
    capacity: u64,
    avoid_duplicates: bool,
    duplicate_streak: u64,
    max_duplicate_streak: u64,
    fallbacks: u64,
    stop: Option<Stop>,
}

const PREALLOC_LIMIT: u64 = 1 << 16;

impl<'a> Generator<'a> {
    /// Prepare a run over `catalog`.
    ///
    /// Fails on invalid options, or with [`LayerforgeError::Capacity`] when
    /// duplicates are avoided, `opts.size` exceeds the reachable unique
    /// combinations and the overflow policy is [`OverflowPolicy::Reject`].
    pub fn new(catalog: &'a Catalog, opts: &GenerateOpts) -> LayerforgeResult<Self> {
        opts.validate()?;

        let capacity = if opts.avoid_duplicates {
            catalog.reachable_combinations(opts.respect_rarity)
        } else {
            u64::MAX
        };

        let target = if opts.size > capacity {
            match opts.overflow {
                OverflowPolicy::Reject => {
                    return Err(LayerforgeError::capacity(opts.size, capacity));
                }
                OverflowPolicy::Clamp => {
                    tracing::warn!(
                        requested = opts.size,
                        available = capacity,
                        "requested size exceeds unique combinations, clamping"
                    );
                    capacity
                }
            }
        } else {
            opts.size
        };

        let samplers = catalog
            .categories()
            .map(|(_, traits)| CategorySampler::new(traits, opts.respect_rarity, opts.sampling))
            .collect();

        Ok(Self {
            samplers,
            rng: MersenneTwister::new(opts.seed),
            seen: HashSet::new(),
            items: Vec::with_capacity(target.min(PREALLOC_LIMIT) as usize),
            seed: opts.seed,
            requested: opts.size,
            target,
            capacity,
            avoid_duplicates: opts.avoid_duplicates,
            duplicate_streak: 0,
            max_duplicate_streak: opts.max_duplicate_streak,
            fallbacks: 0,
            stop: None,
        })
    }

    /// Run one iteration of the generation loop.
    pub fn step(&mut self) -> Step {
        if self.stop.is_some() {
            return Step::Done;
        }
        let produced = self.items.len() as u64;
        if produced >= self.target
            || (self.avoid_duplicates && self.seen.len() as u64 >= self.capacity)
        {
            self.stop = Some(Stop::Finished);
            return Step::Done;
        }

        let combination = self.draw();

        if self.avoid_duplicates {
            let key = combination.key();
            if self.seen.contains(&key) {
                self.duplicate_streak += 1;
                if self.duplicate_streak >= self.max_duplicate_streak {
                    tracing::warn!(
                        produced,
                        target = self.target,
                        streak = self.duplicate_streak,
                        "giving up after consecutive duplicate draws"
                    );
                    self.stop = Some(Stop::Exhausted);
                }
                return Step::Duplicate;
            }
            self.seen.insert(key);
        }

        self.duplicate_streak = 0;
        self.items.push(combination);
        Step::Produced
    }

    /// Stop the run; [`Generator::finish`] will report it as cancelled.
    pub fn cancel(&mut self) {
        if self.stop.is_none() {
            self.stop = Some(Stop::Cancelled);
        }
    }

    /// `true` once [`Generator::step`] has returned [`Step::Done`] or the run
    /// was cancelled.
    pub fn is_done(&self) -> bool {
        self.stop.is_some()
    }

    /// Current progress.
    pub fn progress(&self) -> Progress {
        Progress {
            produced: self.items.len() as u64,
            target: self.target,
        }
    }

    /// Items produced so far, in generation order.
    pub fn items(&self) -> &[Combination] {
        &self.items
    }

    /// Consume the generator and return what it produced.
    pub fn finish(self) -> GeneratedSet {
        let produced = self.items.len() as u64;
        let outcome = match self.stop {
            Some(Stop::Cancelled) => GenerationOutcome::Cancelled { produced },
            None if produced < self.target => GenerationOutcome::Cancelled { produced },
            Some(Stop::Exhausted) => GenerationOutcome::Exhausted { produced },
            _ if produced >= self.requested => GenerationOutcome::Complete,
            _ if produced >= self.target => GenerationOutcome::Clamped {
                requested: self.requested,
                produced,
            },
            _ => GenerationOutcome::Exhausted { produced },
        };

        if self.fallbacks > 0 {
            tracing::warn!(
                fallbacks = self.fallbacks,
                "stochastic acceptance fell back to uniform picks"
            );
        }
        tracing::debug!(
            seed = self.seed.0,
            produced,
            draws = self.rng.draws(),
            ?outcome,
            "generation finished"
        );

        GeneratedSet {
            seed: self.seed,
            requested: self.requested,
            items: self.items,
            outcome,
        }
    }

    fn draw(&mut self) -> Combination {
        let mut out = BTreeMap::new();
        for sampler in &self.samplers {
            let pick = sampler.pick(&mut self.rng);
            if pick.fell_back {
                self.fallbacks += 1;
            }
            let record = &sampler.traits()[pick.index];
            out.insert(record.category.clone(), record.clone());
        }
        Combination(out)
    }
}

impl Iterator for Generator<'_> {
    type Item = Combination;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.step() {
                Step::Produced => return self.items.last().cloned(),
                Step::Duplicate => continue,
                Step::Done => return None,
            }
        }
    }
}

/// Generate a collection in one call.
///
/// Output is a pure function of `(catalog, opts)`: the same inputs always
/// yield the same items in the same order.
#[tracing::instrument(
    skip(catalog, opts),
    fields(size = opts.size, seed = opts.seed.0, categories = catalog.len())
)]
pub fn generate(catalog: &Catalog, opts: &GenerateOpts) -> LayerforgeResult<GeneratedSet> {
    let mut generator = Generator::new(catalog, opts)?;
    while generator.step() != Step::Done {}
    Ok(generator.finish())
}

/// Like [`generate`], but checks `cancel` once per iteration.
///
/// A cancelled run still returns the items produced so far, marked
/// [`GenerationOutcome::Cancelled`].
#[tracing::instrument(skip(catalog, opts, cancel), fields(size = opts.size, seed = opts.seed.0))]
pub fn generate_cancellable(
    catalog: &Catalog,
    opts: &GenerateOpts,
    cancel: &AtomicBool,
) -> LayerforgeResult<GeneratedSet> {
    let mut generator = Generator::new(catalog, opts)?;
    loop {
        if cancel.load(Ordering::Relaxed) {
            tracing::warn!(produced = generator.items.len(), "generation cancelled");
            generator.cancel();
            break;
        }
        if generator.step() == Step::Done {
            break;
        }
    }
    Ok(generator.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/generate/generator.rs"]
mod tests;
