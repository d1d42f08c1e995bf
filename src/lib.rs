//! Layerforge turns layered trait catalogs into deterministic NFT collections.
//!
//! Users upload image layers grouped by category (Background, Body, Eyes, ...)
//! and assign each trait a rarity percent. Layerforge combines one trait per
//! category into trait-sets, reproducibly for a given seed, and audits what
//! it produced.
//!
//! # Pipeline overview
//!
//! 1. **Build**: `LayerListing + TraitMetadata -> Catalog` (weighted traits, capacity)
//! 2. **Generate**: `Catalog + GenerateOpts -> GeneratedSet` (seeded, optionally duplicate-free)
//! 3. **Analyze**: `GeneratedSet -> DistributionReport` (realized trait frequencies)
//! 4. **Rank** (optional): `DistributionReport -> RankedItem`s by aggregate rarity score
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: output is a pure function of catalog, seed and options.
//!   PRNG state is per run, never global.
//! - **No IO in the core**: image rendering, storage, export and chain
//!   interaction are downstream of [`GeneratedSet`].
//! - **Explicit capacity errors**: a duplicate-free request larger than the
//!   catalog can satisfy fails with [`LayerforgeError::Capacity`] unless the
//!   caller opts into [`OverflowPolicy::Clamp`], which records the shortfall.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod catalog;
mod foundation;
mod generate;
mod random;

pub use analysis::distribution::{DistributionReport, analyze};
pub use analysis::score::{RankedItem, rank_by_rarity, rarity_score};
pub use catalog::builder::build_catalog;
pub use catalog::model::{
    Catalog, CatalogSource, DEFAULT_RARITY_PERCENT, LayerEntry, LayerListing, TraitMeta,
    TraitMetadata, TraitRecord,
};
pub use foundation::core::{Seed, TokenId};
pub use foundation::error::{LayerforgeError, LayerforgeResult};
pub use generate::batch::{BatchThreading, generate_many};
pub use generate::fingerprint::{SetFingerprint, fingerprint_set};
pub use generate::generator::{
    Combination, GeneratedSet, GenerationOutcome, Generator, Progress, Step, generate,
    generate_cancellable,
};
pub use generate::opts::{
    DEFAULT_MAX_DUPLICATE_STREAK, GenerateOpts, OverflowPolicy, SamplingStrategy,
};
pub use random::mt::MersenneTwister;
