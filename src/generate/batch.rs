use rayon::prelude::*;

use crate::{
    catalog::model::Catalog,
    foundation::{
        core::Seed,
        error::{LayerforgeError, LayerforgeResult},
    },
    generate::{
        generator::{GeneratedSet, generate},
        opts::GenerateOpts,
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Thread settings for [`generate_many`].
pub struct BatchThreading {
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Run one independent generation per seed in parallel.
///
/// Results come back in `seeds` order and each equals a sequential
/// [`generate`] call with `base` and that seed. Per-seed failures are
/// reported in place; only pool construction fails the whole batch.
#[tracing::instrument(skip(catalog, base, seeds), fields(runs = seeds.len(), size = base.size))]
pub fn generate_many(
    catalog: &Catalog,
    base: &GenerateOpts,
    seeds: &[Seed],
    threading: BatchThreading,
) -> LayerforgeResult<Vec<LayerforgeResult<GeneratedSet>>> {
    let pool = build_thread_pool(threading.threads)?;
    Ok(pool.install(|| {
        seeds
            .par_iter()
            .map(|&seed| {
                let opts = GenerateOpts { seed, ..*base };
                generate(catalog, &opts)
            })
            .collect()
    }))
}

fn build_thread_pool(threads: Option<usize>) -> LayerforgeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LayerforgeError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        LayerforgeError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/generate/batch.rs"]
mod tests;
