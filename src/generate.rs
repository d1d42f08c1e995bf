pub(crate) mod batch;
pub(crate) mod fingerprint;
pub(crate) mod generator;
pub(crate) mod opts;
pub(crate) mod sampler;
