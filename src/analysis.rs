pub(crate) mod distribution;
pub(crate) mod score;
