use crate::foundation::error::{LayerforgeError, LayerforgeResult};

/// PRNG seed identifying one generation run.
///
/// Any 32-bit value is valid, including `0`. Negative 32-bit inputs wrap
/// modulo 2^32, so `-1` and `u32::MAX` name the same run.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Seed(pub u32);

impl Seed {
    /// Wrap a signed seed into the unsigned 32-bit seed space.
    ///
    /// Accepts `i32::MIN..=u32::MAX`; anything wider has no 32-bit seed.
    pub fn from_signed(v: i64) -> LayerforgeResult<Self> {
        if let Ok(u) = u32::try_from(v) {
            return Ok(Self(u));
        }
        i32::try_from(v)
            .map(|i| Self(i as u32))
            .map_err(|_| {
                LayerforgeError::validation(format!("seed {v} is outside the 32-bit range"))
            })
    }
}

impl From<u32> for Seed {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token identifier assigned to a generated item by downstream exporters.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TokenId(pub u64);

impl TokenId {
    /// Token id of the item at `index` in a collection starting at `base`.
    pub fn at(base: u64, index: usize) -> Self {
        Self(base.saturating_add(index as u64))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
