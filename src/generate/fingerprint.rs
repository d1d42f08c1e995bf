use crate::{foundation::math::Fnv1a64, generate::generator::GeneratedSet};

/// 128-bit digest of a generated set's seed and ordered combination keys.
///
/// Two sets share a fingerprint iff (with overwhelming probability) they hold
/// the same combinations in the same order. Trait weights and ids are not
/// hashed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct SetFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for SetFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Fingerprint a [`GeneratedSet`].
pub fn fingerprint_set(set: &GeneratedSet) -> SetFingerprint {
    let mut a = Fnv1a64::new_default();
    let mut b = Fnv1a64::new(Fnv1a64::ALT_BASIS);

    write_u64_pair(&mut a, &mut b, u64::from(set.seed.0));
    write_u64_pair(&mut a, &mut b, set.items.len() as u64);
    for item in &set.items {
        write_u64_pair(&mut a, &mut b, item.len() as u64);
        for (category, record) in item.iter() {
            write_str_pair(&mut a, &mut b, category);
            write_str_pair(&mut a, &mut b, &record.trait_name);
        }
        write_u8_pair(&mut a, &mut b, b'|');
    }

    SetFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    a.write_str(s);
    b.write_str(s);
}

#[cfg(test)]
#[path = "../../tests/unit/generate/fingerprint.rs"]
mod tests;
