use super::*;

#[test]
fn signed_seeds_wrap_into_u32() {
    assert_eq!(Seed::from_signed(-1).unwrap(), Seed(u32::MAX));
    assert_eq!(Seed::from_signed(0).unwrap(), Seed(0));
    assert_eq!(Seed::from_signed(42).unwrap(), Seed(42));
    assert_eq!(Seed::from_signed(u32::MAX as i64).unwrap(), Seed(u32::MAX));
    assert_eq!(
        Seed::from_signed(i32::MIN as i64).unwrap(),
        Seed(1u32 << 31)
    );
}

#[test]
fn seeds_outside_32_bits_are_rejected() {
    for v in [1i64 << 32, i32::MIN as i64 - 1, i64::MAX, i64::MIN] {
        let err = Seed::from_signed(v).unwrap_err();
        assert!(err.to_string().starts_with("validation error:"), "{err}");
    }
}

#[test]
fn seed_serializes_as_bare_integer() {
    let s = serde_json::to_string(&Seed(7)).unwrap();
    assert_eq!(s, "7");
    let back: Seed = serde_json::from_str("7").unwrap();
    assert_eq!(back, Seed(7));
}

#[test]
fn token_id_offsets_from_base() {
    assert_eq!(TokenId::at(1, 0), TokenId(1));
    assert_eq!(TokenId::at(1, 9), TokenId(10));
    assert_eq!(TokenId::at(u64::MAX, 3), TokenId(u64::MAX));
}
