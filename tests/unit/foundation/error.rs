use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LayerforgeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LayerforgeError::capacity(4, 2)
            .to_string()
            .contains("capacity error:")
    );
    assert!(
        LayerforgeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn capacity_reports_both_sides() {
    let msg = LayerforgeError::capacity(4, 2).to_string();
    assert!(msg.contains("requested 4"));
    assert!(msg.contains("only 2"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LayerforgeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
