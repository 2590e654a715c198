use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KinescopeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        KinescopeError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        KinescopeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        KinescopeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KinescopeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
