use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SparkError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SparkError::render("x").to_string().contains("render error:"));
    assert!(SparkError::encode("x").to_string().contains("encode error:"));
    assert!(
        SparkError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SparkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
