use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MinimalError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MinimalError::arithmetic("x")
            .to_string()
            .contains("arithmetic error:")
    );
    assert!(
        MinimalError::type_error("x")
            .to_string()
            .contains("type error:")
    );
    assert!(
        MinimalError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        MinimalError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn invalid_argument_names_accepted_set() {
    let msg = MinimalError::invalid_argument("w", &["x", "y", "z"]).to_string();
    assert!(msg.starts_with("invalid argument:"));
    assert!(msg.contains("'w'"));
    assert!(msg.contains("'x', 'y', 'z'"));
}

#[test]
fn invalid_attribute_lists_allowed_fields() {
    let msg = MinimalError::invalid_attribute("radius", &["x", "width"]).to_string();
    assert!(msg.contains("'radius' is not transformable"));
    assert!(msg.contains("'x', 'width'"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MinimalError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
