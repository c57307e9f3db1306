use super::*;

#[test]
fn display_prefixes_are_stable() {
    let err = KnobError::validation("radius", "must be > 0");
    assert_eq!(err.to_string(), "validation error: radius: must be > 0");
    assert!(KnobError::render("x").to_string().contains("render error:"));
    assert!(KnobError::encode("x").to_string().contains("encode error:"));

    let io = KnobError::io("out/a.png", std::io::Error::other("disk full"));
    let msg = io.to_string();
    assert!(msg.contains("io error:"));
    assert!(msg.contains("a.png"));
    assert!(msg.contains("disk full"));
}

#[test]
fn kinds_follow_taxonomy() {
    assert_eq!(
        KnobError::validation("f", "m").kind(),
        ErrorKind::Validation
    );
    assert_eq!(KnobError::render("m").kind(), ErrorKind::Render);
    assert_eq!(
        KnobError::io("p", std::io::Error::other("m")).kind(),
        ErrorKind::Io
    );
    assert_eq!(KnobError::encode("m").kind(), ErrorKind::Io);
}

#[test]
fn field_is_exposed_only_for_validation() {
    assert_eq!(
        KnobError::validation("fill_stops", "m").field(),
        Some("fill_stops")
    );
    assert_eq!(KnobError::render("m").field(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KnobError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
