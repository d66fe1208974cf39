use super::*;

#[test]
fn defaults_describe_an_800_square_canvas() {
    let s = SceneSettings::default();
    assert_eq!((s.width, s.height, s.fps), (800, 800, 60));
    assert_eq!(s.background, Color::WHITE);
    assert_eq!(s.light, Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(s.viewport(), Viewport::new(800, 800));
    s.validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let s = SceneSettings::from_json_str(
        r##"{"width": 320, "background": "#000000", "projection": {"fov_deg": 60.0}}"##,
    )
    .unwrap();
    assert_eq!(s.width, 320);
    assert_eq!(s.height, 800);
    assert_eq!(s.background, Color::BLACK);
    assert_eq!(s.projection.fov_deg, 60.0);
    assert_eq!(s.projection.near, Projection::default().near);
}

#[test]
fn bad_documents_are_rejected() {
    assert!(matches!(
        SceneSettings::from_json_str("{not json"),
        Err(MinimalError::Serde(_))
    ));
    assert!(matches!(
        SceneSettings::from_json_str(r#"{"fps": 0}"#),
        Err(MinimalError::Validation(_))
    ));
    assert!(SceneSettings::load("/definitely/missing/scene.json").is_err());
}
