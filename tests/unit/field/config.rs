use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = FieldConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.dot_budget, 6000);
    assert!((cfg.base_hue_speed() - 0.06).abs() < 1e-12);
}

#[test]
fn json_fills_missing_keys_with_defaults() {
    let cfg = FieldConfig::from_json_str(r##"{"spacing": 12, "background": "#101010"}"##).unwrap();
    assert_eq!(cfg.spacing, 12.0);
    assert_eq!(cfg.pointer_radius, 160.0);
    assert_eq!(
        cfg.background.to_rgba8_premul(),
        Rgba8Premul::from_straight_rgba(16, 16, 16, 255)
    );
}

#[test]
fn transparent_background_keyword() {
    let cfg = FieldConfig::from_json_str(r#"{"background": "Transparent"}"#).unwrap();
    assert_eq!(cfg.background, Background::Transparent);
    assert_eq!(cfg.background.to_rgba8_premul(), Rgba8Premul::transparent());
}

#[test]
fn unknown_keys_are_rejected() {
    let err = FieldConfig::from_json_str(r#"{"spaceing": 12}"#).unwrap_err();
    assert!(matches!(err, FolioError::Serde(_)));
}

#[test]
fn invalid_values_are_rejected() {
    for bad in [
        r#"{"spacing": 0}"#,
        r#"{"pixel_size": -1}"#,
        r#"{"color_cycle_secs": 0}"#,
        r#"{"pointer_radius": -5}"#,
        r#"{"max_device_scale": 0.5}"#,
        r#"{"target_fps": 0}"#,
        r#"{"dot_budget": 0}"#,
        r#"{"max_spacing_scale": 0.9}"#,
    ] {
        let err = FieldConfig::from_json_str(bad).unwrap_err();
        assert!(matches!(err, FolioError::Validation(_)), "{bad}: {err}");
    }
}

#[test]
fn device_scale_is_capped() {
    let cfg = FieldConfig::default();
    assert_eq!(cfg.clamp_device_scale(3.0), 1.75);
    assert_eq!(cfg.clamp_device_scale(0.5), 1.0);
    assert_eq!(cfg.clamp_device_scale(f64::NAN), 1.0);
    assert_eq!(cfg.clamp_device_scale(1.5), 1.5);
}

#[test]
fn background_round_trips_through_json() {
    let cfg = FieldConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"transparent\""));
    assert_eq!(FieldConfig::from_json_str(&json).unwrap(), cfg);
}
