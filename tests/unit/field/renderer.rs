use super::*;
use crate::field::shade::{FrameParams, Zone, shade_dot};
use crate::foundation::core::Rgba8Premul;

fn renderer(cfg: FieldConfig) -> FieldRenderer {
    FieldRenderer::new(cfg, 0.0).unwrap()
}

#[test]
fn nothing_is_drawn_before_resize() {
    let mut r = renderer(FieldConfig::default());
    assert!(!r.render(16.0));
    assert!(r.surface().is_none());
    assert_eq!(r.frames_drawn(), 0);
}

#[test]
fn zero_size_container_skips_frames() {
    let mut r = renderer(FieldConfig::default());
    r.resize(ContainerMetrics::new(0.0, 200.0, 1.0)).unwrap();
    assert!(!r.render(16.0));
    assert!(r.surface().is_none());
    assert!(r.grid().is_empty());
}

#[test]
fn surface_is_sized_with_capped_scale() {
    let mut r = renderer(FieldConfig::default());
    r.resize(ContainerMetrics::new(100.9, 40.0, 3.0)).unwrap();
    let s = r.surface().unwrap();
    assert_eq!(s.canvas(), Canvas { width: 175, height: 70 });
    assert_eq!(s.scale(), 1.75);
}

#[test]
fn each_anchor_draws_one_pixel_at_unit_scale() {
    let mut r = renderer(FieldConfig::default());
    r.resize(ContainerMetrics::new(100.0, 40.0, 1.0)).unwrap();
    assert!(r.render(0.0));
    // Anchors at x = 10, 30, .., 110 and y = 10, 30, 50; only those inside 100x40 land.
    assert_eq!(r.surface().unwrap().covered_pixels(), 5 * 2);
    assert_eq!(r.frames_drawn(), 1);
}

#[test]
fn opaque_background_is_filled() {
    let cfg = FieldConfig::from_json_str(r##"{"background": "#000000"}"##).unwrap();
    let mut r = renderer(cfg);
    r.resize(ContainerMetrics::new(20.0, 20.0, 1.0)).unwrap();
    assert!(r.render(0.0));
    let s = r.surface().unwrap();
    assert_eq!(s.covered_pixels(), 400);
    assert_eq!(
        s.pixel(0, 0),
        Some(Rgba8Premul::from_straight_rgba(0, 0, 0, 255))
    );
}

#[test]
fn pointer_on_anchor_changes_its_pixel() {
    let cfg = FieldConfig {
        warp_strength: 0.0,
        ..FieldConfig::default()
    };
    let mut r = renderer(cfg.clone());
    r.resize(ContainerMetrics::new(100.0, 40.0, 1.0)).unwrap();
    let anchor = r.grid().anchors()[0];

    r.set_pointer(Some(anchor.pos));
    assert!(r.render(1000.0));
    let inside = r.surface().unwrap().pixel(10, 10).unwrap();
    let frame = FrameParams::new(&cfg, 1000.0, 1000.0, Some(anchor.pos));
    let dot = shade_dot(&cfg, &frame, &anchor);
    assert_eq!(dot.zone, Zone::Inside);
    assert_eq!(inside, dot.color.to_rgba8_premul());

    r.set_pointer(None);
    assert!(r.render(1000.0));
    let outside = r.surface().unwrap().pixel(10, 10).unwrap();
    let dot = shade_dot(&cfg, &FrameParams::new(&cfg, 1000.0, 1000.0, None), &anchor);
    assert_eq!(dot.zone, Zone::Outside);
    assert_eq!(outside, dot.color.to_rgba8_premul());
}

#[test]
fn non_finite_pointer_is_treated_as_absent() {
    let mut r = renderer(FieldConfig::default());
    r.set_pointer(Some(Point::new(f64::NAN, 1.0)));
    assert_eq!(r.pointer(), None);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = FieldConfig {
        spacing: 0.0,
        ..FieldConfig::default()
    };
    assert!(FieldRenderer::new(cfg, 0.0).is_err());
}
