use super::*;

#[test]
fn small_container_uses_configured_spacing() {
    let g = AnchorGrid::build(Size::new(100.0, 40.0), 20.0, 6000, 4.0);
    assert_eq!(g.dims(), (6, 3));
    assert_eq!(g.len(), 18);
    assert_eq!(g.spacing(), 20.0);

    let first = g.anchors()[0];
    assert_eq!(first.pos, Point::new(10.0, 10.0));
    assert_eq!((first.col, first.row), (0, 0));

    let last = *g.anchors().last().unwrap();
    assert_eq!(last.pos, Point::new(110.0, 50.0));
    assert_eq!((last.col, last.row), (5, 2));
}

#[test]
fn dense_container_is_scaled_into_budget() {
    let g = AnchorGrid::build(Size::new(1920.0, 1080.0), 10.0, 6000, 4.0);
    assert!(g.len() <= 6000, "len = {}", g.len());
    assert!(g.spacing() > 10.0);
    assert!(g.spacing() <= 40.0);
}

#[test]
fn scale_is_capped_even_if_budget_is_exceeded() {
    let g = AnchorGrid::build(Size::new(4000.0, 4000.0), 1.0, 100, 4.0);
    assert_eq!(g.spacing(), 4.0);
    assert!(g.len() > 100);
}

#[test]
fn empty_container_has_no_anchors() {
    assert!(AnchorGrid::build(Size::new(0.0, 300.0), 20.0, 6000, 4.0).is_empty());
    assert!(AnchorGrid::build(Size::new(300.0, 0.0), 20.0, 6000, 4.0).is_empty());
}
