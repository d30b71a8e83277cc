use super::*;

fn host() -> SimHost {
    SimHost::new(ContainerMetrics::new(64.0, 32.0, 1.0))
}

#[test]
fn frame_requests_are_tracked_and_cancelled() {
    let mut h = host();
    let a = h.request_frame();
    let b = h.request_frame();
    assert_ne!(a, b);
    assert_eq!(h.pending_frames(), 2);
    h.cancel_frame(a);
    assert_eq!(h.pending_frames(), 1);
}

#[test]
fn subscriptions_are_tracked_by_topic() {
    let mut h = host();
    let id = h.subscribe(Topic::PointerMove);
    h.subscribe(Topic::Resize);
    assert_eq!(h.active_topics(), vec![Topic::Resize, Topic::PointerMove]);
    h.unsubscribe(id);
    assert_eq!(h.active_topics(), vec![Topic::Resize]);
}

#[test]
fn builder_flags_are_reported() {
    let h = host()
        .with_clock(250.0)
        .with_visibility(false)
        .with_reduced_motion(true)
        .with_2d_support(false);
    assert_eq!(h.now_ms(), 250.0);
    assert!(!h.is_visible());
    assert!(h.prefers_reduced_motion());
    assert!(!h.supports_2d());
    assert!(host().with_refresh_hz(0.0).is_err());
}

#[test]
fn clones_share_state() {
    let h = host();
    let mut other = h.clone();
    other.request_frame();
    assert_eq!(h.pending_frames(), 1);
}
