use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::field::host::{FieldHost, FrameRequestId, HostEvent, SubscriptionId, Topic};
use crate::field::mount::PixelField;
use crate::field::renderer::ContainerMetrics;
use crate::field::surface::Surface;
use crate::foundation::core::Point;
use crate::foundation::error::{FolioError, FolioResult};

const DEFAULT_REFRESH_HZ: f64 = 60.0;

#[derive(Debug)]
struct SimState {
    now_ms: f64,
    refresh_ms: f64,
    metrics: ContainerMetrics,
    visible: bool,
    reduced_motion: bool,
    supports_2d: bool,
    next_id: u64,
    subscriptions: BTreeMap<SubscriptionId, Topic>,
    pending_frames: Vec<FrameRequestId>,
    presented: u64,
    last_frame: Option<Surface>,
    recording: bool,
    recorded: Vec<(f64, Surface)>,
}

/// Deterministic in-process host with a virtual clock.
///
/// Clones share state, so a test (or the CLI) keeps one handle while the mounted field owns
/// another. Events are only delivered for topics the field is currently subscribed to.
#[derive(Clone, Debug)]
pub struct SimHost {
    state: Rc<RefCell<SimState>>,
}

impl SimHost {
    /// Visible host with normal motion, clock at zero, 60 Hz refresh.
    pub fn new(metrics: ContainerMetrics) -> Self {
        Self {
            state: Rc::new(RefCell::new(SimState {
                now_ms: 0.0,
                refresh_ms: 1000.0 / DEFAULT_REFRESH_HZ,
                metrics,
                visible: true,
                reduced_motion: false,
                supports_2d: true,
                next_id: 1,
                subscriptions: BTreeMap::new(),
                pending_frames: Vec::new(),
                presented: 0,
                last_frame: None,
                recording: false,
                recorded: Vec::new(),
            })),
        }
    }

    /// Start the clock at `now_ms`.
    pub fn with_clock(self, now_ms: f64) -> Self {
        self.state.borrow_mut().now_ms = now_ms;
        self
    }

    /// Display refresh rate used by [`Self::advance`].
    pub fn with_refresh_hz(self, hz: f64) -> FolioResult<Self> {
        if !(hz.is_finite() && hz > 0.0) {
            return Err(FolioError::validation("refresh rate must be > 0"));
        }
        self.state.borrow_mut().refresh_ms = 1000.0 / hz;
        Ok(self)
    }

    /// Initial reduced-motion preference.
    pub fn with_reduced_motion(self, reduce: bool) -> Self {
        self.state.borrow_mut().reduced_motion = reduce;
        self
    }

    /// Initial page visibility.
    pub fn with_visibility(self, visible: bool) -> Self {
        self.state.borrow_mut().visible = visible;
        self
    }

    /// Whether a 2D context is available.
    pub fn with_2d_support(self, supported: bool) -> Self {
        self.state.borrow_mut().supports_2d = supported;
        self
    }

    /// Keep a copy of every presented frame (see [`Self::take_recorded`]).
    pub fn recording(self) -> Self {
        self.state.borrow_mut().recording = true;
        self
    }

    /// Number of frames presented so far.
    pub fn presented_frames(&self) -> u64 {
        self.state.borrow().presented
    }

    /// Copy of the last presented frame.
    pub fn last_frame(&self) -> Option<Surface> {
        self.state.borrow().last_frame.clone()
    }

    /// Drain recorded `(timestamp, frame)` pairs.
    pub fn take_recorded(&self) -> Vec<(f64, Surface)> {
        std::mem::take(&mut self.state.borrow_mut().recorded)
    }

    /// Topics with a live subscription, sorted.
    pub fn active_topics(&self) -> Vec<Topic> {
        let mut topics: Vec<Topic> = self.state.borrow().subscriptions.values().copied().collect();
        topics.sort();
        topics
    }

    /// Outstanding frame requests.
    pub fn pending_frames(&self) -> usize {
        self.state.borrow().pending_frames.len()
    }

    /// Advance the virtual clock by `duration_ms`, firing frame callbacks once per refresh.
    pub fn advance(&self, field: &mut PixelField<SimHost>, duration_ms: f64) -> FolioResult<()> {
        let (target, step) = {
            let st = self.state.borrow();
            (st.now_ms + duration_ms.max(0.0), st.refresh_ms)
        };

        loop {
            let due = {
                let mut st = self.state.borrow_mut();
                let next = st.now_ms + step;
                if next > target {
                    st.now_ms = target;
                    break;
                }
                st.now_ms = next;
                std::mem::take(&mut st.pending_frames)
            };
            let now_ms = self.now_ms();
            for id in due {
                field.handle(HostEvent::Frame { id, now_ms })?;
            }
        }
        Ok(())
    }

    /// Resize the container and notify.
    pub fn resize(&self, field: &mut PixelField<SimHost>, metrics: ContainerMetrics) -> FolioResult<()> {
        self.state.borrow_mut().metrics = metrics;
        self.dispatch(field, HostEvent::Resize)
    }

    /// Change page visibility and notify.
    pub fn set_visible(&self, field: &mut PixelField<SimHost>, visible: bool) -> FolioResult<()> {
        self.state.borrow_mut().visible = visible;
        self.dispatch(field, HostEvent::VisibilityChanged(visible))
    }

    /// Change the reduced-motion preference and notify.
    pub fn set_reduced_motion(&self, field: &mut PixelField<SimHost>, reduce: bool) -> FolioResult<()> {
        self.state.borrow_mut().reduced_motion = reduce;
        self.dispatch(field, HostEvent::ReducedMotionChanged(reduce))
    }

    /// Move the pointer to client coordinates.
    pub fn pointer_move(&self, field: &mut PixelField<SimHost>, client: Point) -> FolioResult<()> {
        self.dispatch(field, HostEvent::PointerMove(client))
    }

    /// Move the pointer out of the window.
    pub fn pointer_leave(&self, field: &mut PixelField<SimHost>) -> FolioResult<()> {
        self.dispatch(field, HostEvent::PointerLeave)
    }

    fn dispatch(&self, field: &mut PixelField<SimHost>, event: HostEvent) -> FolioResult<()> {
        let subscribed = event.topic().is_some_and(|topic| {
            self.state
                .borrow()
                .subscriptions
                .values()
                .any(|t| *t == topic)
        });
        if subscribed {
            field.handle(event)?;
        }
        Ok(())
    }

    fn next_id(&self) -> u64 {
        let mut st = self.state.borrow_mut();
        let id = st.next_id;
        st.next_id += 1;
        id
    }
}

impl FieldHost for SimHost {
    fn now_ms(&self) -> f64 {
        self.state.borrow().now_ms
    }

    fn measure(&self) -> ContainerMetrics {
        self.state.borrow().metrics
    }

    fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.state.borrow().reduced_motion
    }

    fn supports_2d(&self) -> bool {
        self.state.borrow().supports_2d
    }

    fn subscribe(&mut self, topic: Topic) -> SubscriptionId {
        let id = SubscriptionId(self.next_id());
        self.state.borrow_mut().subscriptions.insert(id, topic);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.state.borrow_mut().subscriptions.remove(&id);
    }

    fn request_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next_id());
        self.state.borrow_mut().pending_frames.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        self.state.borrow_mut().pending_frames.retain(|p| *p != id);
    }

    fn present(&mut self, surface: &Surface) {
        let mut st = self.state.borrow_mut();
        st.presented += 1;
        if st.recording {
            let now = st.now_ms;
            st.recorded.push((now, surface.clone()));
        }
        st.last_frame = Some(surface.clone());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/sim.rs"]
mod tests;
