use crate::field::renderer::ContainerMetrics;
use crate::field::surface::Surface;
use crate::foundation::core::Point;

/// Host notifications a mounted field can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
    /// The container's on-screen size changed.
    Resize,
    /// The page became visible or hidden.
    Visibility,
    /// The reduced-motion preference changed.
    ReducedMotion,
    /// The pointer moved anywhere in the window.
    PointerMove,
    /// The pointer left the window.
    PointerLeave,
}

impl Topic {
    /// Every topic a mounted field listens to.
    pub const ALL: [Topic; 5] = [
        Topic::Resize,
        Topic::Visibility,
        Topic::ReducedMotion,
        Topic::PointerMove,
        Topic::PointerLeave,
    ];
}

/// Handle returned by [`FieldHost::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Handle returned by [`FieldHost::request_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(pub u64);

/// Event delivered by the host to a mounted field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// A previously requested frame callback fired.
    Frame {
        /// Request being answered.
        id: FrameRequestId,
        /// Frame timestamp in milliseconds.
        now_ms: f64,
    },
    /// The container was resized; the field re-measures through the host.
    Resize,
    /// Page visibility changed.
    VisibilityChanged(bool),
    /// Reduced-motion preference changed.
    ReducedMotionChanged(bool),
    /// Pointer moved, in client coordinates.
    PointerMove(Point),
    /// Pointer left the window.
    PointerLeave,
}

impl HostEvent {
    /// Subscription topic this event belongs to, `None` for frame callbacks.
    pub fn topic(&self) -> Option<Topic> {
        match self {
            Self::Frame { .. } => None,
            Self::Resize => Some(Topic::Resize),
            Self::VisibilityChanged(_) => Some(Topic::Visibility),
            Self::ReducedMotionChanged(_) => Some(Topic::ReducedMotion),
            Self::PointerMove(_) => Some(Topic::PointerMove),
            Self::PointerLeave => Some(Topic::PointerLeave),
        }
    }
}

/// Platform services a pixel field needs: clock, measurement, scheduling and listeners.
///
/// A browser binding maps these onto `performance.now`, `getBoundingClientRect`,
/// `requestAnimationFrame`, `ResizeObserver` and friends; [`crate::SimHost`] implements them
/// deterministically in-process.
pub trait FieldHost {
    /// Current timestamp in milliseconds.
    fn now_ms(&self) -> f64;

    /// Measure the container right now.
    fn measure(&self) -> ContainerMetrics;

    /// Whether the page is currently visible.
    fn is_visible(&self) -> bool;

    /// Whether the user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool;

    /// Whether a 2D drawing context is available at all.
    fn supports_2d(&self) -> bool {
        true
    }

    /// Start delivering events for `topic`.
    fn subscribe(&mut self, topic: Topic) -> SubscriptionId;

    /// Stop delivering events for a subscription.
    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Ask for one frame callback.
    fn request_frame(&mut self) -> FrameRequestId;

    /// Withdraw a frame request that has not fired yet.
    fn cancel_frame(&mut self, id: FrameRequestId);

    /// Show a freshly drawn frame.
    fn present(&mut self, _surface: &Surface) {}
}
