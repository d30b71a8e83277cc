use crate::field::config::FieldConfig;
use crate::field::host::{FieldHost, FrameRequestId, HostEvent, SubscriptionId, Topic};
use crate::field::renderer::FieldRenderer;
use crate::foundation::core::Point;
use crate::foundation::error::FolioResult;

/// Frames due within this many milliseconds of the interval are drawn on the current callback.
const FRAME_SLACK_MS: f64 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct LoopGate {
    visible: bool,
    reduced_motion: bool,
}

impl LoopGate {
    fn may_animate(self) -> bool {
        self.visible && !self.reduced_motion
    }
}

/// A pixel field mounted on a host.
///
/// Mounting subscribes to every [`Topic`], sizes the surface, draws one frame and starts the
/// frame loop. Dropping the value cancels any pending frame and releases every subscription.
pub struct PixelField<H: FieldHost> {
    host: H,
    renderer: Option<FieldRenderer>,
    subscriptions: Vec<SubscriptionId>,
    pending: Option<FrameRequestId>,
    gate: LoopGate,
    interval_ms: f64,
    last_frame_ms: f64,
}

impl<H: FieldHost> PixelField<H> {
    /// Mount a field with `cfg` on `host`.
    ///
    /// Without 2D support the field stays inert: no listeners, no frames, no error.
    #[tracing::instrument(skip_all)]
    pub fn mount(host: H, cfg: FieldConfig) -> FolioResult<Self> {
        let interval_ms = cfg.fps()?.frame_interval_ms();
        let mut field = Self {
            renderer: None,
            subscriptions: Vec::new(),
            pending: None,
            gate: LoopGate::default(),
            interval_ms,
            last_frame_ms: 0.0,
            host,
        };

        if !field.host.supports_2d() {
            cfg.validate()?;
            tracing::debug!("no 2d context; pixel field is inert");
            return Ok(field);
        }

        let now = field.host.now_ms();
        let mut renderer = FieldRenderer::new(cfg, now)?;
        renderer.resize(field.host.measure())?;
        field.renderer = Some(renderer);

        for topic in Topic::ALL {
            let id = field.host.subscribe(topic);
            field.subscriptions.push(id);
        }

        field.gate = LoopGate {
            visible: field.host.is_visible(),
            reduced_motion: field.host.prefers_reduced_motion(),
        };
        field.draw(now);
        field.start_loop();
        Ok(field)
    }

    /// Dispatch one host event.
    pub fn handle(&mut self, event: HostEvent) -> FolioResult<()> {
        if self.renderer.is_none() {
            return Ok(());
        }

        match event {
            HostEvent::Frame { id, now_ms } => self.on_frame(id, now_ms),
            HostEvent::Resize => {
                let metrics = self.host.measure();
                if let Some(r) = self.renderer.as_mut() {
                    r.resize(metrics)?;
                }
                let now = self.host.now_ms();
                self.draw(now);
            }
            HostEvent::VisibilityChanged(visible) => {
                self.gate.visible = visible;
                self.transition();
            }
            HostEvent::ReducedMotionChanged(reduce) => {
                self.gate.reduced_motion = reduce;
                self.transition();
            }
            HostEvent::PointerMove(client) => {
                let origin = self.host.measure().origin;
                let local = Point::new(client.x - origin.x, client.y - origin.y);
                if let Some(r) = self.renderer.as_mut() {
                    r.set_pointer(Some(local));
                }
            }
            HostEvent::PointerLeave => {
                if let Some(r) = self.renderer.as_mut() {
                    r.set_pointer(None);
                }
            }
        }
        Ok(())
    }

    /// Whether a frame callback is outstanding.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Renderer state, `None` when the field is inert.
    pub fn renderer(&self) -> Option<&FieldRenderer> {
        self.renderer.as_ref()
    }

    /// Borrow the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Tear the field down now. Equivalent to dropping it.
    pub fn unmount(self) {}

    fn on_frame(&mut self, id: FrameRequestId, now_ms: f64) {
        if self.pending != Some(id) {
            tracing::trace!(?id, "ignoring stale frame callback");
            return;
        }
        self.pending = None;
        if !self.gate.may_animate() {
            return;
        }
        if now_ms - self.last_frame_ms >= self.interval_ms - FRAME_SLACK_MS {
            self.last_frame_ms = now_ms;
            self.draw(now_ms);
        }
        self.pending = Some(self.host.request_frame());
    }

    fn transition(&mut self) {
        if self.gate.may_animate() {
            self.start_loop();
        } else {
            self.stop_loop();
        }
        // Redraw on every state change so a paused field never shows a stale frame.
        let now = self.host.now_ms();
        self.draw(now);
        tracing::debug!(
            visible = self.gate.visible,
            reduced_motion = self.gate.reduced_motion,
            running = self.is_running(),
            "pixel field loop state changed"
        );
    }

    fn start_loop(&mut self) {
        if !self.gate.may_animate() || self.pending.is_some() {
            return;
        }
        self.last_frame_ms = self.host.now_ms();
        self.pending = Some(self.host.request_frame());
    }

    fn stop_loop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.host.cancel_frame(id);
        }
    }

    fn draw(&mut self, now_ms: f64) {
        let Some(r) = self.renderer.as_mut() else {
            return;
        };
        if r.render(now_ms)
            && let Some(surface) = r.surface()
        {
            self.host.present(surface);
        }
    }
}

impl<H: FieldHost> Drop for PixelField<H> {
    fn drop(&mut self) {
        self.stop_loop();
        for id in self.subscriptions.drain(..) {
            self.host.unsubscribe(id);
        }
        self.renderer = None;
    }
}
