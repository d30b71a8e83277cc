use crate::field::config::{Background, FieldConfig};
use crate::field::grid::AnchorGrid;
use crate::field::shade::{FrameParams, shade_dot};
use crate::field::surface::Surface;
use crate::foundation::core::{Canvas, Point, Rect, Size};
use crate::foundation::error::FolioResult;

/// Container measurements reported by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerMetrics {
    /// On-screen size in layout units.
    pub size: Size,
    /// Top-left corner in the pointer's (client) coordinate space.
    pub origin: Point,
    /// Device pixels per layout unit as reported by the display (uncapped).
    pub device_scale: f64,
}

impl ContainerMetrics {
    /// Metrics for a container at the client origin.
    pub fn new(width: f64, height: f64, device_scale: f64) -> Self {
        Self {
            size: Size::new(width, height),
            origin: Point::ORIGIN,
            device_scale,
        }
    }
}

/// State owned by one pixel field instance: surface, anchors, pointer and clock origin.
#[derive(Debug)]
pub struct FieldRenderer {
    cfg: FieldConfig,
    surface: Option<Surface>,
    grid: AnchorGrid,
    layout: Size,
    pointer: Option<Point>,
    start_ms: f64,
    frames_drawn: u64,
}

impl FieldRenderer {
    /// Create a renderer whose clock starts at `start_ms`. Nothing is allocated until [`Self::resize`].
    pub fn new(cfg: FieldConfig, start_ms: f64) -> FolioResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            surface: None,
            grid: AnchorGrid::default(),
            layout: Size::ZERO,
            pointer: None,
            start_ms,
            frames_drawn: 0,
        })
    }

    /// Parameters this renderer was created with.
    pub fn config(&self) -> &FieldConfig {
        &self.cfg
    }

    /// Reallocate the surface and rebuild anchors for new container metrics.
    ///
    /// A zero-sized container drops the surface, which makes [`Self::render`] a no-op.
    pub fn resize(&mut self, metrics: ContainerMetrics) -> FolioResult<()> {
        let scale = self.cfg.clamp_device_scale(metrics.device_scale);
        let layout = Size::new(metrics.size.width.floor(), metrics.size.height.floor());
        let canvas = Canvas::for_layout(layout, scale);

        self.layout = layout;
        if canvas.is_empty() {
            self.surface = None;
            self.grid = AnchorGrid::default();
            tracing::debug!("container has zero size; field is idle");
            return Ok(());
        }

        let unchanged = self
            .surface
            .as_ref()
            .is_some_and(|s| s.canvas() == canvas && s.scale() == scale);
        if !unchanged {
            self.surface = Some(Surface::new(canvas, scale)?);
        }
        self.grid = AnchorGrid::build(
            layout,
            self.cfg.spacing,
            self.cfg.dot_budget,
            self.cfg.max_spacing_scale,
        );
        Ok(())
    }

    /// Pointer in container-local layout units, or `None` when it is away.
    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer.filter(|p| p.is_finite());
    }

    /// Current pointer position.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Draw one frame at timestamp `now_ms`. Returns `false` when nothing could be drawn.
    #[tracing::instrument(level = "trace", skip(self), fields(frame = self.frames_drawn))]
    pub fn render(&mut self, now_ms: f64) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        if self.layout.is_zero_area() {
            return false;
        }

        match self.cfg.background {
            Background::Transparent => surface.clear(),
            bg => surface.fill(bg.to_rgba8_premul()),
        }

        let frame = FrameParams::new(&self.cfg, now_ms - self.start_ms, now_ms, self.pointer);
        let s = self.cfg.pixel_size;
        for anchor in self.grid.anchors() {
            let dot = shade_dot(&self.cfg, &frame, anchor);
            let x = (dot.pos.x - s / 2.0).round();
            let y = (dot.pos.y - s / 2.0).round();
            surface.fill_rect(Rect::new(x, y, x + s, y + s), dot.color.to_rgba8_premul());
        }

        self.frames_drawn += 1;
        true
    }

    /// Surface holding the most recent frame, if one is allocated.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Current anchor grid.
    pub fn grid(&self) -> &AnchorGrid {
        &self.grid
    }

    /// Frames drawn so far.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/renderer.rs"]
mod tests;
