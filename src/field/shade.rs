//! Per-dot displacement and color.
//!
//! Everything here is a pure function of the anchor, the pointer, and the two clocks, so a
//! frame is fully determined by its inputs.

use crate::field::config::FieldConfig;
use crate::field::grid::Anchor;
use crate::foundation::color::Hsl;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::wrap_degrees;

/// Fraction of the pointer radius used as the Gaussian sigma.
pub const SIGMA_FRACTION: f64 = 0.6;

/// Per-frame inputs shared by every dot.
#[derive(Clone, Copy, Debug)]
pub struct FrameParams {
    /// Milliseconds since the field started.
    pub elapsed_ms: f64,
    /// Absolute frame timestamp in milliseconds (drives the ripple).
    pub now_ms: f64,
    /// Pointer position in layout units, `None` when the pointer is away.
    pub pointer: Option<Point>,
    /// Base hue in degrees.
    pub base_hue: f64,
}

impl FrameParams {
    /// Derive frame inputs from the config and clocks.
    pub fn new(cfg: &FieldConfig, elapsed_ms: f64, now_ms: f64, pointer: Option<Point>) -> Self {
        Self {
            elapsed_ms,
            now_ms,
            pointer,
            base_hue: base_hue(cfg, elapsed_ms),
        }
    }
}

/// Which color formula a dot used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    /// Within the pointer radius.
    Inside,
    /// Everywhere else.
    Outside,
}

/// Result of shading one anchor.
#[derive(Clone, Copy, Debug)]
pub struct ShadedDot {
    /// Displaced center.
    pub pos: Point,
    /// Fill color.
    pub color: Hsl,
    /// Branch taken for the color.
    pub zone: Zone,
    /// Gaussian falloff at this anchor (`0..=1`).
    pub falloff: f64,
}

/// `(elapsed * 360 / cycle) mod 360`.
pub fn base_hue(cfg: &FieldConfig, elapsed_ms: f64) -> f64 {
    wrap_degrees(elapsed_ms * cfg.base_hue_speed())
}

/// Gaussian bump centered on the pointer.
pub fn falloff(dist: f64, pointer_radius: f64) -> f64 {
    let sigma = pointer_radius * SIGMA_FRACTION;
    if sigma <= 0.0 || !dist.is_finite() {
        return 0.0;
    }
    (-(dist * dist) / (2.0 * sigma * sigma)).exp()
}

/// Shade a single anchor for the given frame.
pub fn shade_dot(cfg: &FieldConfig, frame: &FrameParams, anchor: &Anchor) -> ShadedDot {
    let phase = f64::from(anchor.col + anchor.row) * 2.0;

    let Some(pointer) = frame.pointer else {
        return ShadedDot {
            pos: anchor.pos,
            color: outside_color(frame, anchor, phase),
            zone: Zone::Outside,
            falloff: 0.0,
        };
    };

    let delta: Vec2 = anchor.pos - pointer;
    let dist = delta.hypot();
    let falloff = falloff(dist, cfg.pointer_radius);
    let wave = (frame.now_ms * cfg.ripple_speed + dist * cfg.ripple_frequency).sin();

    let disp = cfg.warp_strength * falloff * wave;
    let pos = anchor.pos + Vec2::from_angle(delta.atan2()) * disp;

    if dist < cfg.pointer_radius {
        let inner_speed = cfg.base_hue_speed() * cfg.color_boost;
        let inner = wrap_degrees(frame.elapsed_ms * inner_speed + dist * 0.3 + wave * 60.0);
        ShadedDot {
            pos,
            color: Hsl {
                h: wrap_degrees(frame.base_hue + inner + phase),
                s: 74.0,
                l: 60.0 + 18.0 * falloff * (0.5 + 0.5 * wave),
            },
            zone: Zone::Inside,
            falloff,
        }
    } else {
        ShadedDot {
            pos,
            color: outside_color(frame, anchor, phase),
            zone: Zone::Outside,
            falloff,
        }
    }
}

fn outside_color(frame: &FrameParams, anchor: &Anchor, phase: f64) -> Hsl {
    Hsl {
        h: wrap_degrees(frame.base_hue + phase),
        s: 68.0,
        l: 56.0 + 6.0 * (frame.now_ms * 0.0012 + f64::from(anchor.col) * 0.4).sin(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/shade.rs"]
mod tests;
