use crate::foundation::core::{Canvas, Rect, Rgba8Premul};
use crate::foundation::error::{FolioError, FolioResult};
use crate::foundation::math::over;

/// Device-pixel raster the field draws into.
///
/// Pixels are premultiplied RGBA8, tightly packed, row-major. Drawing calls take layout-unit
/// coordinates and map them through `scale`.
#[derive(Clone, Debug)]
pub struct Surface {
    canvas: Canvas,
    scale: f64,
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(canvas: Canvas, scale: f64) -> FolioResult<Self> {
        if canvas.is_empty() {
            return Err(FolioError::render("surface must have a non-zero size"));
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(FolioError::render("surface scale must be > 0"));
        }
        Ok(Self {
            canvas,
            scale,
            data: vec![0; canvas.rgba_len()],
        })
    }

    /// Device-pixel dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Device pixels per layout unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Raw premultiplied pixels.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at device coordinates, if inside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = (y as usize * self.canvas.width as usize + x as usize) * 4;
        let p = &self.data[i..i + 4];
        Some(Rgba8Premul {
            r: p[0],
            g: p[1],
            b: p[2],
            a: p[3],
        })
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Source-over fill of a layout-unit rectangle, clipped to the surface.
    ///
    /// The rectangle is snapped outward to whole device pixels so that small dots never vanish.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) {
        if color.a == 0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.device_span(rect) else {
            return;
        };

        let src = color.to_array();
        let stride = self.canvas.width as usize * 4;
        for y in y0..y1 {
            let row = &mut self.data[y * stride..(y + 1) * stride];
            for d in row[x0 * 4..x1 * 4].chunks_exact_mut(4) {
                let out = over([d[0], d[1], d[2], d[3]], src);
                d.copy_from_slice(&out);
            }
        }
    }

    fn device_span(&self, rect: Rect) -> Option<(usize, usize, usize, usize)> {
        let s = self.scale;
        let fx0 = (rect.x0 * s).floor().max(0.0);
        let fy0 = (rect.y0 * s).floor().max(0.0);
        let fx1 = (rect.x1 * s).ceil().min(f64::from(self.canvas.width));
        let fy1 = (rect.y1 * s).ceil().min(f64::from(self.canvas.height));
        if !(fx0 < fx1 && fy0 < fy1) {
            return None;
        }
        Some((fx0 as usize, fy0 as usize, fx1 as usize, fy1 as usize))
    }

    /// Copy out as straight (non-premultiplied) RGBA8, as image encoders expect.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for p in out.chunks_exact_mut(4) {
            let a = u16::from(p[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut p[..3] {
                let v = (u16::from(*c) * 255 + a / 2) / a;
                *c = v.min(255) as u8;
            }
        }
        out
    }

    /// Number of pixels whose alpha is non-zero.
    pub fn covered_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|p| p[3] != 0).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/surface.rs"]
mod tests;
