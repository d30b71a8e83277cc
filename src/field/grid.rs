use crate::foundation::core::{Point, Size};

/// One dot anchor: its resting position plus grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Resting position in layout units.
    pub pos: Point,
    /// Column index.
    pub col: u32,
    /// Row index.
    pub row: u32,
}

/// Evenly spaced dot anchors covering a container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnchorGrid {
    anchors: Vec<Anchor>,
    spacing: f64,
    cols: u32,
    rows: u32,
}

fn dims(size: Size, spacing: f64) -> (u32, u32) {
    let cols = (size.width / spacing).ceil() as u32 + 1;
    let rows = (size.height / spacing).ceil() as u32 + 1;
    (cols, rows)
}

fn count(size: Size, spacing: f64) -> u64 {
    let (c, r) = dims(size, spacing);
    u64::from(c) * u64::from(r)
}

impl AnchorGrid {
    /// Lay out anchors for a container of `size` layout units.
    ///
    /// `spacing` is stretched (never beyond `max_scale`) until at most `budget` anchors remain.
    /// An empty container produces an empty grid.
    pub fn build(size: Size, spacing: f64, budget: usize, max_scale: f64) -> Self {
        if !(size.width > 0.0 && size.height > 0.0) || !size.is_finite() || spacing <= 0.0 {
            return Self::default();
        }

        let budget = budget.max(1) as u64;
        let max_scale = max_scale.max(1.0);
        let naive = count(size, spacing);

        let mut scale = 1.0_f64;
        if naive > budget {
            scale = (naive as f64 / budget as f64).sqrt().clamp(1.0, max_scale);
            // The `+1` row/column makes the square-root estimate slightly low.
            while count(size, spacing * scale) > budget && scale < max_scale {
                scale = (scale * 1.02).min(max_scale);
            }
        }

        let spacing = spacing * scale;
        let (cols, rows) = dims(size, spacing);
        let half = spacing * 0.5;
        let mut anchors = Vec::with_capacity(cols as usize * rows as usize);
        for row in 0..rows {
            let y = f64::from(row) * spacing + half;
            for col in 0..cols {
                let x = f64::from(col) * spacing + half;
                anchors.push(Anchor {
                    pos: Point::new(x, y),
                    col,
                    row,
                });
            }
        }

        tracing::debug!(cols, rows, spacing, scale, "anchor grid rebuilt");
        Self {
            anchors,
            spacing,
            cols,
            rows,
        }
    }

    /// Anchors in row-major order.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Spacing actually used after budget scaling.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// `(cols, rows)` of the grid.
    pub fn dims(&self) -> (u32, u32) {
        (self.cols, self.rows)
    }

    /// Number of anchors.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Return `true` when there are no anchors.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/grid.rs"]
mod tests;
