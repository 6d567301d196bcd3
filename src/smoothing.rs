// First-order low-pass filter over the tracked tip.
// State stays in f64; callers truncate to pixels only when they draw.

use crate::types::Point;

#[derive(Debug, Clone)]
pub struct PointSmoother {
    alpha: f64,
    state: Option<(f64, f64)>,
}

impl PointSmoother {
    pub fn new(alpha: f64) -> Self {
        Self { alpha, state: None }
    }

    pub fn current(&self) -> Option<(f64, f64)> {
        self.state
    }

    /// Feed this frame's raw point. `None` forgets everything, so the next
    /// point passes through unblended instead of dragging stale history along.
    pub fn update(&mut self, raw: Option<(f64, f64)>) -> Option<(f64, f64)> {
        self.state = match (raw, self.state) {
            (None, _) => None,
            (Some(p), None) => Some(p),
            (Some((x, y)), Some((sx, sy))) => Some((
                self.alpha * x + (1.0 - self.alpha) * sx,
                self.alpha * y + (1.0 - self.alpha) * sy,
            )),
        };
        self.state
    }

    pub fn reset(&mut self) {
        self.state = None;
    }
}

/// Truncate a smoothed position to the pixel it falls in.
#[inline]
pub fn to_pixel((x, y): (f64, f64)) -> Point {
    Point::new(x as i32, y as i32)
}
