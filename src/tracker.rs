// State carried from one frame to the next.
//
// The smoother and the previous draw point are set and cleared together, so a lost
// frame always breaks the stroke: the next sighting starts a new line instead of
// joining two unrelated positions.

use tracing::debug;

use crate::blob::Blob;
use crate::smoothing::{PointSmoother, to_pixel};
use crate::types::{Color, Point};

/// What one frame's update decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackUpdate {
    /// Where the tip is drawn this frame (truncated smoothed point).
    pub draw_point: Option<Point>,
    /// Segment to append to the canvas, if the stroke continues.
    pub segment: Option<(Point, Point)>,
    /// Ink color in effect for this frame.
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct TrackState {
    smoother: PointSmoother,
    previous_draw_point: Option<Point>,
    active_color: Color,
}

impl TrackState {
    pub fn new(alpha: f64) -> Self {
        Self {
            smoother: PointSmoother::new(alpha),
            previous_draw_point: None,
            active_color: Color::WHITE,
        }
    }

    pub fn previous_draw_point(&self) -> Option<Point> {
        self.previous_draw_point
    }

    pub fn smoothed_point(&self) -> Option<(f64, f64)> {
        self.smoother.current()
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn is_tracking(&self) -> bool {
        self.previous_draw_point.is_some()
    }

    /// Advance by one frame. `sampled` is the color under the blob's centroid.
    pub fn update(&mut self, blob: Option<&Blob>, sampled: Option<Color>) -> TrackUpdate {
        let Some(blob) = blob else {
            if self.is_tracking() {
                debug!("tracking lost");
            }
            self.smoother.reset();
            self.previous_draw_point = None;
            return self.finish(None, None);
        };

        if let Some(color) = sampled {
            self.active_color = color;
        }

        let raw = (blob.topmost.x as f64, blob.topmost.y as f64);
        let point = match self.smoother.update(Some(raw)) {
            Some(smoothed) => to_pixel(smoothed),
            None => return self.finish(None, None),
        };

        if !self.is_tracking() {
            debug!(x = point.x, y = point.y, area = blob.area, "tracking acquired");
        }
        let segment = self.previous_draw_point.map(|prev| (prev, point));
        self.previous_draw_point = Some(point);
        self.finish(Some(point), segment)
    }

    fn finish(&self, draw_point: Option<Point>, segment: Option<(Point, Point)>) -> TrackUpdate {
        debug_assert_eq!(
            self.previous_draw_point.is_some(),
            self.smoother.current().is_some(),
            "draw point and smoothed point must be set together"
        );
        TrackUpdate {
            draw_point,
            segment,
            color: self.active_color,
        }
    }
}
