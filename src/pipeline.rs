//! One frame, end to end.
//!
//! ```text
//! frame -> segment -> mask -> blob -> (topmost, centroid color)
//!       -> smoother -> draw point -> canvas segment -> composite -> tip dot -> output
//! ```
//!
//! The pipeline owns every piece of cross-frame state (track state and canvas);
//! the frame itself is only borrowed.

use image::RgbImage;
use imageproc::drawing::draw_filled_circle_mut;
use tracing::info;

use crate::blob::{Blob, BlobSelector};
use crate::canvas::StrokeCanvas;
use crate::compose::composite;
use crate::config::{BoardConfig, StrokeConfig};
use crate::sampler::sample_color;
use crate::segment::ColorSegmenter;
use crate::tracker::{TrackState, TrackUpdate};
use crate::types::Frame;

/// Everything one call to [`DrawingPipeline::process`] produced.
pub struct FrameOutput {
    /// What goes to the window.
    pub image: RgbImage,
    /// The selected blob, if any.
    pub blob: Option<Blob>,
    pub update: TrackUpdate,
}

pub struct DrawingPipeline {
    segmenter: ColorSegmenter,
    selector: BlobSelector,
    state: TrackState,
    canvas: StrokeCanvas,
    stroke: StrokeConfig,
}

impl DrawingPipeline {
    /// Build from an already validated config.
    pub fn new(config: &BoardConfig) -> Self {
        let tracking = &config.tracking;
        Self {
            segmenter: ColorSegmenter::new(tracking.color_range, tracking.kernel_size),
            selector: BlobSelector::new(tracking.min_blob_area),
            state: TrackState::new(tracking.smoothing_alpha),
            canvas: StrokeCanvas::new(),
            stroke: config.stroke.clone(),
        }
    }

    pub fn state(&self) -> &TrackState {
        &self.state
    }

    pub fn canvas(&self) -> &StrokeCanvas {
        &self.canvas
    }

    /// Wipe all strokes (the `C` key).
    pub fn clear_canvas(&mut self) {
        self.canvas.clear();
        info!("canvas cleared");
    }

    pub fn process(&mut self, frame: &Frame) -> FrameOutput {
        let (w, h) = frame.dimensions();
        if self.canvas.ensure_size(w, h) {
            info!(width = w, height = h, "canvas initialized");
        }

        let mask = self.segmenter.segment(frame);
        let blob = self.selector.select(&mask);
        let sampled = blob.as_ref().and_then(|b| sample_color(frame, b.centroid));
        let update = self.state.update(blob.as_ref(), sampled);

        if let Some((from, to)) = update.segment {
            self.canvas
                .draw_segment(from, to, update.color, self.stroke.width);
        }

        let mut image = composite(frame, self.canvas.as_image(), self.stroke.canvas_weight);
        match update.draw_point {
            Some(tip) if self.stroke.indicator_radius > 0 => draw_filled_circle_mut(
                &mut image,
                (tip.x, tip.y),
                self.stroke.indicator_radius as i32,
                self.stroke.indicator_color.to_pixel(),
            ),
            _ => {}
        }

        FrameOutput {
            image,
            blob,
            update,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Point};
    use image::RgbImage;
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    const MARKER: Color = Color::new(255, 200, 0);

    fn scene(rects: &[(i32, i32)]) -> Frame {
        let mut img = RgbImage::new(320, 240);
        for &(x, y) in rects {
            draw_filled_rect_mut(&mut img, Rect::at(x, y).of_size(40, 40), MARKER.to_pixel());
        }
        Frame::new(img)
    }

    fn pipeline() -> DrawingPipeline {
        let mut config = BoardConfig::default();
        config.stroke.indicator_radius = 0;
        DrawingPipeline::new(&config)
    }

    #[test]
    fn test_marker_movement_leaves_a_stroke() {
        let mut pipe = pipeline();
        let first = pipe.process(&scene(&[(50, 100)]));
        assert_eq!(first.update.draw_point, Some(Point::new(50, 100)));
        assert!(pipe.canvas().is_blank());

        let second = pipe.process(&scene(&[(150, 100)]));
        // 0.2 * 150 + 0.8 * 50 = 70
        assert_eq!(second.update.draw_point, Some(Point::new(70, 100)));
        assert_eq!(pipe.canvas().color_at(60, 100), Some(MARKER));
        assert_eq!(second.image.get_pixel(60, 100).0, [204, 160, 0]);
    }

    #[test]
    fn test_lost_frame_breaks_the_stroke() {
        let mut pipe = pipeline();
        pipe.process(&scene(&[(20, 20)]));
        let lost = pipe.process(&scene(&[]));
        assert!(lost.blob.is_none());
        assert_eq!(pipe.state().previous_draw_point(), None);

        pipe.process(&scene(&[(250, 180)]));
        // No segment joined (20, 20) and (250, 180).
        assert!(pipe.canvas().is_blank());
    }

    #[test]
    fn test_small_patch_is_noise() {
        let mut pipe = pipeline();
        let mut img = RgbImage::new(100, 100);
        draw_filled_rect_mut(&mut img, Rect::at(40, 40).of_size(10, 10), MARKER.to_pixel());
        let out = pipe.process(&Frame::new(img));
        assert!(out.blob.is_none());
        assert_eq!(out.update.draw_point, None);
    }

    #[test]
    fn test_ink_color_comes_from_the_centroid() {
        let mut img = RgbImage::new(100, 100);
        draw_filled_circle_mut(&mut img, (50, 50), 20, MARKER.to_pixel());
        // Still inside the yellow range, but distinguishable from the rest of the disc.
        let center = Color::new(255, 210, 10);
        img.put_pixel(50, 50, center.to_pixel());

        let mut pipe = pipeline();
        let out = pipe.process(&Frame::new(img));
        let blob = out.blob.unwrap();
        assert!((blob.centroid.0 - 50.0).abs() < 1e-6);
        assert!((blob.centroid.1 - 50.0).abs() < 1e-6);
        assert_eq!(pipe.state().active_color(), center);
    }

    #[test]
    fn test_clear_and_resize_wipe_strokes() {
        let mut pipe = pipeline();
        pipe.process(&scene(&[(50, 100)]));
        pipe.process(&scene(&[(150, 100)]));
        assert!(!pipe.canvas().is_blank());
        pipe.clear_canvas();
        assert!(pipe.canvas().is_blank());

        pipe.process(&scene(&[(50, 100)]));
        pipe.process(&scene(&[(150, 100)]));
        assert!(!pipe.canvas().is_blank());
        pipe.process(&Frame::filled(160, 120, Color::BLACK));
        assert!(pipe.canvas().is_blank());
        assert_eq!(pipe.canvas().dimensions(), Some((160, 120)));
    }

    #[test]
    fn test_tip_indicator_is_drawn_on_output_only() {
        let mut pipe = DrawingPipeline::new(&BoardConfig::default());
        let out = pipe.process(&scene(&[(50, 100)]));
        assert_eq!(out.image.get_pixel(50, 100).0, [255, 255, 0]);
        assert_eq!(out.image.get_pixel(50, 95).0, [255, 255, 0]);
        assert!(pipe.canvas().is_blank());
    }
}
