// Additive blend of the ink layer over the live frame.
// Visual: strokes glow on top of the video; black (empty) canvas pixels leave the video untouched.

use image::{Rgb, RgbImage};

use crate::types::Frame;

/// `out = frame + weight * canvas`, per channel, saturating at 255.
/// Canvas and frame must share dimensions; a canvas of a different size is ignored.
pub fn composite(frame: &Frame, canvas: Option<&RgbImage>, weight: f32) -> RgbImage {
    let mut out = frame.as_image().clone();
    let Some(canvas) = canvas else {
        return out;
    };
    if canvas.dimensions() != out.dimensions() {
        return out;
    }

    for (dst, ink) in out.pixels_mut().zip(canvas.pixels()) {
        if ink.0 == [0, 0, 0] {
            continue;
        }
        let blended = Rgb(std::array::from_fn(|c| add_weighted(dst[c], ink[c], weight)));
        *dst = blended;
    }
    out
}

#[inline]
fn add_weighted(base: u8, ink: u8, weight: f32) -> u8 {
    (base as f32 + weight * ink as f32).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn test_zero_canvas_is_identity() {
        let mut frame = Frame::filled(8, 6, Color::new(10, 120, 250));
        frame.as_image_mut().put_pixel(3, 3, Color::new(1, 2, 3).to_pixel());
        let canvas = RgbImage::new(8, 6);
        let out = composite(&frame, Some(&canvas), 0.8);
        assert_eq!(&out, frame.as_image());
    }

    #[test]
    fn test_weighted_sum_saturates() {
        let frame = Frame::filled(2, 1, Color::new(10, 200, 0));
        let mut canvas = RgbImage::new(2, 1);
        canvas.put_pixel(0, 0, Rgb([100, 100, 255]));
        let out = composite(&frame, Some(&canvas), 0.8);
        assert_eq!(out.get_pixel(0, 0).0, [90, 255, 204]);
        assert_eq!(out.get_pixel(1, 0).0, [10, 200, 0]);
    }

    #[test]
    fn test_missing_or_mismatched_canvas_passes_frame_through() {
        let frame = Frame::filled(4, 4, Color::WHITE);
        assert_eq!(&composite(&frame, None, 0.8), frame.as_image());
        let other = RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]));
        assert_eq!(&composite(&frame, Some(&other), 0.8), frame.as_image());
    }
}
