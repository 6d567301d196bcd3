// Color segmentation: which pixels of the frame look like the marker?
// Thresholding happens in HSV so a brighter or dimmer room mostly moves V, not H.

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{close, open};

use crate::types::{Frame, Hsv, HsvRange, Mask};

/// Convert one RGB pixel to 8-bit HSV (h in [0, 180), s and v in [0, 255]).
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = (max - min) as f32;

    let s = if max == 0 {
        0
    } else {
        (255.0 * diff / max as f32).round() as u8
    };

    if diff == 0.0 {
        return Hsv::new(0, s, max);
    }

    let (r, g, b) = (r as f32, g as f32, b as f32);
    let mut deg = if max as f32 == r {
        60.0 * (g - b) / diff
    } else if max as f32 == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    if deg < 0.0 {
        deg += 360.0;
    }

    // Halve to fit a byte; 180 wraps around to red again.
    let h = ((deg / 2.0).round() as u32 % 180) as u8;
    Hsv::new(h, s, max)
}

/// Raw threshold: on iff every HSV channel is inside the range. No cleanup.
pub fn in_range(frame: &Frame, range: &HsvRange) -> Mask {
    let src = frame.as_image();
    let (w, h) = src.dimensions();
    let out = GrayImage::from_fn(w, h, |x, y| {
        let px = src.get_pixel(x, y);
        let hsv = rgb_to_hsv(px[0], px[1], px[2]);
        if range.contains(hsv) {
            Luma([Mask::ON])
        } else {
            Luma([0])
        }
    });
    Mask::new(out)
}

/// Thresholds a frame and cleans the mask with opening then closing.
#[derive(Debug, Clone)]
pub struct ColorSegmenter {
    range: HsvRange,
    radius: u8, // half the kernel side; a k x k square is an L-inf ball of radius k/2
}

impl ColorSegmenter {
    /// `kernel_size` must be odd; `BoardConfig::validate` guarantees that for configured values.
    pub fn new(range: HsvRange, kernel_size: u32) -> Self {
        Self {
            range,
            radius: (kernel_size / 2).min(u8::MAX as u32) as u8,
        }
    }

    pub fn segment(&self, frame: &Frame) -> Mask {
        let raw = in_range(frame, &self.range);
        if self.radius == 0 {
            return raw;
        }
        // Opening first drops speckles; closing then fills pinholes and joins fragments.
        let opened = open(raw.as_image(), Norm::LInf, self.radius);
        Mask::new(close(&opened, Norm::LInf, self.radius))
    }
}
