// Core value types shared by every stage of the board.
// Each buffer role gets its own wrapper so a mask can never be passed where a color frame is expected.

use image::{GrayImage, ImageBuffer, Rgb, RgbImage, imageops};
use serde::{Deserialize, Serialize};

/// Integer pixel coordinate (x grows right, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_pixel(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }

    /// Pack as 0x00RRGGBB, the layout minifb expects.
    #[inline]
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<Rgb<u8>> for Color {
    fn from(px: Rgb<u8>) -> Self {
        Color::new(px[0], px[1], px[2])
    }
}

/// One pixel in 8-bit HSV: h in [0, 180), s and v in [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

/// Inclusive HSV bounds, compared channel by channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl HsvRange {
    pub const fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    #[inline]
    pub fn contains(&self, px: Hsv) -> bool {
        (self.lower.h..=self.upper.h).contains(&px.h)
            && (self.lower.s..=self.upper.s).contains(&px.s)
            && (self.lower.v..=self.upper.v).contains(&px.v)
    }
}

/// A camera frame (RGB, 8 bits per channel).
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    image: RgbImage,
}

impl Frame {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Solid-color frame; handy for tests and placeholders.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self::new(ImageBuffer::from_pixel(width, height, color.to_pixel()))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Color at (x, y), or None outside the frame.
    pub fn color_at(&self, x: i64, y: i64) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return None;
        }
        Some(Color::from(*self.image.get_pixel(x as u32, y as u32)))
    }

    /// Horizontal flip so the preview behaves like a mirror.
    pub fn mirror(&mut self) {
        imageops::flip_horizontal_in_place(&mut self.image);
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    pub fn as_image_mut(&mut self) -> &mut RgbImage {
        &mut self.image
    }
}

/// Binary mask: 255 = pixel matched the target color, 0 = it didn't.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    image: GrayImage,
}

impl Mask {
    pub const ON: u8 = 255;

    pub fn new(image: GrayImage) -> Self {
        Self { image }
    }

    pub fn empty(width: u32, height: u32) -> Self {
        Self::new(GrayImage::new(width, height))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    pub fn is_on(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y)[0] != 0
    }

    pub fn count_on(&self) -> usize {
        self.image.pixels().filter(|p| p[0] != 0).count()
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }
}

/// Window-ready pixels, each entry 0x00RRGGBB for minifb.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u32; width * height],
        }
    }

    /// Repack an RGB image into this buffer, resizing when the image size changed.
    pub fn fill_from(&mut self, image: &RgbImage) {
        let (w, h) = image.dimensions();
        self.width = w as usize;
        self.height = h as usize;
        self.pixels.clear();
        self.pixels.extend(
            image
                .pixels()
                .map(|px| Color::from(*px).to_u32()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_inclusive_on_every_channel() {
        let range = HsvRange::new(Hsv::new(20, 100, 100), Hsv::new(30, 255, 255));
        assert!(range.contains(Hsv::new(20, 100, 100)));
        assert!(range.contains(Hsv::new(30, 255, 255)));
        assert!(!range.contains(Hsv::new(19, 200, 200)));
        assert!(!range.contains(Hsv::new(25, 99, 200)));
        assert!(!range.contains(Hsv::new(25, 200, 99)));
    }

    #[test]
    fn test_mirror_flips_columns() {
        let mut frame = Frame::filled(4, 1, Color::BLACK);
        frame.as_image_mut().put_pixel(0, 0, Color::WHITE.to_pixel());
        frame.mirror();
        assert_eq!(frame.color_at(3, 0), Some(Color::WHITE));
        assert_eq!(frame.color_at(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_color_at_out_of_bounds() {
        let frame = Frame::filled(2, 2, Color::WHITE);
        assert_eq!(frame.color_at(-1, 0), None);
        assert_eq!(frame.color_at(0, 2), None);
        assert_eq!(frame.color_at(1, 1), Some(Color::WHITE));
    }

    #[test]
    fn test_framebuffer_packs_rgb() {
        let frame = Frame::filled(2, 3, Color::new(0x12, 0x34, 0x56));
        let mut fb = FrameBuffer::new(0, 0);
        fb.fill_from(frame.as_image());
        assert_eq!((fb.width, fb.height), (2, 3));
        assert!(fb.pixels.iter().all(|&p| p == 0x0012_3456));
    }
}
